//! # Memory Map
//!
//! The parsed form of a map report: an ordered, append-only list of
//! [`MapEntry`] values. Memory regions come first, followed by modules and
//! globals interleaved in the order the report lists them.
//!
//! A `MemoryMap` is built once and then only read, so it can be shared
//! between threads freely. Lookups live in [`crate::query`], layout checks
//! in [`crate::diagnostics`] and build comparison in [`crate::diff`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mapscope_core::MemoryMap;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>>
//! {
//!     let map = MemoryMap::from_file("firmware.map")?;
//!     let counter = map.global("counter")?;
//!     println!("{counter} lives in {}", map.memory_of(counter)?.name());
//!     println!("{}", map.diagnose_str());
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::config::ParserConfig;
use crate::error::{MapError, MapResult};
use crate::parser::{self, ParseStats};
use crate::store::EntryStore;
use crate::types::{EntryId, EntryKind, MapEntry};

/// Parsed memory map report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryMap
{
    store: EntryStore,
    stats: ParseStats,
}

impl MemoryMap
{
    /// Parse report text with the default section allow-list
    ///
    /// ## Errors
    ///
    /// Returns [`MapError::MissingSection`] if the report lacks the
    /// `Memory Configuration` anchor or the `Attributes` table header.
    pub fn parse(text: &str) -> MapResult<Self>
    {
        Self::parse_with(text, &ParserConfig::default())
    }

    /// Parse report text with a custom configuration
    ///
    /// ## Errors
    ///
    /// Same as [`MemoryMap::parse`].
    pub fn parse_with(text: &str, config: &ParserConfig) -> MapResult<Self>
    {
        let (store, stats) = parser::parse_report(text, config)?;
        Ok(Self { store, stats })
    }

    /// Read and parse a report from disk
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected;
    /// vendor tools are not always careful about encodings.
    ///
    /// ## Errors
    ///
    /// Returns [`MapError::Io`] if the file can't be read, otherwise the
    /// same errors as [`MemoryMap::parse`].
    pub fn from_file(path: impl AsRef<Path>) -> MapResult<Self>
    {
        Self::from_file_with(path, &ParserConfig::default())
    }

    /// [`MemoryMap::from_file`] with a custom configuration
    ///
    /// ## Errors
    ///
    /// Same as [`MemoryMap::from_file`].
    pub fn from_file_with(path: impl AsRef<Path>, config: &ParserConfig) -> MapResult<Self>
    {
        let path = path.as_ref();
        info!("Loading map report {}", path.display());
        let bytes = fs::read(path)?;
        Self::parse_with(&String::from_utf8_lossy(&bytes), config)
    }

    /// All entries in parse order
    pub fn entries(&self) -> &[MapEntry]
    {
        self.store.as_slice()
    }

    pub fn entry(&self, id: EntryId) -> Option<&MapEntry>
    {
        self.store.get(id)
    }

    pub fn len(&self) -> usize
    {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.entries().is_empty()
    }

    /// Counters collected while parsing
    pub fn parse_stats(&self) -> &ParseStats
    {
        &self.stats
    }

    /// Entries of one kind, in parse order. O(n) per call.
    pub fn entries_of(&self, kind: EntryKind) -> impl Iterator<Item = &MapEntry> + '_
    {
        self.store.of_kind(kind)
    }

    /// Memory regions, in declaration order. O(n) per call.
    pub fn memories(&self) -> impl Iterator<Item = &MapEntry> + '_
    {
        self.entries_of(EntryKind::Memory)
    }

    /// Modules, in parse order. O(n) per call.
    pub fn modules(&self) -> impl Iterator<Item = &MapEntry> + '_
    {
        self.entries_of(EntryKind::Module)
    }

    /// Globals, in parse order. O(n) per call.
    pub fn globals(&self) -> impl Iterator<Item = &MapEntry> + '_
    {
        self.entries_of(EntryKind::Global)
    }

    /// Module that was active when `entry` was parsed
    pub fn module_of(&self, entry: &MapEntry) -> Option<&MapEntry>
    {
        entry.module_id().and_then(|id| self.entry(id))
    }
}

impl FromStr for MemoryMap
{
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        Self::parse(s)
    }
}

impl fmt::Display for MemoryMap
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        for (index, entry) in self.entries().iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}
