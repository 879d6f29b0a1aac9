//! Map entries: memory regions, modules and globals.

use std::fmt;

use super::{Access, Address};
use crate::error::{MapError, MapResult};

/// What a [`MapEntry`] describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind
{
    /// A named memory region from the configuration table (FLASH, RAM, ...)
    Memory,
    /// An object file's contribution to a linker section
    Module,
    /// A named symbol placed inside a module
    Global,
}

impl fmt::Display for EntryKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let label = match self {
            EntryKind::Memory => "Memory",
            EntryKind::Module => "Module",
            EntryKind::Global => "Global",
        };
        write!(f, "{label}")
    }
}

/// Handle to an entry inside a [`MemoryMap`](crate::MemoryMap)
///
/// Ids are positions in the map's append-only entry store, so they stay
/// valid for the lifetime of the map they came from. Using an id from one
/// map to index another is a logic error (it will resolve to an unrelated
/// entry or to nothing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub(crate) usize);

impl EntryId
{
    /// Position of the entry in parse order
    pub fn index(self) -> usize
    {
        self.0
    }
}

/// One parsed line of a map report
///
/// Entries cover the half-open range `[start, end)`. `size` is `None` when
/// the report never bounded the entry (a module printed without a size, or
/// the last global of a section with no enclosing module).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry
{
    kind: EntryKind,
    name: String,
    section: String,
    start: Address,
    size: Option<u64>,
    access: Access,
    module: Option<EntryId>,
    /// Size was cut down to reach the next global
    backfilled: bool,
}

impl MapEntry
{
    pub(crate) fn memory(name: impl Into<String>, origin: Address, length: u64, access: Access) -> Self
    {
        Self {
            kind: EntryKind::Memory,
            name: name.into(),
            section: String::new(),
            start: origin,
            size: Some(length),
            access,
            module: None,
            backfilled: false,
        }
    }

    pub(crate) fn module(section: impl Into<String>, name: impl Into<String>, start: Address, size: Option<u64>) -> Self
    {
        Self {
            kind: EntryKind::Module,
            name: name.into(),
            section: section.into(),
            start,
            size,
            access: Access::ALL,
            module: None,
            backfilled: false,
        }
    }

    /// A global bounded by `end` when known.
    ///
    /// An `end` before `start` leaves the size unresolved.
    pub(crate) fn global(
        name: impl Into<String>,
        start: Address,
        end: Option<Address>,
        access: Access,
        module: Option<EntryId>,
    ) -> Self
    {
        Self {
            kind: EntryKind::Global,
            name: name.into(),
            section: String::new(),
            start,
            size: end.and_then(|end| end.distance_from(start)),
            access,
            module,
            backfilled: false,
        }
    }

    /// Make this entry end right before `successor_start`.
    ///
    /// Clamps to an empty entry when the successor does not start after us.
    pub(crate) fn end_before(&mut self, successor_start: Address)
    {
        let size = successor_start
            .checked_sub(1)
            .and_then(|end| end.distance_from(self.start))
            .unwrap_or(0);
        self.size = Some(size);
        self.backfilled = true;
    }

    pub fn kind(&self) -> EntryKind
    {
        self.kind
    }

    pub fn name(&self) -> &str
    {
        &self.name
    }

    /// Linker section of a module (`.bss`, `.rodata.str1.1`, ...), empty for
    /// memory regions and globals
    pub fn section(&self) -> &str
    {
        &self.section
    }

    pub fn start(&self) -> Address
    {
        self.start
    }

    /// Size in bytes, `None` if the report never bounded this entry
    pub fn size(&self) -> Option<u64>
    {
        self.size
    }

    /// Exclusive end address, `None` when the size is unknown
    pub fn end(&self) -> Option<Address>
    {
        self.size.map(|size| self.start.saturating_add(size))
    }

    /// Exclusive end address, failing when the size was never resolved
    ///
    /// ## Errors
    ///
    /// Returns [`MapError::InvariantViolation`] if `size` is unknown.
    pub fn try_end(&self) -> MapResult<Address>
    {
        self.end().ok_or_else(|| {
            MapError::InvariantViolation(format!("{} {} at {} has no resolved size", self.kind, self.name, self.start))
        })
    }

    pub fn access(&self) -> Access
    {
        self.access
    }

    /// Module that was active when this global was parsed
    pub fn module_id(&self) -> Option<EntryId>
    {
        self.module
    }

    pub fn is_memory(&self) -> bool
    {
        self.kind == EntryKind::Memory
    }

    pub fn is_module(&self) -> bool
    {
        self.kind == EntryKind::Module
    }

    pub fn is_global(&self) -> bool
    {
        self.kind == EntryKind::Global
    }

    /// Whether the end was derived from the next global's start
    pub fn is_backfilled(&self) -> bool
    {
        self.backfilled
    }

    /// Whether `address` falls inside `[start, end)`
    ///
    /// A backfilled global also contains `end` itself, the byte right
    /// before its successor, so consecutive globals leave no gap. An entry
    /// of unknown size only contains its start address.
    pub fn contains(&self, address: Address) -> bool
    {
        match self.end() {
            Some(end) if self.backfilled => self.start <= address && address <= end,
            Some(end) => self.start <= address && address < end,
            None => self.start == address,
        }
    }

    /// Half-open overlap test: `a.start < b.end && b.start < a.end`
    ///
    /// Entries of unknown size never overlap anything, and abutting entries
    /// (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &MapEntry) -> bool
    {
        match (self.end(), other.end()) {
            (Some(self_end), Some(other_end)) => self.start < other_end && other.start < self_end,
            _ => false,
        }
    }
}

impl fmt::Display for MapEntry
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "({}){}\t\t\t0x{:08X}", self.kind, self.name, self.start)?;
        if let Some(end) = self.end() {
            write!(f, " .. 0x{end:08X}")?;
        }
        Ok(())
    }
}
