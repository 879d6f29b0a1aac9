//! # mapscope-core
//!
//! Parsing and analysis of linker-generated memory map reports.
//!
//! This crate reads the text map a GNU ld style linker writes next to a
//! firmware image and answers questions about it:
//! - Where does a symbol live, and which memory region holds it?
//! - Which symbols sit next to a given one?
//! - Do any symbols overlap, escape their module or get defined twice?
//! - What moved or changed size between two builds?
//!
//! ## Structure
//!
//! - [`parser`]: splits the report and turns lines into entries
//! - [`map`]: the parsed, append-only entry list ([`MemoryMap`])
//! - [`query`]: address and name lookups
//! - [`diagnostics`]: layout checks and per-module statistics
//! - [`diff`]: comparison of two maps
//! - [`blocks`]: optional image bytes for cross-referencing symbols
//!
//! The parser never runs a linker and never computes layout; it only
//! interprets what the report says, and skips lines it cannot read.

pub mod blocks;
pub mod config;
pub mod diagnostics;
pub mod diff;
pub mod error;
pub mod map;
pub mod parser;
pub mod prelude;
pub mod query;
mod store;
pub mod types;

pub use config::ParserConfig;
// Re-export commonly used types
pub use error::{MapError, MapResult};
pub use map::MemoryMap;
pub use types::{Access, Address, EntryId, EntryKind, MapEntry};
