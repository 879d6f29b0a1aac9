//! # Types
//!
//! Value types shared by the parser, the entry store and the analyses.

pub mod access;
pub mod address;
pub mod entry;

// Re-export all public types
pub use access::Access;
pub use address::Address;
pub use entry::{EntryId, EntryKind, MapEntry};
