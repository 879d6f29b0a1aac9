//! Common module for library exports

pub use crate::blocks::{ByteSource, DataBlock, DataBlocks};
pub use crate::config::ParserConfig;
pub use crate::diagnostics::{Bound, Finding, MapStats, ModuleUsage};
pub use crate::diff::{Difference, DifferenceKind};
pub use crate::error::{MapError, MapResult};
pub use crate::map::MemoryMap;
pub use crate::parser::ParseStats;
pub use crate::query::NameMatcher;
pub use crate::types::{Access, Address, EntryId, EntryKind, MapEntry};
