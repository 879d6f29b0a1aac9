//! # Error Types
//!
//! Errors raised while loading a map report or querying the parsed map.
//!
//! We use `thiserror` to derive the `Error` trait and the messages.
//!
//! Note that malformed lines inside a recognised section are *not* errors:
//! the parser skips them and counts them in
//! [`ParseStats`](crate::parser::ParseStats).

use thiserror::Error;

/// Main error type for map parsing and queries
///
/// ## Error Categories
///
/// 1. **Structural errors**: `MissingSection` (fatal to construction)
/// 2. **Query errors**: `NotFound` (a lookup matched nothing)
/// 3. **Internal errors**: `InvariantViolation` (indicates a parser bug)
/// 4. **I/O errors**: `Io` (reading a report from disk)
#[derive(Error, Debug)]
pub enum MapError
{
    /// A required anchor phrase is absent from the report
    ///
    /// The report must contain `"Memory Configuration"` followed by a region
    /// table header containing `"Attributes"`. The symbol-map anchor
    /// (`"Linker script and memory map"`) is optional and never produces
    /// this error.
    #[error("Missing section: report has no \"{0}\" marker")]
    MissingSection(&'static str),

    /// A query matched no entry
    ///
    /// `kind` names what was being looked for (for example `"memory region"`
    /// or `"global"`), `key` is the address or name that was requested.
    #[error("No {kind} found for {key}")]
    NotFound
    {
        /// What kind of entry the query was looking for
        kind: &'static str,
        /// The requested address, name or pattern
        key: String,
    },

    /// The end of an entry was requested but its size was never resolved
    ///
    /// Globals get their size either from their module or from the next
    /// global in the same module. Seeing this means a caller asked for the
    /// extent of an entry the report never bounded.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// I/O error while reading a report from disk
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MapError
{
    pub(crate) fn not_found(kind: &'static str, key: impl Into<String>) -> Self
    {
        MapError::NotFound { kind, key: key.into() }
    }
}

/// Convenience type alias for `Result<T, MapError>`
///
/// ```rust
/// use mapscope_core::error::MapResult;
/// fn foo() -> MapResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type MapResult<T> = std::result::Result<T, MapError>;
