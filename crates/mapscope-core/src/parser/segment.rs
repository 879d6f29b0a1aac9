//! Splitting a report into its region table and its symbol map.

use std::borrow::Cow;

use crate::error::{MapError, MapResult};

/// Anchor that precedes the memory region table
pub const MEMORY_CONFIGURATION: &str = "Memory Configuration";
/// Anchor that separates the region table from the symbol map
pub const LINKER_SCRIPT_AND_MAP: &str = "Linker script and memory map";

/// The two parts of a report that the parser reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSections<'a>
{
    /// Text between `Memory Configuration` and `Linker script and memory map`
    pub regions: &'a str,
    /// Text after `Linker script and memory map` (empty when that anchor is
    /// missing)
    pub symbols: &'a str,
}

/// Drop every carriage return so that CRLF reports split like LF ones.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str>
{
    if text.contains('\r') {
        Cow::Owned(text.replace('\r', ""))
    } else {
        Cow::Borrowed(text)
    }
}

/// Locate the region table and the symbol map inside normalised text
///
/// ## Errors
///
/// Returns [`MapError::MissingSection`] if `Memory Configuration` does not
/// appear in `text`.
pub fn split_sections(text: &str) -> MapResult<ReportSections<'_>>
{
    let (_, rest) = text
        .split_once(MEMORY_CONFIGURATION)
        .ok_or(MapError::MissingSection(MEMORY_CONFIGURATION))?;

    let (regions, symbols) = rest.split_once(LINKER_SCRIPT_AND_MAP).unwrap_or((rest, ""));
    Ok(ReportSections { regions, symbols })
}
