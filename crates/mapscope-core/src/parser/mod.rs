//! # Report Parser
//!
//! Turns the text of a GNU ld style map report into entries.
//!
//! Parsing happens in three stages, each in its own module:
//!
//! 1. [`segment`] normalises line endings and cuts the report into the
//!    region table and the symbol map.
//! 2. [`regions`] reads one memory region per row of the region table.
//! 3. [`symbols`] walks the symbol map, producing modules and globals for
//!    the sections allowed by [`ParserConfig`].
//!
//! Only a missing anchor aborts parsing. Rows that don't match the expected
//! grammar are skipped and counted in [`ParseStats`].

pub mod regions;
pub mod segment;
pub(crate) mod symbols;

use tracing::debug;

use self::symbols::SymbolParser;
use crate::config::ParserConfig;
use crate::error::MapResult;
use crate::store::EntryStore;

/// Counters collected while parsing a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats
{
    /// Memory regions read from the configuration table
    pub regions: usize,
    /// Module rows inside data sections
    pub modules: usize,
    /// Global rows inside data sections
    pub globals: usize,
    /// Section headers outside the data-section allow-list
    pub skipped_sections: usize,
    /// Non-blank rows that matched no grammar (region table or data sections)
    pub skipped_lines: usize,
}

/// Parse a whole report into a fresh entry store.
pub(crate) fn parse_report(text: &str, config: &ParserConfig) -> MapResult<(EntryStore, ParseStats)>
{
    let text = segment::normalize_line_endings(text);
    let sections = segment::split_sections(&text)?;

    let mut store = EntryStore::default();
    let mut stats = ParseStats::default();
    regions::parse_regions(sections.regions, &mut store, &mut stats)?;

    let stats = sections
        .symbols
        .lines()
        .fold(SymbolParser::new(config, stats), |parser, line| parser.feed(line, &mut store))
        .finish();

    debug!(
        "Parsed {} regions, {} modules, {} globals ({} sections and {} lines skipped)",
        stats.regions, stats.modules, stats.globals, stats.skipped_sections, stats.skipped_lines
    );
    Ok((store, stats))
}
