//! Module and global parsing for the `Linker script and memory map` part.
//!
//! The symbol map is a sequence of output sections. Each one opens with a
//! header in column 0, followed by one line per input module and one line
//! per global symbol inside it:
//!
//! ```text
//! .bss            0x20000000       0x40
//!  .bss           0x20000000       0x20 build/main.o
//!                 0x20000000                counter
//!                 0x20000010                buffer
//! ```
//!
//! Parsing is a fold over lines. [`SymbolParser::feed`] takes the current
//! state by value and returns the next one, so the "current module" and
//! "last global" cursors never outlive a single report.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, trace};

use super::ParseStats;
use crate::config::ParserConfig;
use crate::store::EntryStore;
use crate::types::address::parse_hex_u64;
use crate::types::{Access, Address, EntryId, MapEntry};

static MAP_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?P<section>[._()a-zA-Z]*)\s*(?P<address>0x[0-9a-fA-F]{8,})\b\s*(?:(?P<size>0x[0-9a-fA-F]+)\s+)?(?P<name>\S.*?)\s*$",
    )
    .expect("map line pattern is valid")
});

/// Line-by-line state of the symbol map parser
#[derive(Debug, Clone)]
pub(crate) struct SymbolParser<'c>
{
    config: &'c ParserConfig,
    current_module: Option<EntryId>,
    last_global: Option<EntryId>,
    in_data_section: bool,
    stats: ParseStats,
}

impl<'c> SymbolParser<'c>
{
    pub(crate) fn new(config: &'c ParserConfig, stats: ParseStats) -> Self
    {
        Self {
            config,
            current_module: None,
            last_global: None,
            in_data_section: false,
            stats,
        }
    }

    /// Consume one line, appending any entry it describes to `store`.
    pub(crate) fn feed(mut self, line: &str, store: &mut EntryStore) -> Self
    {
        if line.trim().is_empty() {
            return self;
        }

        if line.starts_with('.') {
            self.enter_section(line);
            return self;
        }

        if !self.in_data_section {
            return self;
        }

        let Some(parsed) = MAP_LINE.captures(line).and_then(|caps| MapLine::from_captures(&caps)) else {
            trace!("Skipping map line: {line:?}");
            self.stats.skipped_lines += 1;
            return self;
        };

        match parsed.section {
            Some(section) => self.push_module(section, parsed, store),
            None => self.push_global(parsed, store),
        }
        self
    }

    pub(crate) fn finish(self) -> ParseStats
    {
        self.stats
    }

    fn enter_section(&mut self, line: &str)
    {
        self.current_module = None;
        self.last_global = None;

        let section = line.split_whitespace().next().unwrap_or_default();
        self.in_data_section = self.config.is_data_section(section);
        if self.in_data_section {
            debug!("Parsing section {section}");
        } else {
            trace!("Skipping section {section}");
            self.stats.skipped_sections += 1;
        }
    }

    fn push_module(&mut self, section: &str, line: MapLine<'_>, store: &mut EntryStore)
    {
        let id = store.push(MapEntry::module(section, line.name, line.address, line.size));
        self.current_module = Some(id);
        self.last_global = None;
        self.stats.modules += 1;
    }

    fn push_global(&mut self, line: MapLine<'_>, store: &mut EntryStore)
    {
        let (end, access) = self
            .current_module
            .and_then(|id| store.get(id))
            .map_or((None, Access::ALL), |module| (module.end(), module.access()));

        let id = store.push(MapEntry::global(line.name, line.address, end, access, self.current_module));
        if let Some(previous) = self.last_global.replace(id) {
            store.end_before(previous, line.address);
        }
        self.stats.globals += 1;
    }
}

/// A symbol map row that matched the line grammar.
struct MapLine<'a>
{
    /// Present (non-empty) for module rows, absent for global rows
    section: Option<&'a str>,
    address: Address,
    size: Option<u64>,
    name: &'a str,
}

impl<'a> MapLine<'a>
{
    fn from_captures(caps: &Captures<'a>) -> Option<Self>
    {
        let section = caps.name("section").map(|m| m.as_str()).filter(|s| !s.is_empty());
        let address = Address::parse_hex(caps.name("address")?.as_str())?;
        let size = match caps.name("size") {
            Some(m) => Some(parse_hex_u64(m.as_str())?),
            None => None,
        };
        let name = caps.name("name")?.as_str();
        Some(Self {
            section,
            address,
            size,
            name,
        })
    }
}
