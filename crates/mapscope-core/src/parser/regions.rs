//! Memory region table parsing.
//!
//! ```text
//! Name             Origin             Length             Attributes
//! FLASH            0x08000000         0x00020000         xr
//! RAM              0x20000000         0x00005000         xrw
//! *default*        0x00000000         0xffffffff
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::ParseStats;
use crate::error::{MapError, MapResult};
use crate::store::EntryStore;
use crate::types::address::parse_hex_u64;
use crate::types::{Access, Address, MapEntry};

/// Column header that must precede the first region row
pub const ATTRIBUTES: &str = "Attributes";

static REGION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<name>[^\s*]+)\s+(?P<origin>0x[0-9a-fA-F]+)\s+(?P<length>0x[0-9a-fA-F]+)\s+(?P<attributes>\S+)")
        .expect("region line pattern is valid")
});

/// Parse every region row after the `Attributes` header into `store`.
///
/// `*default*` (no attributes) and other rows that don't fit the grammar
/// are skipped.
pub(crate) fn parse_regions(section: &str, store: &mut EntryStore, stats: &mut ParseStats) -> MapResult<()>
{
    let (_, table) = section
        .split_once(ATTRIBUTES)
        .ok_or(MapError::MissingSection(ATTRIBUTES))?;

    for line in table.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_region_line(line) {
            Some(entry) => {
                trace!("Region {} at {} ({} bytes)", entry.name(), entry.start(), entry.size().unwrap_or(0));
                store.push(entry);
                stats.regions += 1;
            }
            None => {
                trace!("Skipping region line: {line:?}");
                stats.skipped_lines += 1;
            }
        }
    }
    Ok(())
}

fn parse_region_line(line: &str) -> Option<MapEntry>
{
    let caps = REGION_LINE.captures(line)?;
    let origin = Address::parse_hex(&caps["origin"])?;
    let length = parse_hex_u64(&caps["length"])?;
    let access = Access::parse_attributes(&caps["attributes"]);
    Some(MapEntry::memory(&caps["name"], origin, length, access))
}
