//! # Queries
//!
//! Address and name lookups over a parsed [`MemoryMap`].
//!
//! Every lookup scans the entry list in parse order and returns the first
//! match. Nothing is indexed: symbol tables are small enough that a linear
//! scan is cheaper than keeping an index coherent. A lookup that matches
//! nothing fails with [`MapError::NotFound`].

use regex::Regex;

use crate::error::{MapError, MapResult};
use crate::map::MemoryMap;
use crate::types::{Address, MapEntry};

/// Something a global's name can be tested against
///
/// Implemented for plain names (exact comparison) and for [`Regex`]
/// (match anchored at the start of the name).
pub trait NameMatcher
{
    fn matches_name(&self, name: &str) -> bool;

    /// How the matcher is shown in a `NotFound` error
    fn describe(&self) -> String;
}

impl NameMatcher for str
{
    fn matches_name(&self, name: &str) -> bool
    {
        self == name
    }

    fn describe(&self) -> String
    {
        format!("\"{self}\"")
    }
}

impl NameMatcher for String
{
    fn matches_name(&self, name: &str) -> bool
    {
        self.as_str().matches_name(name)
    }

    fn describe(&self) -> String
    {
        self.as_str().describe()
    }
}

impl NameMatcher for Regex
{
    fn matches_name(&self, name: &str) -> bool
    {
        self.find(name).is_some_and(|m| m.start() == 0)
    }

    fn describe(&self) -> String
    {
        format!("/{}/", self.as_str())
    }
}

impl MemoryMap
{
    /// Memory region whose `[start, end)` contains `address`
    ///
    /// Regions are assumed to be disjoint; if they are not, the first
    /// declared one wins.
    ///
    /// ## Errors
    ///
    /// [`MapError::NotFound`] if no region contains `address`.
    pub fn memory_at(&self, address: Address) -> MapResult<&MapEntry>
    {
        self.memories()
            .find(|memory| memory.contains(address))
            .ok_or_else(|| MapError::not_found("memory region", address.to_string()))
    }

    /// Memory region containing the start of `entry`
    ///
    /// ## Errors
    ///
    /// [`MapError::NotFound`] if `entry` starts outside every region.
    pub fn memory_of(&self, entry: &MapEntry) -> MapResult<&MapEntry>
    {
        self.memory_at(entry.start())
    }

    /// First global whose name matches, in parse order
    ///
    /// ```rust
    /// use mapscope_core::MemoryMap;
    /// use regex::Regex;
    ///
    /// let map = MemoryMap::parse(
    ///     "Memory Configuration\n\nName Origin Length Attributes\n\
    ///      RAM 0x20000000 0x00001000 xrw\n\n\
    ///      Linker script and memory map\n\n\
    ///      .bss 0x20000000 0x10\n \
    ///      .bss 0x20000000 0x10 main.o\n \
    ///      0x20000000 rx_buffer\n \
    ///      0x20000008 rx_count\n",
    /// )?;
    /// assert_eq!(map.global("rx_count")?.start().value(), 0x2000_0008);
    /// assert_eq!(map.global(&Regex::new("rx_")?)?.name(), "rx_buffer");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    ///
    /// ## Errors
    ///
    /// [`MapError::NotFound`] if no global matches.
    pub fn global<M: NameMatcher + ?Sized>(&self, matcher: &M) -> MapResult<&MapEntry>
    {
        self.globals()
            .find(|global| matcher.matches_name(global.name()))
            .ok_or_else(|| MapError::not_found("global", matcher.describe()))
    }

    /// Global whose range contains `address`
    ///
    /// ## Errors
    ///
    /// [`MapError::NotFound`] if no global contains `address`.
    pub fn global_at(&self, address: Address) -> MapResult<&MapEntry>
    {
        self.globals()
            .find(|global| global.contains(address))
            .ok_or_else(|| MapError::not_found("global", address.to_string()))
    }

    /// Global starting exactly at `address`
    ///
    /// ## Errors
    ///
    /// [`MapError::NotFound`] if no global starts there.
    pub fn global_starting_at(&self, address: Address) -> MapResult<&MapEntry>
    {
        self.globals()
            .find(|global| global.start() == address)
            .ok_or_else(|| MapError::not_found("global starting at", address.to_string()))
    }

    /// Global whose end is exactly `address`
    ///
    /// ## Errors
    ///
    /// [`MapError::NotFound`] if no global ends there.
    pub fn global_ending_at(&self, address: Address) -> MapResult<&MapEntry>
    {
        self.globals()
            .find(|global| global.end() == Some(address))
            .ok_or_else(|| MapError::not_found("global ending at", address.to_string()))
    }

    /// Globals laid out around `name`, up to `distance` steps each way
    ///
    /// Each step looks for the global ending right before the lowest start
    /// seen so far and the global starting right after the highest end.
    /// Fewer than `2 * distance` entries come back when the walk hits the
    /// edge of the symbol table. Handy when chasing memory overwrites: the
    /// neighbours are the usual suspects.
    ///
    /// ## Errors
    ///
    /// [`MapError::NotFound`] if `name` is not a global.
    pub fn adjacent_globals(&self, name: &str, distance: usize) -> MapResult<Vec<&MapEntry>>
    {
        let target = self.global(name)?;
        let mut lower = Some(target.start());
        let mut upper = target.end();
        let mut found = Vec::new();

        for _ in 0..distance {
            let before = lower
                .and_then(|start| start.checked_sub(1))
                .and_then(|address| self.global_ending_at(address).ok());
            if let Some(before) = before {
                found.push(before);
                lower = Some(before.start());
            }

            let after = upper
                .and_then(|end| end.checked_add(1))
                .and_then(|address| self.global_starting_at(address).ok());
            if let Some(after) = after {
                found.push(after);
                upper = after.end();
            }
        }
        Ok(found)
    }

    /// Fraction of the containing memory region that `entry` occupies
    ///
    /// Entries without a positive size give `0.0`. A region of size zero
    /// gives `1.0` rather than dividing by zero; such a region contains no
    /// address, so it is matched on its origin instead.
    ///
    /// ## Errors
    ///
    /// [`MapError::NotFound`] if `entry` has a size but starts outside every
    /// memory region.
    #[allow(clippy::cast_precision_loss)]
    pub fn size_percent(&self, entry: &MapEntry) -> MapResult<f64>
    {
        let Some(size) = entry.size().filter(|size| *size > 0) else {
            return Ok(0.0);
        };
        let memory = match self.memory_of(entry) {
            Ok(memory) => memory,
            Err(err) => {
                let empty = self
                    .memories()
                    .find(|memory| memory.size() == Some(0) && memory.start() == entry.start());
                empty.ok_or(err)?
            }
        };
        match memory.size() {
            Some(total) if total > 0 => Ok(size as f64 / total as f64),
            _ => Ok(1.0),
        }
    }
}
