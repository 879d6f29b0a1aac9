//! # Diagnostics
//!
//! Read-only layout checks over a parsed [`MemoryMap`].
//!
//! [`MemoryMap::diagnose`] looks for the usual suspects behind memory
//! corruption in firmware builds:
//!
//! - globals spilling out of their memory region or their module
//! - the same symbol defined by two different modules
//! - globals whose address ranges share bytes
//!
//! All ranges are half-open `[start, end)`. The pairwise checks are O(n²)
//! over the globals.

use std::fmt;

use tracing::warn;

use crate::map::MemoryMap;
use crate::types::MapEntry;

/// Which side of an enclosing range an entry escapes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound
{
    Start,
    End,
}

impl fmt::Display for Bound
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Bound::Start => write!(f, "start"),
            Bound::End => write!(f, "end"),
        }
    }
}

/// One potential problem reported by [`MemoryMap::diagnose`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finding<'a>
{
    /// The global starts outside every declared memory region
    OutsideMemory
    {
        global: &'a MapEntry
    },
    /// The global extends past its memory region
    PastMemory
    {
        global: &'a MapEntry,
        memory: &'a MapEntry,
        bound: Bound,
    },
    /// The global extends past the module it was listed under
    PastModule
    {
        global: &'a MapEntry,
        module: &'a MapEntry,
        bound: Bound,
    },
    /// Two modules both define a global with this name
    Redefinition
    {
        first: &'a MapEntry,
        first_module: &'a MapEntry,
        second: &'a MapEntry,
        second_module: &'a MapEntry,
    },
    /// Two differently named globals share at least one byte
    Overlap
    {
        first: &'a MapEntry,
        second: &'a MapEntry,
    },
}

impl fmt::Display for Finding<'_>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Finding::OutsideMemory { global } => write!(f, "{} outside of every memory region", global.name()),
            Finding::PastMemory { global, memory, bound } => {
                write!(f, "{} past {bound} of memory {}", global.name(), memory.name())
            }
            Finding::PastModule { global, module, bound } => {
                write!(f, "{} past {bound} of module {}", global.name(), module.name())
            }
            Finding::Redefinition {
                first,
                first_module,
                second_module,
                ..
            } => write!(
                f,
                "{} from {} redefined in {}",
                first.name(),
                first_module.name(),
                second_module.name()
            ),
            Finding::Overlap { first, second } => write!(
                f,
                "{}({}) and {}({}) overlap in memory",
                first.name(),
                Span(first),
                second.name(),
                Span(second)
            ),
        }
    }
}

/// `start..end` rendering used in findings.
struct Span<'a>(&'a MapEntry);

impl fmt::Display for Span<'_>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self.0.end() {
            Some(end) => write!(f, "{}..{}", self.0.start(), end),
            None => write!(f, "{}..?", self.0.start()),
        }
    }
}

/// Bounds of `outer` that `inner` crosses.
///
/// An entry of unknown size is treated as ending at its start; an `outer`
/// of unknown size has no end to cross.
fn escapes(inner: &MapEntry, outer: &MapEntry) -> Vec<Bound>
{
    let mut crossed = Vec::new();
    if inner.start() < outer.start() {
        crossed.push(Bound::Start);
    }
    let inner_end = inner.end().unwrap_or(inner.start());
    if outer.end().is_some_and(|outer_end| inner_end > outer_end) {
        crossed.push(Bound::End);
    }
    crossed
}

/// Size of one module and its share of the containing memory region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleUsage<'a>
{
    pub module: &'a MapEntry,
    /// Declared size, 0 when the report gave none
    pub size: u64,
    /// Percentage of the containing region, rounded to one decimal
    pub percent: f64,
}

/// Per-module memory consumption, see [`MemoryMap::stats`]
#[derive(Debug, Clone, PartialEq)]
pub struct MapStats<'a>
{
    pub modules: Vec<ModuleUsage<'a>>,
    pub total_size: u64,
    pub total_percent: f64,
}

impl fmt::Display for MapStats<'_>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        for usage in &self.modules {
            writeln!(f, "{} {} ({:.1}%)", usage.module.name(), usage.size, usage.percent)?;
        }
        writeln!(f, "---------")?;
        write!(f, "TOTAL: {} ({:.1}%)", self.total_size, self.total_percent)
    }
}

impl MemoryMap
{
    /// Scan all globals for layout problems
    ///
    /// Pairwise findings (redefinitions, overlaps) are reported once per
    /// pair, with `first` being the global parsed earlier.
    pub fn diagnose(&self) -> Vec<Finding<'_>>
    {
        let globals: Vec<&MapEntry> = self.globals().collect();
        let mut findings = Vec::new();

        for (index, &global) in globals.iter().enumerate() {
            match self.memory_of(global) {
                Ok(memory) => findings.extend(
                    escapes(global, memory)
                        .into_iter()
                        .map(|bound| Finding::PastMemory { global, memory, bound }),
                ),
                Err(_) => findings.push(Finding::OutsideMemory { global }),
            }

            let module = self.module_of(global);
            if let Some(module) = module {
                findings.extend(
                    escapes(global, module)
                        .into_iter()
                        .map(|bound| Finding::PastModule { global, module, bound }),
                );
            }

            for &other in &globals[index + 1..] {
                if global.name() != other.name() {
                    if global.overlaps(other) {
                        findings.push(Finding::Overlap { first: global, second: other });
                    }
                    continue;
                }
                if let (Some(first_module), Some(second_module)) = (module, self.module_of(other)) {
                    if global.module_id() != other.module_id() {
                        findings.push(Finding::Redefinition {
                            first: global,
                            first_module,
                            second: other,
                            second_module,
                        });
                    }
                }
            }
        }
        findings
    }

    /// [`MemoryMap::diagnose`] rendered as a report, one finding per line
    pub fn diagnose_str(&self) -> String
    {
        let mut lines = vec!["Potential memory issues:".to_string()];
        lines.extend(self.diagnose().iter().map(|finding| format!(" {finding}")));
        lines.join("\n")
    }

    /// Size of every module and its share of its memory region
    ///
    /// Modules without a declared size count as 0 bytes. A module outside
    /// every memory region is counted at 0 % and logged.
    pub fn stats(&self) -> MapStats<'_>
    {
        let mut stats = MapStats {
            modules: Vec::new(),
            total_size: 0,
            total_percent: 0.0,
        };

        for module in self.modules() {
            let fraction = self.size_percent(module).unwrap_or_else(|err| {
                warn!("Module {} not counted against any memory: {err}", module.name());
                0.0
            });
            let percent = (fraction * 1000.0).round() / 10.0;
            let size = module.size().unwrap_or(0);

            stats.total_size = stats.total_size.saturating_add(size);
            stats.total_percent += percent;
            stats.modules.push(ModuleUsage { module, size, percent });
        }
        stats
    }

    /// [`MemoryMap::stats`] rendered as text
    pub fn stats_str(&self) -> String
    {
        self.stats().to_string()
    }
}
