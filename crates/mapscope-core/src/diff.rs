//! # Map Comparison
//!
//! Compares the globals of two builds by name, e.g. to find out why a
//! symbol moved between a working and a broken firmware image.

use std::collections::HashMap;
use std::fmt;

use crate::map::MemoryMap;
use crate::types::MapEntry;

/// How a global differs between two maps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifferenceKind
{
    /// Only the other (right) map has this global
    OnlyRight,
    /// Both maps have it, at different addresses
    LocationDifferent,
    /// Both maps have it, with different sizes
    SizeDifferent,
    /// Only this (left) map has this global
    OnlyLeft,
}

impl fmt::Display for DifferenceKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let label = match self {
            DifferenceKind::OnlyRight => "Only right",
            DifferenceKind::LocationDifferent => "Location different",
            DifferenceKind::SizeDifferent => "Size different",
            DifferenceKind::OnlyLeft => "Only left",
        };
        write!(f, "{label}")
    }
}

/// One difference reported by [`MemoryMap::differences`]
///
/// `left` is set for everything except `OnlyRight`, `right` for everything
/// except `OnlyLeft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difference<'a>
{
    pub kind: DifferenceKind,
    pub left: Option<&'a MapEntry>,
    pub right: Option<&'a MapEntry>,
}

impl Difference<'_>
{
    /// Name of the global this difference is about
    pub fn name(&self) -> &str
    {
        self.left.or(self.right).map_or("", MapEntry::name)
    }
}

struct OptSize(Option<u64>);

impl fmt::Display for OptSize
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self.0 {
            Some(size) => write!(f, "{size}"),
            None => write!(f, "unknown"),
        }
    }
}

impl fmt::Display for Difference<'_>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{} {}", self.name(), self.kind)?;
        if let (Some(left), Some(right)) = (self.left, self.right) {
            match self.kind {
                DifferenceKind::LocationDifferent => write!(f, " ({} != {})", left.start(), right.start())?,
                DifferenceKind::SizeDifferent => {
                    write!(f, " ({} != {})", OptSize(left.size()), OptSize(right.size()))?;
                }
                DifferenceKind::OnlyLeft | DifferenceKind::OnlyRight => {}
            }
        }
        Ok(())
    }
}

impl MemoryMap
{
    /// Compare the globals of `self` (left) against `other` (right)
    ///
    /// Globals are keyed by name; when a name repeats, the last one parsed
    /// on the left is the one compared. Right-hand globals are visited in
    /// order, producing `OnlyRight`, or `LocationDifferent` and/or
    /// `SizeDifferent`. Left-hand names that were never matched follow as
    /// `OnlyLeft`, in the order they first appeared.
    pub fn differences<'a>(&'a self, other: &'a MemoryMap) -> Vec<Difference<'a>>
    {
        let mut order: Vec<&str> = Vec::new();
        let mut by_name: HashMap<&str, &MapEntry> = HashMap::new();
        for global in self.globals() {
            if by_name.insert(global.name(), global).is_none() {
                order.push(global.name());
            }
        }

        let mut differences = Vec::new();
        for right in other.globals() {
            let Some(left) = by_name.remove(right.name()) else {
                differences.push(Difference {
                    kind: DifferenceKind::OnlyRight,
                    left: None,
                    right: Some(right),
                });
                continue;
            };
            if left.start() != right.start() {
                differences.push(Difference {
                    kind: DifferenceKind::LocationDifferent,
                    left: Some(left),
                    right: Some(right),
                });
            }
            if left.size() != right.size() {
                differences.push(Difference {
                    kind: DifferenceKind::SizeDifferent,
                    left: Some(left),
                    right: Some(right),
                });
            }
        }

        differences.extend(order.into_iter().filter_map(|name| by_name.get(name)).map(|&entry| Difference {
            kind: DifferenceKind::OnlyLeft,
            left: Some(entry),
            right: None,
        }));
        differences
    }

    /// [`MemoryMap::differences`] rendered as a report
    pub fn differences_str(&self, other: &MemoryMap) -> String
    {
        let mut lines = vec!["Differences:".to_string()];
        lines.extend(self.differences(other).iter().map(|difference| format!(" {difference}")));
        lines.join("\n")
    }
}
