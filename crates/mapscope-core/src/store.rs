//! Append-only entry storage.
//!
//! Entries are only ever pushed. The one permitted mutation, trimming a
//! global's size once its successor is known, goes through
//! [`EntryStore::end_before`] and is only reachable from the parser.

use crate::types::{Address, EntryId, EntryKind, MapEntry};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct EntryStore
{
    entries: Vec<MapEntry>,
}

impl EntryStore
{
    pub(crate) fn push(&mut self, entry: MapEntry) -> EntryId
    {
        self.entries.push(entry);
        EntryId(self.entries.len() - 1)
    }

    pub(crate) fn get(&self, id: EntryId) -> Option<&MapEntry>
    {
        self.entries.get(id.index())
    }

    /// Backfill: end the entry `id` right before `successor_start`.
    pub(crate) fn end_before(&mut self, id: EntryId, successor_start: Address)
    {
        if let Some(entry) = self.entries.get_mut(id.index()) {
            entry.end_before(successor_start);
        }
    }

    pub(crate) fn as_slice(&self) -> &[MapEntry]
    {
        &self.entries
    }

    pub(crate) fn of_kind(&self, kind: EntryKind) -> impl Iterator<Item = &MapEntry> + '_
    {
        self.entries.iter().filter(move |entry| entry.kind() == kind)
    }
}
