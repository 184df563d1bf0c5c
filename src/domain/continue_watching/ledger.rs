use super::entity::ContinueWatchingEntry;
use crate::domain::content::ContentKey;

pub const DEFAULT_LEDGER_CAPACITY: usize = 20;

/// Moves/inserts `entry` to the front, dropping any element with the same key,
/// then truncates to `capacity`.
pub fn upsert_entry(
    mut entries: Vec<ContinueWatchingEntry>,
    entry: ContinueWatchingEntry,
    capacity: usize,
) -> Vec<ContinueWatchingEntry> {
    let key = entry.key();
    entries.retain(|existing| existing.key() != key);
    entries.insert(0, entry);
    entries.truncate(capacity);
    entries
}

/// Returns the list without `key` and whether anything was removed.
pub fn remove_entry(
    mut entries: Vec<ContinueWatchingEntry>,
    key: &ContentKey,
) -> (Vec<ContinueWatchingEntry>, bool) {
    let before = entries.len();
    entries.retain(|existing| &existing.key() != key);
    let removed = entries.len() != before;
    (entries, removed)
}
