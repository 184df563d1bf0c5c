//! Continue-watching ledger invariants:
//!
//! 1. Ordered most-recently-updated first
//! 2. At most one entry per ContentKey (an update moves the entry to the front)
//! 3. Bounded length; the oldest entries are evicted first
//! 4. Only in-progress items (1% < percent < 95%) are inserted

pub mod entity;
pub mod ledger;

pub use entity::{ContinueWatchingEntry, MediaMeta};
pub use ledger::{remove_entry, upsert_entry, DEFAULT_LEDGER_CAPACITY};
