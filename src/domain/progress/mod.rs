pub mod entity;
pub mod invariants;

pub use entity::{progress_percent, ProgressRecord, WatchThresholds};
pub use invariants::validate_progress_record;
