// src/services/resume_service.rs
//
// Resume Service - answers "offer to resume?" for a ContentKey
//
// Read-only. Any storage problem means "start from the beginning".

use std::sync::Arc;

use log::debug;

use crate::domain::{
    decide_resume, validate_progress_record, ContentKey, ProgressRecord, ResumeDecision,
    WatchThresholds,
};
use crate::repositories::ProgressRepository;

pub struct ResumeService {
    progress_repo: Arc<dyn ProgressRepository>,
    thresholds: WatchThresholds,
}

impl ResumeService {
    pub fn new(progress_repo: Arc<dyn ProgressRepository>, thresholds: WatchThresholds) -> Self {
        Self {
            progress_repo,
            thresholds,
        }
    }

    pub fn decide(&self, key: &ContentKey) -> ResumeDecision {
        decide_resume(self.saved_progress(key).as_ref(), &self.thresholds)
    }

    /// Stored record for `key`, if it is readable and sane.
    pub fn saved_progress(&self, key: &ContentKey) -> Option<ProgressRecord> {
        let record = match self.progress_repo.get(key) {
            Ok(record) => record?,
            Err(e) => {
                debug!("Saved progress for {} unreadable: {}", key, e);
                return None;
            }
        };
        match validate_progress_record(&record) {
            Ok(()) => Some(record),
            Err(e) => {
                debug!("Ignoring saved progress for {}: {}", key, e);
                None
            }
        }
    }
}
