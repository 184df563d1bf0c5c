// src/services/progress_tracker.rs
//
// Progress Tracker - debounced writer of progress records
//
// CRITICAL RULES:
// - The ONLY component that writes progress keys
// - Changes under the significance delta never create or reset a timer
// - One pending write per ContentKey; a newer report replaces it
// - Closing the player does NOT cancel pending writes
// - persist and forget for one key never overlap (key_locks); a write
//   scheduled before a forget is discarded
// - Storage failures are logged, never propagated
//
// Must be used from inside a tokio runtime (timers are spawned tasks).

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use log::{debug, info, warn};
use tokio::task::JoinHandle;

use crate::config::TrackerConfig;
use crate::domain::{
    progress_percent, ContentKey, ContentRef, ContinueWatchingEntry, MediaMeta, ProgressRecord,
};
use crate::events::{EventBus, ProgressForgotten, ProgressPersisted};
use crate::repositories::ProgressRepository;
use crate::services::continue_watching_service::ContinueWatchingService;

/// What `record_progress` did with a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Within the significance delta of the last persisted value
    Ignored,
    /// A write is pending for the key (new or replacing an older one)
    Scheduled,
}

struct PendingWrite {
    generation: u64,
    content: ContentRef,
    current_time: f64,
    duration: f64,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct TrackerSession {
    last_persisted: HashMap<ContentKey, f64>,
    pending: HashMap<ContentKey, PendingWrite>,
    metadata: HashMap<ContentKey, MediaMeta>,
    /// Last generation handed out before the key was forgotten
    forgotten: HashMap<ContentKey, u64>,
    next_generation: u64,
}

impl TrackerSession {
    fn is_forgotten(&self, key: &ContentKey, generation: u64) -> bool {
        self.forgotten
            .get(key)
            .is_some_and(|forgotten_at| generation <= *forgotten_at)
    }
}

struct TrackerInner {
    progress_repo: Arc<dyn ProgressRepository>,
    continue_watching: Arc<ContinueWatchingService>,
    event_bus: Arc<EventBus>,
    config: TrackerConfig,
    session: Mutex<TrackerSession>,
    key_locks: Mutex<HashMap<ContentKey, Arc<Mutex<()>>>>,
}

/// Cheap to clone; clones share one session.
#[derive(Clone)]
pub struct ProgressTracker {
    inner: Arc<TrackerInner>,
}

impl ProgressTracker {
    pub fn new(
        progress_repo: Arc<dyn ProgressRepository>,
        continue_watching: Arc<ContinueWatchingService>,
        event_bus: Arc<EventBus>,
        config: TrackerConfig,
    ) -> Self {
        Self {
            inner: Arc::new(TrackerInner {
                progress_repo,
                continue_watching,
                event_bus,
                config,
                session: Mutex::new(TrackerSession::default()),
                key_locks: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Reports a playback position. Significant changes (re)start the
    /// per-key debounce timer; everything else is dropped on the floor.
    pub fn record_progress(
        &self,
        content: &ContentRef,
        current_time: f64,
        duration: f64,
    ) -> RecordOutcome {
        let key = content.key();
        let percent = progress_percent(current_time, duration);
        let mut session = self.inner.session();

        let last = session.last_persisted.get(&key).copied().unwrap_or(0.0);
        if (percent - last).abs() < self.inner.config.significant_delta_percent {
            debug!(
                "Progress for {} at {:.2}% not significant (last persisted {:.2}%)",
                key, percent, last
            );
            return RecordOutcome::Ignored;
        }

        session.next_generation += 1;
        let generation = session.next_generation;

        let inner = Arc::clone(&self.inner);
        let task_key = key.clone();
        let delay = self.inner.config.debounce();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            inner.commit(&task_key, generation);
        });

        let pending = PendingWrite {
            generation,
            content: content.clone(),
            current_time,
            duration,
            handle,
        };
        if let Some(previous) = session.pending.insert(key, pending) {
            previous.handle.abort();
        }

        RecordOutcome::Scheduled
    }

    /// Display metadata used when the key enters the continue-watching list.
    pub fn remember_metadata(&self, key: ContentKey, meta: MediaMeta) {
        self.inner.session().metadata.insert(key, meta);
    }

    /// Writes every pending report now instead of waiting for its timer.
    pub fn flush(&self) {
        let pending: Vec<(ContentKey, PendingWrite)> =
            self.inner.session().pending.drain().collect();

        if !pending.is_empty() {
            info!("Flushing {} pending progress write(s)", pending.len());
        }
        for (key, write) in pending {
            write.handle.abort();
            self.inner.persist(key, write);
        }
    }

    /// Drops everything known about `key`: the pending write, the stored
    /// record and (through ProgressForgotten) the continue-watching entry.
    pub fn forget(&self, key: &ContentKey) {
        let key_lock = self.inner.key_lock(key);
        let _guard = key_lock.lock().unwrap_or_else(PoisonError::into_inner);
        {
            let mut session = self.inner.session();
            if let Some(pending) = session.pending.remove(key) {
                pending.handle.abort();
            }
            session.last_persisted.remove(key);
            let forgotten_at = session.next_generation;
            session.forgotten.insert(key.clone(), forgotten_at);
        }

        if let Err(e) = self.inner.progress_repo.delete(key) {
            warn!("Failed to delete progress for {}: {}", key, e);
        }
        info!("Progress forgotten for {}", key);
        // Ledger removal must land before a later write for this key.
        self.inner.event_bus.emit(ProgressForgotten::new(key.clone()));
    }

    pub fn pending_count(&self) -> usize {
        self.inner.session().pending.len()
    }

    pub fn last_persisted_percent(&self, key: &ContentKey) -> Option<f64> {
        self.inner.session().last_persisted.get(key).copied()
    }
}

impl TrackerInner {
    fn session(&self) -> MutexGuard<'_, TrackerSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn key_lock(&self, key: &ContentKey) -> Arc<Mutex<()>> {
        let mut locks = self.key_locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(key.clone()).or_default())
    }

    /// Timer callback. Stale generations (replaced or flushed) are no-ops.
    fn commit(&self, key: &ContentKey, generation: u64) {
        let write = {
            let mut session = self.session();
            match session.pending.get(key) {
                Some(pending) if pending.generation == generation => session.pending.remove(key),
                _ => None,
            }
        };
        if let Some(write) = write {
            self.persist(key.clone(), write);
        }
    }

    fn persist(&self, key: ContentKey, write: PendingWrite) {
        let key_lock = self.key_lock(&key);
        let persisted = {
            let _guard = key_lock.lock().unwrap_or_else(PoisonError::into_inner);
            if self.session().is_forgotten(&key, write.generation) {
                debug!("Dropping write for {}: forgotten after it was scheduled", key);
                return;
            }
            self.write_record(&key, write)
        };

        if let Some(record) = persisted {
            self.event_bus.emit(ProgressPersisted::new(
                key,
                record.current_time,
                record.progress,
            ));
        }
    }

    /// Stores the record and updates the ledger. Caller holds the key lock.
    fn write_record(&self, key: &ContentKey, write: PendingWrite) -> Option<ProgressRecord> {
        let record = ProgressRecord::new(write.content, write.current_time, write.duration, Utc::now());

        if let Err(e) = self.progress_repo.save(&record) {
            warn!("Failed to save progress for {}: {}", key, e);
            return None;
        }

        let meta = {
            let mut session = self.session();
            session.last_persisted.insert(key.clone(), record.progress);
            session.metadata.get(key).cloned().unwrap_or_default()
        };

        info!(
            "Progress saved for {}: {:.0}s ({:.1}%)",
            key, record.current_time, record.progress
        );

        let thresholds = self.config.thresholds();
        if thresholds.is_in_progress(record.progress) {
            self.continue_watching
                .upsert(ContinueWatchingEntry::from_record(&record, &meta));
        } else if thresholds.is_finished(record.progress) {
            self.continue_watching.remove(key);
        }

        Some(record)
    }
}
