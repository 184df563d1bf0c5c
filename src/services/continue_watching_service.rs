// src/services/continue_watching_service.rs
//
// Continue Watching Service - owns the bounded ledger
//
// CRITICAL RULES:
// - Every change is a read-modify-write of the whole list, under ledger_lock
// - ContinueWatchingUpdated is emitted after ledger_lock is released
// - Storage failures are logged and swallowed; the UI just sees an empty row
// - Emits ContinueWatchingUpdated after every change that reached storage

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use log::{debug, warn};

use crate::domain::{remove_entry, upsert_entry, ContentKey, ContinueWatchingEntry};
use crate::events::{ContinueWatchingUpdated, EventBus, ProgressForgotten};
use crate::repositories::ContinueWatchingRepository;

pub struct ContinueWatchingService {
    repo: Arc<dyn ContinueWatchingRepository>,
    event_bus: Arc<EventBus>,
    capacity: usize,
    ledger_lock: Mutex<()>,
}

impl ContinueWatchingService {
    pub fn new(
        repo: Arc<dyn ContinueWatchingRepository>,
        event_bus: Arc<EventBus>,
        capacity: usize,
    ) -> Self {
        Self {
            repo,
            event_bus,
            capacity,
            ledger_lock: Mutex::new(()),
        }
    }

    /// Most recent first. Unreadable storage reads as an empty list.
    pub fn list(&self) -> Vec<ContinueWatchingEntry> {
        match self.repo.load() {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Continue-watching list unreadable, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Moves `entry` to the front. Returns whether the new list was stored.
    pub fn upsert(&self, entry: ContinueWatchingEntry) -> bool {
        let key = entry.key();
        let stored = {
            let _guard = self.lock_ledger();
            let entries = upsert_entry(self.list(), entry, self.capacity);
            self.store(&entries, &key).then_some(entries.len())
        };
        self.notify(stored)
    }

    /// Drops `key` from the list. Returns whether anything was removed and stored.
    pub fn remove(&self, key: &ContentKey) -> bool {
        let stored = {
            let _guard = self.lock_ledger();
            let (entries, removed) = remove_entry(self.list(), key);
            if !removed {
                return false;
            }
            self.store(&entries, key).then_some(entries.len())
        };
        self.notify(stored)
    }

    fn lock_ledger(&self) -> MutexGuard<'_, ()> {
        self.ledger_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn store(&self, entries: &[ContinueWatchingEntry], key: &ContentKey) -> bool {
        match self.repo.save(entries) {
            Ok(()) => {
                debug!("Continue-watching updated for {} ({} entries)", key, entries.len());
                true
            }
            Err(e) => {
                warn!("Failed to store continue-watching list: {}", e);
                false
            }
        }
    }

    fn notify(&self, stored: Option<usize>) -> bool {
        match stored {
            Some(entry_count) => {
                self.event_bus.emit(ContinueWatchingUpdated::new(entry_count));
                true
            }
            None => false,
        }
    }

    /// Forgotten progress leaves the ledger too.
    pub fn register_event_handlers(self: &Arc<Self>) {
        let service: Weak<Self> = Arc::downgrade(self);
        self.event_bus.subscribe::<ProgressForgotten, _>(move |event| {
            if let Some(service) = service.upgrade() {
                service.remove(&event.content_key);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContentRef, MediaMeta, ProgressRecord, DEFAULT_LEDGER_CAPACITY};
    use crate::error::AppError;
    use crate::repositories::continue_watching_repository::MockContinueWatchingRepository;
    use crate::repositories::{KvContinueWatchingRepository, MemoryKeyValueStore, StorageKeys};
    use crate::repositories::KeyValueStore;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn entry(id: u64, percent: f64) -> ContinueWatchingEntry {
        let record = ProgressRecord::new(ContentRef::movie(id), percent * 10.0, 1000.0, Utc::now());
        ContinueWatchingEntry::from_record(&record, &MediaMeta::default())
    }

    fn service() -> (Arc<MemoryKeyValueStore>, Arc<EventBus>, Arc<ContinueWatchingService>) {
        let store = Arc::new(MemoryKeyValueStore::new());
        let bus = Arc::new(EventBus::new());
        let repo = Arc::new(KvContinueWatchingRepository::new(
            store.clone(),
            StorageKeys::default(),
        ));
        let service = Arc::new(ContinueWatchingService::new(
            repo,
            Arc::clone(&bus),
            DEFAULT_LEDGER_CAPACITY,
        ));
        (store, bus, service)
    }

    #[test]
    fn test_upsert_emits_refresh_signal() {
        let (_, bus, service) = service();
        let refreshes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&refreshes);
        bus.subscribe::<ContinueWatchingUpdated, _>(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(service.upsert(entry(1, 20.0)));
        assert!(service.upsert(entry(2, 20.0)));

        assert_eq!(refreshes.load(Ordering::SeqCst), 2);
        let ids: Vec<String> = service.list().iter().map(|e| e.content.id().to_string()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn test_cap_holds_through_service() {
        let (_, _, service) = service();
        for id in 1..=25 {
            service.upsert(entry(id, 30.0));
        }
        let list = service.list();
        assert_eq!(list.len(), 20);
        assert_eq!(list[0].content.id().as_str(), "25");
        assert_eq!(list[19].content.id().as_str(), "6");
    }

    #[test]
    fn test_remove_missing_key_does_not_write() {
        let (store, _, service) = service();
        service.upsert(entry(1, 20.0));
        let writes = store.write_count();

        assert!(!service.remove(&ContentRef::movie(99u64).key()));
        assert_eq!(store.write_count(), writes);

        assert!(service.remove(&ContentRef::movie(1u64).key()));
        assert!(service.list().is_empty());
    }

    #[test]
    fn test_corrupt_list_reads_empty_and_is_replaced() {
        let (store, _, service) = service();
        store.set("app:continueWatching", "{corrupt").unwrap();

        assert!(service.list().is_empty());

        service.upsert(entry(3, 40.0));
        assert_eq!(service.list().len(), 1);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let mut repo = MockContinueWatchingRepository::new();
        repo.expect_load().returning(|| Ok(Vec::new()));
        repo.expect_save()
            .times(1)
            .returning(|_| Err(AppError::Other("disk full".to_string())));
        let bus = Arc::new(EventBus::new());
        let service = ContinueWatchingService::new(Arc::new(repo), Arc::clone(&bus), 20);

        assert!(!service.upsert(entry(1, 50.0)));
        assert!(bus.get_event_log().is_empty());
    }

    #[test]
    fn test_concurrent_upserts_keep_every_entry() {
        let (_, _, service) = service();

        let workers: Vec<_> = (1..=8u64)
            .map(|id| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        service.upsert(entry(id, 30.0));
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(service.list().len(), 8);
    }

    #[test]
    fn test_refresh_handler_can_read_ledger() {
        let (_, bus, service) = service();
        let seen = Arc::new(AtomicUsize::new(0));
        let reader = Arc::clone(&service);
        let counter = Arc::clone(&seen);
        bus.subscribe::<ContinueWatchingUpdated, _>(move |_| {
            counter.store(reader.list().len(), Ordering::SeqCst);
            reader.remove(&ContentRef::movie(99u64).key());
        });

        service.upsert(entry(1, 20.0));

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_forgotten_progress_leaves_ledger() {
        let (_, bus, service) = service();
        service.register_event_handlers();
        service.upsert(entry(1, 20.0));
        service.upsert(entry(2, 20.0));

        bus.emit(ProgressForgotten::new(ContentRef::movie(1u64).key()));

        let list = service.list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].content.id().as_str(), "2");
    }
}
