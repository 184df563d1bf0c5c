// src/services/preferences_service.rs
//
// Preferences Service - UI flags persisted next to progress data

use std::sync::Arc;

use log::{debug, warn};

use crate::repositories::PreferencesRepository;

pub struct PreferencesService {
    repo: Arc<dyn PreferencesRepository>,
}

impl PreferencesService {
    pub fn new(repo: Arc<dyn PreferencesRepository>) -> Self {
        Self { repo }
    }

    /// Hero trailer starts unmuted until the user says otherwise.
    pub fn hero_muted(&self) -> bool {
        match self.repo.hero_muted() {
            Ok(muted) => muted.unwrap_or(false),
            Err(e) => {
                debug!("heroMuted unreadable, using default: {}", e);
                false
            }
        }
    }

    pub fn set_hero_muted(&self, muted: bool) {
        if let Err(e) = self.repo.set_hero_muted(muted) {
            warn!("Failed to store heroMuted: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{KeyValueStore, KvPreferencesRepository, MemoryKeyValueStore, StorageKeys};

    #[test]
    fn test_default_and_persisted_value() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let service = PreferencesService::new(Arc::new(KvPreferencesRepository::new(
            store.clone(),
            StorageKeys::default(),
        )));

        assert!(!service.hero_muted());
        service.set_hero_muted(true);
        assert!(service.hero_muted());
        assert_eq!(store.get("app:heroMuted").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_garbage_reads_as_default() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set("app:heroMuted", "{").unwrap();
        let service = PreferencesService::new(Arc::new(KvPreferencesRepository::new(
            store,
            StorageKeys::default(),
        )));

        assert!(!service.hero_muted());
    }
}
