// src/repositories/preferences_repository.rs
//
// Small UI preferences stored next to the progress data.

use std::sync::Arc;

use crate::error::AppResult;
use crate::repositories::key_value_store::KeyValueStore;
use crate::repositories::storage_keys::StorageKeys;

pub trait PreferencesRepository: Send + Sync {
    /// `None` when never set
    fn hero_muted(&self) -> AppResult<Option<bool>>;
    fn set_hero_muted(&self, muted: bool) -> AppResult<()>;
}

pub struct KvPreferencesRepository {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl KvPreferencesRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self { store, keys }
    }
}

impl PreferencesRepository for KvPreferencesRepository {
    fn hero_muted(&self) -> AppResult<Option<bool>> {
        match self.store.get(&self.keys.hero_muted())? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn set_hero_muted(&self, muted: bool) -> AppResult<()> {
        self.store
            .set(&self.keys.hero_muted(), &serde_json::to_string(&muted)?)
    }
}
