// src/repositories/progress_repository.rs
//
// Progress record persistence
//
// CRITICAL RULES:
// - One JSON document per ContentKey
// - No threshold logic, no debounce (that is the tracker's job)

use std::sync::Arc;

use crate::domain::{ContentKey, ProgressRecord};
use crate::error::AppResult;
use crate::repositories::key_value_store::KeyValueStore;
use crate::repositories::storage_keys::StorageKeys;

#[cfg_attr(test, mockall::automock)]
pub trait ProgressRepository: Send + Sync {
    fn get(&self, key: &ContentKey) -> AppResult<Option<ProgressRecord>>;
    fn save(&self, record: &ProgressRecord) -> AppResult<()>;
    fn delete(&self, key: &ContentKey) -> AppResult<()>;
}

pub struct KvProgressRepository {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl KvProgressRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self { store, keys }
    }
}

impl ProgressRepository for KvProgressRepository {
    fn get(&self, key: &ContentKey) -> AppResult<Option<ProgressRecord>> {
        match self.store.get(&self.keys.progress(key))? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, record: &ProgressRecord) -> AppResult<()> {
        let raw = serde_json::to_string(record)?;
        self.store.set(&self.keys.progress(&record.key()), &raw)
    }

    fn delete(&self, key: &ContentKey) -> AppResult<()> {
        self.store.remove(&self.keys.progress(key))
    }
}
