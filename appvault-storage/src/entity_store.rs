//! Generic entity store: one collection serialized as a JSON array under one key.
//!
//! Every mutation is load all, transform in memory, save all. The store is
//! never patched incrementally; a failed save leaves the previous value in
//! place because the underlying key-value set replaces a single key whole.

use crate::error::{StorageError, StorageResult};
use crate::kv::KeyValueStore;
use appvault_types::Record;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

/// Load-all / save-all collection of `T` records under one key.
pub struct EntityStore<T> {
    kv: Arc<dyn KeyValueStore>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for EntityStore<T> {
    fn clone(&self) -> Self {
        Self {
            kv: Arc::clone(&self.kv),
            key: self.key,
            _marker: PhantomData,
        }
    }
}

impl<T: Record> EntityStore<T> {
    /// Opens a store over `kv` under the kind's standard key.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(kv, crate::keys::collection_key(T::KIND))
    }

    /// Opens a store over `kv` under an explicit key.
    pub fn with_key(kv: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            kv,
            key,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// All records, in stored order.
    ///
    /// Absent, unreadable or malformed values all load as an empty list so
    /// a corrupted collection never blocks a view from rendering.
    pub fn load_all(&self) -> Vec<T> {
        match self.try_load_all() {
            Ok(records) => records,
            Err(e) => {
                warn!(key = self.key, "failed to read collection: {e}");
                Vec::new()
            }
        }
    }

    /// Like [`load_all`](Self::load_all), but read failures are returned.
    ///
    /// Mutations use this so an I/O error never leads to overwriting the
    /// stored collection with a partial one. Malformed text still counts as
    /// empty.
    pub fn try_load_all(&self) -> StorageResult<Vec<T>> {
        let Some(text) = self.kv.get(self.key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<T>>(&text) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(key = self.key, "malformed collection treated as empty: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Replaces the stored collection with `records`.
    pub fn save_all(&self, records: &[T]) -> StorageResult<()> {
        let text = serde_json::to_string(records)?;
        self.kv.set(self.key, &text)?;
        debug!(key = self.key, count = records.len(), "saved collection");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.load_all().into_iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.load_all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a record. Its id must not already be present.
    pub fn add(&self, record: T) -> StorageResult<T> {
        let mut records = self.try_load_all()?;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(StorageError::DuplicateId {
                kind: T::KIND,
                id: record.id().to_string(),
            });
        }
        records.push(record.clone());
        self.save_all(&records)?;
        Ok(record)
    }

    /// Applies `edit` to the record with `id` and saves the collection.
    ///
    /// The edit may change any field except the id and creation time.
    pub fn update<F>(&self, id: &str, edit: F) -> StorageResult<T>
    where
        F: FnOnce(&mut T),
    {
        let mut records = self.try_load_all()?;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| StorageError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })?;

        let created_at = record.created_at();
        edit(record);
        if record.id() != id || record.created_at() != created_at {
            return Err(StorageError::IdentityChanged {
                kind: T::KIND,
                id: id.to_string(),
            });
        }

        let updated = record.clone();
        self.save_all(&records)?;
        Ok(updated)
    }

    /// Replaces the stored record carrying `record`'s id.
    pub fn replace(&self, record: T) -> StorageResult<T> {
        let id = record.id().to_string();
        self.update(&id, |existing| *existing = record)
    }

    /// Removes the record with `id`, returning it.
    pub fn delete(&self, id: &str) -> StorageResult<T> {
        let mut records = self.try_load_all()?;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StorageError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })?;
        let removed = records.remove(index);
        self.save_all(&records)?;
        Ok(removed)
    }
}
