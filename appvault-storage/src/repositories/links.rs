use crate::entity_store::EntityStore;
use crate::error::StorageResult;
use crate::kv::KeyValueStore;
use crate::search::{filter_records, RecordQuery};
use appvault_types::{
    new_record_id, Clock, CreateLinkRequest, Link, LinkCategory, UpdateLinkRequest,
};
use std::sync::Arc;
use tracing::info;

/// Saved bookmarks.
#[derive(Clone)]
pub struct LinkRepository {
    store: EntityStore<Link>,
    clock: Arc<dyn Clock>,
}

impl LinkRepository {
    pub fn new(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: EntityStore::new(kv),
            clock,
        }
    }

    pub fn list(&self) -> Vec<Link> {
        self.store.load_all()
    }

    pub fn get(&self, id: &str) -> Option<Link> {
        self.store.get(id)
    }

    pub fn create(&self, request: CreateLinkRequest) -> StorageResult<Link> {
        request.validate()?;
        let link = request.into_link(new_record_id(), self.clock.now());
        let link = self.store.add(link)?;
        info!(link_id = %link.id, url = %link.url, "Link saved");
        Ok(link)
    }

    pub fn update(&self, id: &str, request: UpdateLinkRequest) -> StorageResult<Link> {
        request.validate()?;
        self.store.update(id, |link| request.apply(link))
    }

    pub fn delete(&self, id: &str) -> StorageResult<Link> {
        let removed = self.store.delete(id)?;
        info!(link_id = %id, "Link deleted");
        Ok(removed)
    }

    pub fn search(&self, query: &RecordQuery<LinkCategory>) -> Vec<Link> {
        filter_records(self.list(), query)
    }
}
