//! Key-value storage layer for App Vault.
//!
//! Every entity type lives under one key as a JSON array, rewritten in full
//! on each change. The store behind the keys is an injected
//! [`KeyValueStore`] so the same repositories run over an in-memory map in
//! tests, a directory of JSON files on disk, or a host-provided store.
//!
//! # Architecture
//!
//! - [`EntityStore`] is the generic load-all / transform / save-all
//!   collection over one key
//! - `repositories` wrap an entity store with typed create/update requests,
//!   identifier and timestamp assignment, and search
//! - Malformed persisted text loads as an empty collection; write failures
//!   are returned to the caller with the prior value untouched

mod entity_store;
mod error;
pub mod keys;
mod kv;
mod repositories;
mod search;

pub use entity_store::EntityStore;
pub use error::{StorageError, StorageResult};
pub use kv::{read_json, write_json, FileStore, KeyValueStore, MemoryStore};
pub use repositories::{
    task_status, LinkRepository, PdfRepository, ProfileRepository, TaskFilter, TaskObserver,
    TaskRepository, TaskStatus,
};
pub use search::{filter_records, RecordQuery, Searchable};
