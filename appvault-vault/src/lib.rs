//! Password vault with at-rest obfuscation.
//!
//! Secrets are kept in plaintext in memory and passed through the
//! [`ObfuscationCodec`] whenever the collection is written. Every save
//! re-encodes the whole collection, so entries stored before the codec
//! existed are upgraded the first time anything in the vault changes.
//!
//! The lock gate in front of the vault accepts one fixed passphrase (or an
//! empty one). It is a UI affordance only and provides no confidentiality:
//! the stored data can be read by anyone with the program.

use appvault_crypto::{CryptoError, ObfuscationCodec};
use appvault_storage::{
    filter_records, EntityStore, KeyValueStore, RecordQuery, StorageError,
};
use appvault_types::{
    new_record_id, Clock, CreatePasswordRequest, PasswordCategory, PasswordEntry, RecordKind,
    UpdatePasswordRequest, ValidationError,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

// ============================================================================
// Error types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("vault is locked")]
    Locked,
    #[error("incorrect master key")]
    InvalidPassphrase,
    #[error("password entry not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),
}

pub type VaultResult<T> = Result<T, VaultError>;

/// The passphrase the lock gate accepts besides an empty one.
pub const MASTER_PASSPHRASE: &str = "vault123";

// ============================================================================
// PasswordVault
// ============================================================================

/// Password entries behind the lock gate.
pub struct PasswordVault {
    store: EntityStore<PasswordEntry>,
    codec: ObfuscationCodec,
    clock: Arc<dyn Clock>,
    unlocked: AtomicBool,
}

impl PasswordVault {
    /// Opens the vault. It starts unlocked when no entries are stored.
    pub fn open(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let store = EntityStore::new(kv);
        let unlocked = store.is_empty();
        Self {
            store,
            codec: ObfuscationCodec::new(),
            clock,
            unlocked: AtomicBool::new(unlocked),
        }
    }

    /// Whether the gate must be passed before entries can be shown.
    pub fn requires_unlock(&self) -> bool {
        !self.store.is_empty()
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked.load(Ordering::SeqCst)
    }

    /// Opens the gate for [`MASTER_PASSPHRASE`] or an empty passphrase.
    pub fn unlock(&self, passphrase: &str) -> VaultResult<()> {
        if passphrase.is_empty() || passphrase == MASTER_PASSPHRASE {
            self.unlocked.store(true, Ordering::SeqCst);
            info!("password vault unlocked");
            Ok(())
        } else {
            warn!("password vault unlock rejected");
            Err(VaultError::InvalidPassphrase)
        }
    }

    pub fn lock(&self) {
        self.unlocked.store(false, Ordering::SeqCst);
    }

    fn ensure_unlocked(&self) -> VaultResult<()> {
        if self.is_unlocked() {
            Ok(())
        } else {
            Err(VaultError::Locked)
        }
    }

    /// Number of stored entries. Available while locked.
    pub fn count(&self) -> usize {
        self.store.len()
    }

    /// Entries as stored, secrets still encoded. Available while locked,
    /// for views that only need counts and timestamps.
    pub fn stored_entries(&self) -> Vec<PasswordEntry> {
        self.store.load_all()
    }

    /// All entries with secrets decoded.
    pub fn list(&self) -> VaultResult<Vec<PasswordEntry>> {
        self.ensure_unlocked()?;
        Ok(self.decode_all(self.store.load_all()))
    }

    pub fn get(&self, id: &str) -> VaultResult<PasswordEntry> {
        self.list()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| VaultError::NotFound(id.to_string()))
    }

    pub fn search(&self, query: &RecordQuery<PasswordCategory>) -> VaultResult<Vec<PasswordEntry>> {
        Ok(filter_records(self.list()?, query))
    }

    pub fn create(&self, request: CreatePasswordRequest) -> VaultResult<PasswordEntry> {
        self.ensure_unlocked()?;
        request.validate()?;
        let entry = request.into_entry(new_record_id(), self.clock.now());

        let mut entries = self.load_decoded()?;
        if entries.iter().any(|e| e.id == entry.id) {
            return Err(StorageError::DuplicateId {
                kind: RecordKind::Password,
                id: entry.id,
            }
            .into());
        }
        entries.push(entry.clone());
        self.save_encoded(&entries)?;
        info!(entry_id = %entry.id, "Password saved");
        Ok(entry)
    }

    /// Updates submitted fields; id and creation time are kept.
    pub fn update(&self, id: &str, request: UpdatePasswordRequest) -> VaultResult<PasswordEntry> {
        self.ensure_unlocked()?;
        request.validate()?;

        let mut entries = self.load_decoded()?;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| VaultError::NotFound(id.to_string()))?;
        request.apply(entry);
        let updated = entry.clone();

        self.save_encoded(&entries)?;
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> VaultResult<PasswordEntry> {
        self.ensure_unlocked()?;
        let mut entries = self.load_decoded()?;
        let index = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| VaultError::NotFound(id.to_string()))?;
        let removed = entries.remove(index);
        self.save_encoded(&entries)?;
        info!(entry_id = %id, "Password deleted");
        Ok(removed)
    }

    fn load_decoded(&self) -> VaultResult<Vec<PasswordEntry>> {
        Ok(self.decode_all(self.store.try_load_all()?))
    }

    fn decode_all(&self, entries: Vec<PasswordEntry>) -> Vec<PasswordEntry> {
        entries
            .into_iter()
            .map(|mut e| {
                e.secret = self.codec.decode(&e.secret);
                e
            })
            .collect()
    }

    fn save_encoded(&self, entries: &[PasswordEntry]) -> VaultResult<()> {
        let encoded = entries
            .iter()
            .map(|e| {
                let mut stored = e.clone();
                stored.secret = self.codec.encode(&e.secret)?;
                Ok(stored)
            })
            .collect::<VaultResult<Vec<_>>>()?;
        self.store.save_all(&encoded)?;
        Ok(())
    }
}
