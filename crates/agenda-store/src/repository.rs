//! Block request repository
//!
//! Owns the canonical request list. The whole list lives as one JSON array
//! under a single key, newest first, and every mutation rewrites it.

use crate::error::RepositoryError;
use crate::storage::KeyValueStore;
use agenda_core::{BlockDraft, BlockRequest, RequestId, RequestStatus};
use chrono::Utc;
use parking_lot::Mutex;

/// Storage key of the request list
pub const STORAGE_KEY: &str = "cesfam_requests_v1";

const MAX_CORRUPT_BACKUPS: usize = 100;

/// Request list persisted in a key-value store
#[derive(Debug)]
pub struct Repository<S> {
    store: S,
    key: String,
    /// Serializes read-modify-write cycles within the process
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> Repository<S> {
    /// Create repository over `store` using [`STORAGE_KEY`]
    #[inline]
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    /// Create repository using a custom key
    #[must_use]
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Backing store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Storage key
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Full snapshot, newest first
    ///
    /// Never fails: a missing, unreadable or corrupt document reads as an
    /// empty list. A corrupt document is copied to a `<key>.corrupt` backup
    /// before being dropped so the next write does not destroy it silently.
    #[must_use]
    pub fn list_all(&self) -> Vec<BlockRequest> {
        self.load().unwrap_or_else(|e| {
            tracing::warn!(key = %self.key, error = %e, "request list unreadable, using empty list");
            Vec::new()
        })
    }

    /// Look up one request
    #[must_use]
    pub fn get(&self, id: &RequestId) -> Option<BlockRequest> {
        self.list_all().into_iter().find(|r| &r.id == id)
    }

    /// Store a new pending request at the front of the list
    ///
    /// # Errors
    /// `RepositoryError::Storage` when the list cannot be read or written,
    /// `RepositoryError::Encode` when it cannot be serialized. A failed read
    /// never overwrites the stored list.
    pub fn create(&self, draft: BlockDraft) -> Result<BlockRequest, RepositoryError> {
        let _guard = self.write_lock.lock();
        let mut requests = self.load()?;

        let mut id = RequestId::generate();
        while requests.iter().any(|r| r.id == id) {
            id = RequestId::generate();
        }

        let request = BlockRequest::from_draft(draft, id, Utc::now().timestamp_millis());
        requests.insert(0, request.clone());
        self.persist(&requests)?;

        tracing::info!(
            id = %request.id,
            professional = %request.professional_name,
            block_type = %request.block_type,
            "created request"
        );
        Ok(request)
    }

    /// Change the status of one request, returning the new snapshot
    ///
    /// Only the `status` field of the matching record changes; order and all
    /// other records are untouched.
    ///
    /// # Errors
    /// - `RepositoryError::NotFound` if no record has `id`; nothing is written
    /// - `RepositoryError::Storage` on read or write failure
    /// - `RepositoryError::Encode` if the list cannot be serialized
    pub fn set_status(
        &self,
        id: &RequestId,
        status: RequestStatus,
    ) -> Result<Vec<BlockRequest>, RepositoryError> {
        let _guard = self.write_lock.lock();
        let mut requests = self.load()?;

        let request = requests
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))?;
        let previous = std::mem::replace(&mut request.status, status);
        self.persist(&requests)?;

        tracing::info!(%id, from = %previous, to = %status, "status changed");
        Ok(requests)
    }

    /// Read the stored list; storage failures propagate, a corrupt
    /// document is quarantined and reads as empty
    fn load(&self) -> Result<Vec<BlockRequest>, RepositoryError> {
        let Some(blob) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<BlockRequest>>(&blob) {
            Ok(requests) => {
                tracing::debug!(count = requests.len(), "loaded requests");
                Ok(requests)
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "request list corrupt, resetting");
                self.quarantine(&blob);
                Ok(Vec::new())
            }
        }
    }

    fn persist(&self, requests: &[BlockRequest]) -> Result<(), RepositoryError> {
        let blob = serde_json::to_string(requests)?;
        self.store.set(&self.key, &blob)?;
        Ok(())
    }

    /// Keep a corrupt document under the first free `<key>.corrupt[.N]`
    ///
    /// A backup already holding `blob` is reused, so repeated reads of the
    /// same corrupt document write nothing and older backups are never
    /// replaced.
    fn quarantine(&self, blob: &str) {
        for slot in 0..MAX_CORRUPT_BACKUPS {
            let backup_key = if slot == 0 {
                format!("{}.corrupt", self.key)
            } else {
                format!("{}.corrupt.{slot}", self.key)
            };
            match self.store.get(&backup_key) {
                Ok(Some(existing)) if existing == blob => return,
                Ok(Some(_)) => continue,
                Ok(None) => {
                    if let Err(e) = self.store.set(&backup_key, blob) {
                        tracing::warn!(key = %backup_key, error = %e, "could not keep corrupt request list");
                    }
                    return;
                }
                Err(e) => {
                    tracing::warn!(key = %backup_key, error = %e, "could not check corrupt backup");
                    return;
                }
            }
        }
        tracing::warn!(key = %self.key, "corrupt backup slots exhausted, document not kept");
    }
}
