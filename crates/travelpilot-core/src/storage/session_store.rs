//! Persistence adapter for the trip history.
//!
//! Keeps the full `SessionList` as one JSON blob in a single [`KvStore`]
//! slot. Reads are tolerant: missing or corrupt data yields an empty list.
//! Writes are best-effort: failures are logged, never propagated.

use tracing::{debug, warn};
use travelpilot_types::error::StorageError;

use crate::chat::history::SessionList;

use super::kv_store::KvStore;

/// Serialize a trip list into the stored blob format.
pub fn encode(list: &SessionList) -> Result<String, StorageError> {
    serde_json::to_string(list).map_err(|e| StorageError::Encode(e.to_string()))
}

/// Parse a stored blob into a trip list.
pub fn decode(blob: &str) -> Result<SessionList, StorageError> {
    serde_json::from_str(blob).map_err(|e| StorageError::Parse(e.to_string()))
}

/// Loads and saves the trip list through one storage slot.
pub struct SessionStore<K: KvStore> {
    kv: K,
    slot: String,
}

impl<K: KvStore> SessionStore<K> {
    pub fn new(kv: K, slot: impl Into<String>) -> Self {
        Self {
            kv,
            slot: slot.into(),
        }
    }

    /// Access the underlying slot store.
    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Read the stored list, surfacing read and parse failures.
    ///
    /// An absent slot is not an error and yields an empty list.
    pub async fn try_load(&self) -> Result<SessionList, StorageError> {
        match self.kv.get(&self.slot).await? {
            Some(blob) => decode(&blob),
            None => Ok(SessionList::new()),
        }
    }

    /// Read the stored list, falling back to an empty one.
    ///
    /// Malformed data is reported as a warning and otherwise ignored, so
    /// startup always succeeds.
    pub async fn load(&self) -> SessionList {
        match self.try_load().await {
            Ok(list) => {
                debug!(slot = %self.slot, trips = list.len(), "Loaded trip history");
                list
            }
            Err(err) => {
                warn!(slot = %self.slot, error = %err, "Discarding unreadable trip history");
                SessionList::new()
            }
        }
    }

    /// Overwrite the slot with the full list, surfacing failures.
    pub async fn try_save(&self, list: &SessionList) -> Result<(), StorageError> {
        let blob = encode(list)?;
        self.kv.set(&self.slot, &blob).await
    }

    /// Overwrite the slot with the full list.
    ///
    /// Durability is best-effort: a failed write is logged and the in-memory
    /// list stays authoritative.
    pub async fn save(&self, list: &SessionList) {
        if let Err(err) = self.try_save(list).await {
            warn!(slot = %self.slot, error = %err, "Failed to persist trip history");
        }
    }
}
