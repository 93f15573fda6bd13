//! Local filesystem key-value slot store.
//!
//! Implements `KvStore` from `travelpilot-core` with one JSON file per slot:
//!
//! ```text
//! {base_dir}/
//!   travelpilot_sessions.json
//! ```
//!
//! Writes go to a `.tmp` sibling first and are renamed into place, so a
//! crash mid-write leaves the previous blob intact.

use std::path::PathBuf;

use travelpilot_core::storage::kv_store::KvStore;
use travelpilot_types::error::StorageError;

/// Filesystem-backed slot store rooted at a directory.
pub struct FileKvStore {
    base_dir: PathBuf,
}

impl FileKvStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Compute the file backing a slot.
    ///
    /// Slot names must be plain file stems (no separators, not empty).
    pub fn slot_path(&self, slot: &str) -> Result<PathBuf, StorageError> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !slot.starts_with('.');
        if !valid {
            return Err(StorageError::Io(format!("invalid slot name '{slot}'")));
        }
        Ok(self.base_dir.join(format!("{slot}.json")))
    }
}

impl KvStore for FileKvStore {
    async fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(slot)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(format!(
                "failed to read {}: {err}",
                path.display()
            ))),
        }
    }

    async fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(slot)?;
        let io_err = |action: &str, err: std::io::Error| {
            StorageError::Io(format!("failed to {action} {}: {err}", path.display()))
        };

        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| io_err("create directory for", e))?;

        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, value)
            .await
            .map_err(|e| io_err("write", e))?;
        tokio::fs::rename(&temp_path, &path)
            .await
            .map_err(|e| io_err("replace", e))?;

        tracing::trace!(slot, bytes = value.len(), "Slot written");
        Ok(())
    }
}
