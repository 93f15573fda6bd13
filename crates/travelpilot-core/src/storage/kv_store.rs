//! Key-value slot trait.
//!
//! Defines the durable storage primitive the trip history is written to.
//! Implementations live in travelpilot-infra.

use travelpilot_types::error::StorageError;

/// Durable storage of string blobs under named slots.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait KvStore: Send + Sync {
    /// Read the blob stored under `slot`. Returns None if nothing was written.
    fn get(
        &self,
        slot: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Overwrite the blob stored under `slot`.
    fn set(
        &self,
        slot: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;
}
