//! Storage implementations for TravelPilot.
//!
//! Provides the local-filesystem `KvStore` the trip history is kept in.

pub mod file_kv;

pub use file_kv::FileKvStore;
