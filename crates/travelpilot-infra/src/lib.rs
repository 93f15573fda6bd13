//! Infrastructure layer for TravelPilot.
//!
//! Contains implementations of the ports defined in `travelpilot-core`:
//! the file-backed slot store, the HTTP assistant client, and the config
//! and data-directory helpers.

pub mod assistant;
pub mod config;
pub mod filesystem;
pub mod storage;
