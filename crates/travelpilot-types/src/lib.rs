//! Shared domain types for the TravelPilot client.
//!
//! Messages, trips (chat sessions), client configuration, and the error
//! enums shared by every layer.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
