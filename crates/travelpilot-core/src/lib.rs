//! Business logic and port trait definitions for the TravelPilot client.
//!
//! This crate defines the "ports" (`KvStore`, `AssistantClient`) that the
//! infrastructure layer implements, plus the conversation controller that
//! drives them. It depends only on `travelpilot-types` -- never on
//! `travelpilot-infra` or any network/filesystem crate.

pub mod assistant;
pub mod chat;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;
