//! Remote assistant abstraction for TravelPilot.
//!
//! The `AssistantClient` trait is the single request/response boundary to
//! the travel assistant service. Implementations live in travelpilot-infra.

pub mod client;
