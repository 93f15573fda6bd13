//! Storage abstractions for TravelPilot.
//!
//! Defines the durable slot trait and the adapter that keeps the trip list
//! in it. Slot implementations live in travelpilot-infra.

pub mod kv_store;
pub mod session_store;
