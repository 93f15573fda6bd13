//! Conversation handling for TravelPilot.
//!
//! The trip history, title derivation, the conversation controller state
//! machine, and the `ChatService` façade front ends talk to.

pub mod controller;
pub mod history;
pub mod service;
pub mod title;
