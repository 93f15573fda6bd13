//! Wire types for the assistant's `POST /chat` endpoint.
//!
//! These mirror the service's JSON exactly. They are NOT the domain types
//! from travelpilot-types; the client converts between the two.

use serde::{Deserialize, Serialize};

/// Request body for `POST /chat`.
///
/// `session_id` is serialized as `null` when the conversation has no
/// server-assigned id yet.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub session_id: Option<&'a str>,
}

/// Response body for `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}
