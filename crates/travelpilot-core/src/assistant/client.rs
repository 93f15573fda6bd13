//! AssistantClient trait definition.

use travelpilot_types::chat::{AssistantReply, SessionId};
use travelpilot_types::error::AssistantError;

/// One request/response call to the travel assistant.
///
/// Passing `None` asks the service to start a new conversation and issue its
/// id; passing an id continues that conversation, and the service echoes it
/// back. Implementations make exactly one request per call and never retry.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait AssistantClient: Send + Sync {
    fn send(
        &self,
        message: &str,
        session_id: Option<&SessionId>,
    ) -> impl std::future::Future<Output = Result<AssistantReply, AssistantError>> + Send;
}
