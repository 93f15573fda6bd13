//! Chat service: the trip lifecycle API exposed to front ends.
//!
//! ChatService is a thin façade over a shared [`ConversationController`]:
//! it sanitizes input before submission and forwards everything else.

use std::sync::Arc;

use travelpilot_types::chat::{ChatSession, SessionId};
use travelpilot_types::error::ValidationError;

use crate::assistant::client::AssistantClient;
use crate::storage::kv_store::KvStore;

use super::controller::{ConversationController, ConversationSnapshot, TurnOutcome, TurnPhase};
use super::history::SessionList;

/// Front-end entry point for sending messages and managing trips.
///
/// Cheap to clone; clones share one controller.
pub struct ChatService<K: KvStore, A: AssistantClient> {
    controller: Arc<ConversationController<K, A>>,
}

impl<K: KvStore, A: AssistantClient> Clone for ChatService<K, A> {
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
        }
    }
}

impl<K: KvStore, A: AssistantClient> ChatService<K, A> {
    pub fn new(controller: ConversationController<K, A>) -> Self {
        Self {
            controller: Arc::new(controller),
        }
    }

    /// Send a message typed by the user.
    ///
    /// Surrounding whitespace is stripped; blank input is rejected before it
    /// reaches the controller.
    pub async fn send_message(&self, input: &str) -> Result<TurnOutcome, ValidationError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        self.controller.submit(text).await
    }

    pub fn new_trip(&self) {
        self.controller.new_conversation();
    }

    pub fn open_trip(&self, id: &SessionId) -> Result<(), ValidationError> {
        self.controller.select_conversation(id)
    }

    pub async fn delete_trip(&self, id: &SessionId) -> bool {
        self.controller.delete_conversation(id).await
    }

    pub fn conversation(&self) -> ConversationSnapshot {
        self.controller.snapshot()
    }

    pub fn trips(&self) -> SessionList {
        self.controller.sessions()
    }

    pub fn trip(&self, id: &SessionId) -> Option<ChatSession> {
        self.controller.session(id)
    }

    pub fn is_busy(&self) -> bool {
        self.controller.phase() == TurnPhase::Submitting
    }

    /// Flush the trip history before exit.
    pub async fn shutdown(&self) {
        self.controller.flush().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::session_store::SessionStore;
    use crate::testing::{MemoryKvStore, MockAssistant};

    async fn service(assistant: &MockAssistant) -> ChatService<MemoryKvStore, MockAssistant> {
        let store = SessionStore::new(MemoryKvStore::new(), "travelpilot_sessions");
        ChatService::new(ConversationController::load(store, assistant.clone()).await)
    }

    #[tokio::test]
    async fn test_blank_input_never_reaches_assistant() {
        let assistant = MockAssistant::replying([]);
        let chat = service(&assistant).await;

        assert_eq!(chat.send_message("  ").await, Err(ValidationError::EmptyMessage));
        assert!(assistant.calls().is_empty());
        assert!(chat.conversation().messages.is_empty());
    }

    #[tokio::test]
    async fn test_trip_lifecycle_round_trip() {
        let assistant = MockAssistant::replying([MockAssistant::ok("Here are villas...", "abc123")]);
        let chat = service(&assistant).await;
        let id = SessionId::new("abc123");

        chat.send_message(" Villas in Bali ").await.unwrap();
        assert_eq!(chat.trips().len(), 1);
        assert_eq!(chat.trip(&id).unwrap().title, "Villas in Bali");
        assert!(!chat.is_busy());

        chat.new_trip();
        assert!(chat.conversation().session_id.is_none());

        chat.open_trip(&id).unwrap();
        assert_eq!(chat.conversation().messages.len(), 2);

        assert!(chat.delete_trip(&id).await);
        assert!(chat.trips().is_empty());
        assert!(chat.conversation().session_id.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let assistant = MockAssistant::replying([MockAssistant::ok("Here are villas...", "abc123")]);
        let chat = service(&assistant).await;
        let other = chat.clone();

        chat.send_message("Villas in Bali").await.unwrap();
        assert_eq!(other.trips().len(), 1);
    }
}
