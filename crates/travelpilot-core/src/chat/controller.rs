//! Conversation session controller.
//!
//! Owns the trip history and the active conversation, and turns each user
//! submission into a two-phase turn:
//!
//! 1. `begin_turn` appends the user message to the active view (optimistic)
//!    and closes the single-flight gate (`Idle -> Submitting`).
//! 2. `finish_turn` reconciles the assistant's answer into the view and the
//!    history and persists the history, or appends the fallback reply on
//!    failure. The gate reopens either way (`-> Idle`).
//!
//! The network call is the only await made between the two phases. State
//! lives behind a synchronous mutex that is never held across an await;
//! history writes are ordered by a separate async lock.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};
use travelpilot_types::chat::{AssistantReply, ChatSession, Message, SessionId};
use travelpilot_types::error::{AssistantError, ValidationError};

use crate::assistant::client::AssistantClient;
use crate::storage::kv_store::KvStore;
use crate::storage::session_store::SessionStore;

use super::history::{SessionList, TurnRecord};

/// Reply shown in place of the assistant's answer when a request fails.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Whether a submission is outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TurnPhase {
    #[default]
    Idle,
    Submitting,
}

/// How a submitted turn resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The assistant answered and the trip history was updated.
    Reconciled {
        session_id: SessionId,
        record: TurnRecord,
    },
    /// The request failed; the fallback reply was shown.
    Failed,
    /// The assistant answered, but the trip was deleted while waiting.
    Discarded { session_id: SessionId },
}

/// Read-only copy of the active conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationSnapshot {
    pub session_id: Option<SessionId>,
    pub messages: Vec<Message>,
    pub phase: TurnPhase,
}

#[derive(Debug, Default)]
struct ActiveConversation {
    session_id: Option<SessionId>,
    messages: Vec<Message>,
    /// Bumped whenever the user switches conversations.
    epoch: u64,
}

impl ActiveConversation {
    fn reset(&mut self, session_id: Option<SessionId>, messages: Vec<Message>) {
        self.session_id = session_id;
        self.messages = messages;
        self.epoch += 1;
    }
}

#[derive(Debug)]
struct PendingTurn {
    id: u64,
    session_id: Option<SessionId>,
    discarded: bool,
}

#[derive(Debug, Default)]
struct ControllerState {
    sessions: SessionList,
    active: ActiveConversation,
    pending: Option<PendingTurn>,
    next_turn_id: u64,
}

impl ControllerState {
    fn phase(&self) -> TurnPhase {
        if self.pending.is_some() {
            TurnPhase::Submitting
        } else {
            TurnPhase::Idle
        }
    }
}

/// What `begin_turn` captured about the conversation being sent.
struct Turn {
    id: u64,
    epoch: u64,
    session_id: Option<SessionId>,
    messages: Vec<Message>,
    prompt: String,
}

/// Reopens the gate if a submission is dropped before it finishes.
struct GateGuard<'a> {
    state: &'a Mutex<ControllerState>,
    turn_id: u64,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state
            .pending
            .take_if(|pending| pending.id == self.turn_id)
            .is_some()
        {
            warn!(turn = self.turn_id, "Submission dropped before the assistant replied");
        }
    }
}

/// Orchestrates submissions, reconciliation, and the trip history.
///
/// Generic over the storage slot and the assistant client so the core never
/// depends on travelpilot-infra.
pub struct ConversationController<K: KvStore, A: AssistantClient> {
    store: SessionStore<K>,
    client: A,
    state: Mutex<ControllerState>,
    persist: tokio::sync::Mutex<()>,
}

impl<K: KvStore, A: AssistantClient> ConversationController<K, A> {
    /// Create a controller over an already-loaded history.
    pub fn new(store: SessionStore<K>, client: A, sessions: SessionList) -> Self {
        Self {
            store,
            client,
            state: Mutex::new(ControllerState {
                sessions,
                ..ControllerState::default()
            }),
            persist: tokio::sync::Mutex::new(()),
        }
    }

    /// Create a controller hydrated from persistence.
    ///
    /// Missing or unreadable history starts the controller empty.
    pub async fn load(store: SessionStore<K>, client: A) -> Self {
        let sessions = store.load().await;
        info!(trips = sessions.len(), "Conversation controller ready");
        Self::new(store, client, sessions)
    }

    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --- Observation ---

    pub fn phase(&self) -> TurnPhase {
        self.state().phase()
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        let state = self.state();
        ConversationSnapshot {
            session_id: state.active.session_id.clone(),
            messages: state.active.messages.clone(),
            phase: state.phase(),
        }
    }

    pub fn sessions(&self) -> SessionList {
        self.state().sessions.clone()
    }

    pub fn session(&self, id: &SessionId) -> Option<ChatSession> {
        self.state().sessions.get(id).cloned()
    }

    // --- Submission ---

    /// Send one user message and reconcile the answer.
    ///
    /// Empty (after trimming) input and input arriving while another
    /// submission is outstanding are rejected without side effects. Every
    /// accepted submission resolves to an outcome and leaves the controller
    /// `Idle`.
    pub async fn submit(&self, text: &str) -> Result<TurnOutcome, ValidationError> {
        let prompt = text.trim();
        if prompt.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }

        let turn = self.begin_turn(prompt)?;
        let _gate = GateGuard {
            state: &self.state,
            turn_id: turn.id,
        };

        debug!(session_id = ?turn.session_id, "Sending message to assistant");
        let result = self.client.send(&turn.prompt, turn.session_id.as_ref()).await;

        Ok(self.finish_turn(turn, result).await)
    }

    fn begin_turn(&self, prompt: &str) -> Result<Turn, ValidationError> {
        let mut state = self.state();
        if state.pending.is_some() {
            debug!("Ignoring submission while another is in flight");
            return Err(ValidationError::SubmissionInFlight);
        }

        state.active.messages.push(Message::user(prompt));
        state.next_turn_id += 1;
        let turn = Turn {
            id: state.next_turn_id,
            epoch: state.active.epoch,
            session_id: state.active.session_id.clone(),
            messages: state.active.messages.clone(),
            prompt: prompt.to_string(),
        };
        state.pending = Some(PendingTurn {
            id: turn.id,
            session_id: turn.session_id.clone(),
            discarded: false,
        });
        Ok(turn)
    }

    async fn finish_turn(
        &self,
        turn: Turn,
        result: Result<AssistantReply, AssistantError>,
    ) -> TurnOutcome {
        let _write = self.persist.lock().await;

        let (outcome, snapshot) = {
            let mut state = self.state();
            let discarded = state
                .pending
                .take_if(|pending| pending.id == turn.id)
                .is_some_and(|pending| pending.discarded);
            let on_screen = state.active.epoch == turn.epoch;

            match result {
                Ok(reply) => {
                    let session_id = match turn.session_id {
                        Some(current) => {
                            if current != reply.session_id {
                                warn!(
                                    expected = %current,
                                    returned = %reply.session_id,
                                    "Assistant returned a different session id; keeping ours"
                                );
                            }
                            current
                        }
                        None => reply.session_id,
                    };

                    let mut messages = turn.messages;
                    messages.push(Message::assistant(reply.response));

                    // A trip re-opened mid-flight shows the stored copy, which
                    // lacks this turn.
                    let reopened = !discarded
                        && state.active.session_id.as_ref() == Some(&session_id);
                    if on_screen || reopened {
                        state.active.messages = messages.clone();
                        if state.active.session_id.is_none() {
                            state.active.session_id = Some(session_id.clone());
                        }
                    }

                    if discarded {
                        info!(session_id = %session_id, "Trip deleted while waiting; reply dropped");
                        (TurnOutcome::Discarded { session_id }, None)
                    } else {
                        let record =
                            state
                                .sessions
                                .record_turn(&session_id, messages, &turn.prompt);
                        info!(session_id = %session_id, ?record, "Turn reconciled");
                        (
                            TurnOutcome::Reconciled { session_id, record },
                            Some(state.sessions.clone()),
                        )
                    }
                }
                Err(err) => {
                    warn!(session_id = ?turn.session_id, error = %err, "Assistant request failed");
                    if on_screen {
                        state.active.messages.push(Message::assistant(FALLBACK_REPLY));
                    }
                    (TurnOutcome::Failed, None)
                }
            }
        };

        if let Some(sessions) = snapshot {
            self.store.save(&sessions).await;
        }
        outcome
    }

    // --- Lifecycle ---

    /// Start a fresh, unsaved conversation. Does not touch the history.
    pub fn new_conversation(&self) {
        self.state().active.reset(None, Vec::new());
        debug!("Started new conversation");
    }

    /// Make a stored trip the active conversation.
    ///
    /// The view gets a copy of the stored messages; further turns go
    /// through [`submit`](Self::submit).
    pub fn select_conversation(&self, id: &SessionId) -> Result<(), ValidationError> {
        let mut state = self.state();
        let messages = state
            .sessions
            .get(id)
            .map(|session| session.messages.clone())
            .ok_or_else(|| ValidationError::UnknownSession(id.clone()))?;
        state.active.reset(Some(id.clone()), messages);
        debug!(session_id = %id, "Selected conversation");
        Ok(())
    }

    /// Delete a stored trip.
    ///
    /// Returns whether the trip existed. The history is only rewritten when
    /// something was removed. Deleting the active trip starts a new
    /// conversation.
    pub async fn delete_conversation(&self, id: &SessionId) -> bool {
        let _write = self.persist.lock().await;

        let snapshot = {
            let mut state = self.state();
            let removed = state.sessions.remove(id).is_some();

            if removed {
                if let Some(pending) = state
                    .pending
                    .as_mut()
                    .filter(|pending| pending.session_id.as_ref() == Some(id))
                {
                    pending.discarded = true;
                }
            }
            if state.active.session_id.as_ref() == Some(id) {
                state.active.reset(None, Vec::new());
            }

            removed.then(|| state.sessions.clone())
        };

        match snapshot {
            Some(sessions) => {
                self.store.save(&sessions).await;
                info!(session_id = %id, "Trip deleted");
                true
            }
            None => {
                debug!(session_id = %id, "Delete requested for unknown trip");
                false
            }
        }
    }

    /// Write the current history out (teardown).
    pub async fn flush(&self) {
        let _write = self.persist.lock().await;
        let sessions = self.sessions();
        self.store.save(&sessions).await;
    }
}
