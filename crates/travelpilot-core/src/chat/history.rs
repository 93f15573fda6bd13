//! Trip history: the ordered list of stored sessions.
//!
//! Ordered most-recently-active first, with at most one entry per session id.
//! Every mutation of a session moves it to the front.

use serde::{Deserialize, Serialize};
use travelpilot_types::chat::{ChatSession, Message, SessionId};

use super::title::derive_title;

/// How a completed turn landed in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRecord {
    /// The session already existed; its messages were replaced.
    Updated,
    /// First confirmed turn of a new conversation; a session was inserted.
    Created,
}

/// Ordered list of trips, most recently active first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ChatSession>", into = "Vec<ChatSession>")]
pub struct SessionList {
    sessions: Vec<ChatSession>,
}

impl SessionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatSession> {
        self.sessions.iter()
    }

    pub fn as_slice(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn get(&self, id: &SessionId) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| &s.id == id)
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.get(id).is_some()
    }

    /// Index of a session (0 = most recent).
    pub fn position(&self, id: &SessionId) -> Option<usize> {
        self.sessions.iter().position(|s| &s.id == id)
    }

    /// Record a confirmed turn for `id`.
    ///
    /// An existing session gets `messages` as its new history and keeps its
    /// title. Otherwise a session is created, titled from `prompt`. Either
    /// way the session ends up at index 0.
    pub fn record_turn(
        &mut self,
        id: &SessionId,
        messages: Vec<Message>,
        prompt: &str,
    ) -> TurnRecord {
        match self.position(id) {
            Some(index) => {
                let mut session = self.sessions.remove(index);
                session.messages = messages;
                self.sessions.insert(0, session);
                TurnRecord::Updated
            }
            None => {
                let session = ChatSession::new(id.clone(), derive_title(prompt), messages);
                self.sessions.insert(0, session);
                TurnRecord::Created
            }
        }
    }

    /// Remove a session. Returns it if it was present.
    pub fn remove(&mut self, id: &SessionId) -> Option<ChatSession> {
        let index = self.position(id)?;
        Some(self.sessions.remove(index))
    }
}

impl From<Vec<ChatSession>> for SessionList {
    /// Build a list from stored sessions, keeping the first entry per id.
    fn from(sessions: Vec<ChatSession>) -> Self {
        let mut list = Self {
            sessions: Vec::with_capacity(sessions.len()),
        };
        for session in sessions {
            if !list.contains(&session.id) {
                list.sessions.push(session);
            }
        }
        list
    }
}

impl From<SessionList> for Vec<ChatSession> {
    fn from(list: SessionList) -> Self {
        list.sessions
    }
}

impl<'a> IntoIterator for &'a SessionList {
    type Item = &'a ChatSession;
    type IntoIter = std::slice::Iter<'a, ChatSession>;

    fn into_iter(self) -> Self::IntoIter {
        self.sessions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exchange(prompt: &str, reply: &str) -> Vec<Message> {
        vec![Message::user(prompt), Message::assistant(reply)]
    }

    #[test]
    fn test_record_turn_creates_session_at_front() {
        let mut list = SessionList::new();
        let id = SessionId::new("abc123");
        let record = list.record_turn(&id, exchange("Villas in Bali", "Here are villas..."), "Villas in Bali");

        assert_eq!(record, TurnRecord::Created);
        assert_eq!(list.len(), 1);
        let session = list.get(&id).unwrap();
        assert_eq!(session.title, "Villas in Bali");
        assert_eq!(session.messages.len(), 2);
    }

    #[test]
    fn test_record_turn_keeps_title_and_moves_to_front() {
        let mut list = SessionList::new();
        let bali = SessionId::new("bali");
        let nyc = SessionId::new("nyc");
        list.record_turn(&bali, exchange("Villas in Bali", "..."), "Villas in Bali");
        list.record_turn(&nyc, exchange("Lofts in NYC", "..."), "Lofts in NYC");
        assert_eq!(list.position(&bali), Some(1));

        let mut messages = exchange("Villas in Bali", "...");
        messages.extend(exchange("under $200", "Cheaper villas..."));
        let record = list.record_turn(&bali, messages, "under $200");

        assert_eq!(record, TurnRecord::Updated);
        assert_eq!(list.position(&bali), Some(0));
        assert_eq!(list.len(), 2);
        let session = list.get(&bali).unwrap();
        assert_eq!(session.title, "Villas in Bali");
        assert_eq!(session.messages.len(), 4);
    }

    #[test]
    fn test_record_turn_keeps_created_at() {
        let mut list = SessionList::new();
        let id = SessionId::new("abc123");
        list.record_turn(&id, exchange("a", "b"), "a");
        let created = list.get(&id).unwrap().created_at;
        list.record_turn(&id, exchange("c", "d"), "c");
        assert_eq!(list.get(&id).unwrap().created_at, created);
    }

    #[test]
    fn test_remove() {
        let mut list = SessionList::new();
        let id = SessionId::new("abc123");
        list.record_turn(&id, exchange("a", "b"), "a");

        assert!(list.remove(&SessionId::new("missing")).is_none());
        assert_eq!(list.len(), 1);
        assert!(list.remove(&id).is_some());
        assert!(list.is_empty());
    }

    #[test]
    fn test_from_vec_drops_duplicate_ids() {
        let first = ChatSession::new(SessionId::new("dup"), "First".to_string(), Vec::new());
        let second = ChatSession::new(SessionId::new("dup"), "Second".to_string(), Vec::new());
        let list = SessionList::from(vec![first, second]);
        assert_eq!(list.len(), 1);
        assert_eq!(list.as_slice()[0].title, "First");
    }

    #[test]
    fn test_serializes_as_bare_array() {
        let mut list = SessionList::new();
        list.record_turn(&SessionId::new("abc123"), exchange("a", "b"), "a");
        let json = serde_json::to_value(&list).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], "abc123");
    }
}
