//! In-memory doubles for the storage and assistant ports, shared by the
//! unit tests in this crate.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;
use travelpilot_types::chat::{AssistantReply, SessionId};
use travelpilot_types::error::{AssistantError, StorageError};

use crate::assistant::client::AssistantClient;
use crate::storage::kv_store::KvStore;

// --- Storage ---

#[derive(Default)]
struct KvInner {
    blobs: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

/// Slot store backed by a map. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    inner: Arc<KvInner>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(slot: &str, blob: &str) -> Self {
        let kv = Self::new();
        kv.inner
            .blobs
            .lock()
            .unwrap()
            .insert(slot.to_string(), blob.to_string());
        kv
    }

    pub fn blob(&self, slot: &str) -> Option<String> {
        self.inner.blobs.lock().unwrap().get(slot).cloned()
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KvStore for MemoryKvStore {
    async fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        if self.inner.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Io("read refused".to_string()));
        }
        Ok(self.blob(slot))
    }

    async fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io("disk full".to_string()));
        }
        self.inner
            .blobs
            .lock()
            .unwrap()
            .insert(slot.to_string(), value.to_string());
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// --- Assistant ---

type Reply = Result<AssistantReply, AssistantError>;

struct Scripted {
    reply: Reply,
    gated: bool,
}

#[derive(Default)]
struct AssistantInner {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<(String, Option<SessionId>)>>,
    gate: Notify,
    gate_unscripted: bool,
}

/// Assistant that answers from a script and records every call.
///
/// Gated replies wait for [`release`](Self::release) before answering.
#[derive(Clone, Default)]
pub struct MockAssistant {
    inner: Arc<AssistantInner>,
}

impl MockAssistant {
    pub fn ok(response: &str, session_id: &str) -> Reply {
        Ok(AssistantReply {
            response: response.to_string(),
            session_id: SessionId::new(session_id),
        })
    }

    fn scripted(replies: impl IntoIterator<Item = Reply>, gated: bool) -> Self {
        let script = replies
            .into_iter()
            .map(|reply| Scripted { reply, gated })
            .collect();
        Self {
            inner: Arc::new(AssistantInner {
                script: Mutex::new(script),
                gate_unscripted: gated,
                ..AssistantInner::default()
            }),
        }
    }

    /// Answer immediately, in order.
    pub fn replying(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self::scripted(replies, false)
    }

    /// Answer in order, each reply held until released.
    pub fn gated(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self::scripted(replies, true)
    }

    /// Append a reply that is held until released.
    pub fn push_gated(&self, reply: Reply) {
        self.inner
            .script
            .lock()
            .unwrap()
            .push_back(Scripted { reply, gated: true });
    }

    /// Let one held reply through.
    pub fn release(&self) {
        self.inner.gate.notify_one();
    }

    pub fn calls(&self) -> Vec<(String, Option<SessionId>)> {
        self.inner.calls.lock().unwrap().clone()
    }
}

impl AssistantClient for MockAssistant {
    async fn send(
        &self,
        message: &str,
        session_id: Option<&SessionId>,
    ) -> Result<AssistantReply, AssistantError> {
        self.inner
            .calls
            .lock()
            .unwrap()
            .push((message.to_string(), session_id.cloned()));

        let next = self.inner.script.lock().unwrap().pop_front();
        let Scripted { reply, gated } = next.unwrap_or_else(|| Scripted {
            reply: Err(AssistantError::Transport("no scripted reply".to_string())),
            gated: self.inner.gate_unscripted,
        });

        if gated {
            self.inner.gate.notified().await;
        }
        reply
    }
}
