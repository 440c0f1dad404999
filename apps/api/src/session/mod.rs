//! Session Store — per-session policy text and interview question set.
//!
//! Workflows see only the `SessionStore` trait, so a TTL-backed store can replace
//! `InMemorySessionStore` without touching orchestration code.
//!
//! Consistency: each call is atomic on its own, but workflows do get → modify → set
//! without holding a lock across the sequence. Two concurrent writers to the same
//! session id can overwrite each other; the last `set` wins.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Session id used when a client does not send one.
pub const DEFAULT_SESSION_ID: &str = "default";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Concatenated policy corpus; each document is prefixed by its separator line.
    pub policies: Option<String>,
    pub questions: Vec<String>,
    /// Always the same length as `questions`.
    pub answers: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self {
            policies: None,
            questions: Vec::new(),
            answers: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}

impl SessionRecord {
    /// Replaces the question set and resets answers to empty strings of matching length.
    pub fn set_questions(&mut self, questions: Vec<String>) {
        self.answers = vec![String::new(); questions.len()];
        self.questions = questions;
    }

    /// Stores answers for the current question set. Returns `false` (and changes nothing)
    /// when the lengths differ.
    pub fn set_answers(&mut self, answers: Vec<String>) -> bool {
        if answers.len() != self.questions.len() {
            return false;
        }
        self.answers = answers;
        true
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str) -> Option<SessionRecord>;

    /// Inserts or replaces the record, stamping `updated_at`.
    async fn set(&self, session_id: &str, record: SessionRecord);

    /// Removes the record. Returns whether one existed.
    async fn delete(&self, session_id: &str) -> bool;
}

/// Process-lifetime map. No expiry, no durability.
#[derive(Default)]
pub struct InMemorySessionStore {
    records: RwLock<HashMap<String, SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Option<SessionRecord> {
        self.records.read().await.get(session_id).cloned()
    }

    async fn set(&self, session_id: &str, mut record: SessionRecord) {
        record.updated_at = Utc::now();
        self.records
            .write()
            .await
            .insert(session_id.to_string(), record);
    }

    async fn delete(&self, session_id: &str) -> bool {
        self.records.write().await.remove(session_id).is_some()
    }
}
