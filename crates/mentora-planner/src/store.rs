// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory planning session store.
//!
//! Sessions live in a `DashMap` keyed by session id. Callers mutate a
//! session through `with_session`, which holds the map's shard lock for the
//! duration of the closure, so two concurrent messages for the same session
//! serialize instead of interleaving partial updates. The closure must not
//! await.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use mentora_core::SessionId;
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

use crate::plan::Plan;
use crate::profile::Profile;
use crate::stage::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// One turn of the planning conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Full state of one planning conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningSession {
    pub id: SessionId,
    pub stage: Stage,
    pub profile: Profile,
    pub history: Vec<HistoryEntry>,
    pub plan: Option<Plan>,
    pub questions_asked: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlanningSession {
    pub fn new(id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            id,
            stage: Stage::Initial,
            profile: Profile::default(),
            history: Vec::new(),
            plan: None,
            questions_asked: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn record(&mut self, sender: Sender, content: impl Into<String>) {
        let now = Utc::now();
        self.history.push(HistoryEntry {
            sender,
            content: content.into(),
            timestamp: now,
        });
        self.updated_at = now;
    }
}

/// Concurrent session map.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, PlanningSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_session_id() -> SessionId {
        SessionId(format!("session_{}", Uuid::new_v4().simple()))
    }

    /// Fetch a snapshot of a session, if it exists.
    pub fn get(&self, id: &SessionId) -> Option<PlanningSession> {
        self.sessions.get(&id.0).map(|entry| entry.clone())
    }

    /// Run `f` against the session, creating it first if absent. The shard
    /// lock is held while `f` runs.
    pub fn with_session<R>(&self, id: &SessionId, f: impl FnOnce(&mut PlanningSession) -> R) -> R {
        let mut entry = self
            .sessions
            .entry(id.0.clone())
            .or_insert_with(|| PlanningSession::new(id.clone()));
        f(entry.value_mut())
    }

    /// Replace a session with a fresh one, returning the new state.
    pub fn reset(&self, id: &SessionId) -> PlanningSession {
        let fresh = PlanningSession::new(id.clone());
        self.sessions.insert(id.0.clone(), fresh.clone());
        fresh
    }

    pub fn remove(&self, id: &SessionId) -> Option<PlanningSession> {
        self.sessions.remove(&id.0).map(|(_, session)| session)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
