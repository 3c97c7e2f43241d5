// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Planning chat endpoints and plan persistence.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use futures::stream::{self, Stream};
use mentora_core::types::{ChatMessageRow, ChatSessionRow, StoredPlan};
use mentora_core::SessionId;
use mentora_planner::EngineReply;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::handlers::{error_response, not_found};
use crate::AppState;

/// Settings key holding the configurable plan-ready closing line.
pub(crate) const PLAN_READY_MESSAGE_KEY: &str = "plan_ready_message";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
    /// When set, the conversation is persisted for this user.
    #[serde(default)]
    pub clerk_user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
    pub stage: String,
    pub plan_ready: bool,
    pub timestamp: String,
}

impl ChatResponse {
    fn from_reply(reply: &EngineReply) -> Self {
        Self {
            response: reply.message.clone(),
            session_id: reply.session_id.0.clone(),
            stage: reply.stage.to_string(),
            plan_ready: reply.plan_ready,
            timestamp: reply.timestamp.to_rfc3339(),
        }
    }
}

async fn run_chat_turn(state: &AppState, body: &ChatRequest) -> EngineReply {
    let plan_ready_message = match state.storage.get_setting(PLAN_READY_MESSAGE_KEY).await {
        Ok(setting) => setting.map(|s| s.value),
        Err(e) => {
            warn!(error = %e, "plan-ready message lookup failed");
            None
        }
    };

    let session_id = body.session_id.clone().map(SessionId);
    let reply = state
        .engine
        .handle_message(session_id, &body.message, plan_ready_message.as_deref())
        .await;

    if let Some(clerk_user_id) = &body.clerk_user_id {
        persist_exchange(state, clerk_user_id, &body.message, &reply).await;
    }
    reply
}

/// Best-effort chat persistence. Storage failures are logged, never
/// propagated; the reply has already been produced.
async fn persist_exchange(state: &AppState, clerk_user_id: &str, message: &str, reply: &EngineReply) {
    let session_id = &reply.session_id.0;
    let now = Utc::now();

    let is_new = match state.storage.list_chat_messages(session_id, Some(1)).await {
        Ok(rows) => rows.is_empty(),
        Err(_) => true,
    };
    if is_new {
        let session = ChatSessionRow {
            id: session_id.clone(),
            clerk_user_id: clerk_user_id.to_string(),
            title: Some(message.chars().take(60).collect()),
            created_at: now,
            updated_at: now,
        };
        if let Err(e) = state.storage.create_chat_session(&session).await {
            warn!(error = %e, "chat session persistence failed");
            return;
        }
    }

    for (sender, content) in [("user", message), ("ai", reply.message.as_str())] {
        let row = ChatMessageRow {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.clone(),
            sender: sender.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        if let Err(e) = state.storage.insert_chat_message(&row).await {
            warn!(error = %e, "chat message persistence failed");
        }
    }
}

/// POST /chat
pub async fn post_chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let reply = run_chat_turn(&state, &body).await;
    Json(ChatResponse::from_reply(&reply))
}

/// POST /chat/stream
///
/// SSE rendition of the same turn: `metadata`, chunked `content`,
/// `final_metadata`, then `complete`.
pub async fn post_chat_stream(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Sse<impl Stream<Item = Result<Event, std::convert::Infallible>>> {
    let reply = run_chat_turn(&state, &body).await;
    let response = ChatResponse::from_reply(&reply);

    let mut events = Vec::new();
    events.push(sse_event(
        "metadata",
        serde_json::json!({
            "session_id": response.session_id,
            "stage": response.stage,
        }),
    ));
    for chunk in chunk_text(&response.response, 80) {
        events.push(sse_event("content", serde_json::json!({ "content": chunk })));
    }
    events.push(sse_event(
        "final_metadata",
        serde_json::json!({
            "stage": response.stage,
            "plan_ready": response.plan_ready,
            "full_response": response.response,
        }),
    ));
    events.push(sse_event(
        "complete",
        serde_json::json!({ "session_id": response.session_id }),
    ));

    Sse::new(stream::iter(events))
}

fn sse_event(name: &str, data: serde_json::Value) -> Result<Event, std::convert::Infallible> {
    Ok(Event::default().event(name).data(data.to_string()))
}

/// Split on whitespace into chunks of at most `size` characters, keeping
/// words intact.
fn chunk_text(text: &str, size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for word in text.split_inclusive(char::is_whitespace) {
        if !current.is_empty() && current.len() + word.len() > size {
            chunks.push(std::mem::take(&mut current));
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[derive(Debug, Serialize)]
pub struct PlanEnvelope {
    pub success: bool,
    pub data: serde_json::Value,
}

/// GET /learning-plan/{session_id}
pub async fn get_session_plan(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    match state.engine.plan(&SessionId(session_id.clone())) {
        Some(plan) => match serde_json::to_value(&plan) {
            Ok(data) => Json(PlanEnvelope { success: true, data }).into_response(),
            Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        },
        None => not_found("learning plan for session", &session_id),
    }
}

#[derive(Debug, Deserialize)]
pub struct PlanFromSessionRequest {
    pub session_id: String,
    pub clerk_user_id: String,
}

#[derive(Debug, Serialize)]
pub struct PlanFromSessionResponse {
    pub success: bool,
    pub plan_id: String,
}

/// POST /learning-plans/from-session
///
/// Copies the in-memory session plan into durable storage for the user.
pub async fn post_plan_from_session(
    State(state): State<AppState>,
    Json(body): Json<PlanFromSessionRequest>,
) -> Response {
    let Some(plan) = state.engine.plan(&SessionId(body.session_id.clone())) else {
        return not_found("learning plan for session", &body.session_id);
    };
    let user = match state.storage.get_user_by_clerk_id(&body.clerk_user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return not_found("user", &body.clerk_user_id),
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };

    let plan_data = match serde_json::to_value(&plan) {
        Ok(data) => data,
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    let stored = StoredPlan {
        id: plan.plan_id.clone(),
        user_id: user.id,
        title: plan.title.clone(),
        subject: plan.subject.clone(),
        plan_data,
        created_at: Utc::now(),
    };
    if let Err(e) = state.storage.insert_plan(&stored).await {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
    }

    Json(PlanFromSessionResponse {
        success: true,
        plan_id: plan.plan_id,
    })
    .into_response()
}

#[derive(Debug, Serialize)]
pub struct PlanListResponse {
    pub success: bool,
    pub data: Vec<StoredPlan>,
}

/// GET /learning-plans/{clerk_user_id}
pub async fn get_user_plans(
    State(state): State<AppState>,
    Path(clerk_user_id): Path<String>,
) -> Response {
    let user = match state.storage.get_user_by_clerk_id(&clerk_user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return not_found("user", &clerk_user_id),
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    match state.storage.list_plans_for_user(&user.id).await {
        Ok(plans) => Json(PlanListResponse {
            success: true,
            data: plans,
        })
        .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// GET /chat/sessions/{clerk_user_id}
pub async fn get_chat_sessions(
    State(state): State<AppState>,
    Path(clerk_user_id): Path<String>,
) -> Response {
    match state.storage.list_chat_sessions_for_user(&clerk_user_id).await {
        Ok(sessions) => Json(serde_json::json!({ "success": true, "data": sessions }))
            .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}

/// GET /chat/messages/{session_id}
pub async fn get_chat_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<MessagesQuery>,
) -> Response {
    match state.storage.list_chat_messages(&session_id, query.limit).await {
        Ok(messages) => Json(serde_json::json!({ "success": true, "data": messages }))
            .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_accepts_minimal_body() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(req.message, "hi");
        assert!(req.session_id.is_none());
        assert!(req.clerk_user_id.is_none());
    }

    #[test]
    fn chunk_text_keeps_words_intact() {
        let chunks = chunk_text("one two three four five six seven", 10);
        assert!(chunks.len() > 1);
        assert_eq!(chunks.concat(), "one two three four five six seven");
        for chunk in &chunks {
            for word in chunk.split_whitespace() {
                assert!("one two three four five six seven".contains(word));
            }
        }
    }

    #[test]
    fn chunk_text_handles_empty_input() {
        assert!(chunk_text("", 10).is_empty());
    }
}
