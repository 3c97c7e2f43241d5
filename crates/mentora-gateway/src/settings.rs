// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime-configurable application settings.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::handlers::error_response;
use crate::planning::PLAN_READY_MESSAGE_KEY;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PlanReadyMessageResponse {
    pub success: bool,
    /// `None` means the built-in default is in effect.
    pub message: Option<String>,
}

/// GET /settings/plan-ready-message
pub async fn get_plan_ready_message(State(state): State<AppState>) -> Response {
    match state.storage.get_setting(PLAN_READY_MESSAGE_KEY).await {
        Ok(setting) => Json(PlanReadyMessageResponse {
            success: true,
            message: setting.map(|s| s.value),
        })
        .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

#[derive(Debug, Deserialize)]
pub struct PlanReadyMessageRequest {
    pub message: String,
}

/// PUT /settings/plan-ready-message
pub async fn put_plan_ready_message(
    State(state): State<AppState>,
    Json(body): Json<PlanReadyMessageRequest>,
) -> Response {
    let trimmed = body.message.trim();
    if trimmed.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "message must not be empty");
    }
    match state.storage.put_setting(PLAN_READY_MESSAGE_KEY, trimmed).await {
        Ok(()) => Json(serde_json::json!({ "success": true })).into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_request_parses() {
        let req: PlanReadyMessageRequest =
            serde_json::from_str(r#"{"message": "Dashboard awaits!"}"#).unwrap();
        assert_eq!(req.message, "Dashboard awaits!");
    }
}
