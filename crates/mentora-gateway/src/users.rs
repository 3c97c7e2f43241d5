// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User registration and lookup endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use mentora_core::types::User;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::handlers::{error_response, not_found};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub clerk_user_id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub data: User,
}

/// POST /users/register
///
/// Idempotent: registering an already-known clerk id returns the existing
/// row. The welcome email is best-effort and never blocks registration.
pub async fn post_register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Response {
    match state.storage.get_user_by_clerk_id(&body.clerk_user_id).await {
        Ok(Some(existing)) => {
            return Json(UserResponse {
                success: true,
                data: existing,
            })
            .into_response();
        }
        Ok(None) => {}
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }

    let now = Utc::now();
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        clerk_user_id: body.clerk_user_id.clone(),
        email: body.email.clone(),
        name: body.name.clone(),
        preferences: serde_json::json!({}),
        created_at: now,
        updated_at: now,
    };
    if let Err(e) = state.storage.create_user(&user).await {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
    }
    info!(clerk_user_id = %user.clerk_user_id, "registered user");

    let display_name = body.name.as_deref().unwrap_or("there");
    state.notifier.send_welcome(&body.email, display_name).await;

    (
        StatusCode::CREATED,
        Json(UserResponse {
            success: true,
            data: user,
        }),
    )
        .into_response()
}

/// GET /users/clerk/{clerk_user_id}
pub async fn get_user_by_clerk_id(
    State(state): State<AppState>,
    Path(clerk_user_id): Path<String>,
) -> Response {
    match state.storage.get_user_by_clerk_id(&clerk_user_id).await {
        Ok(Some(user)) => Json(UserResponse {
            success: true,
            data: user,
        })
        .into_response(),
        Ok(None) => not_found("user", &clerk_user_id),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// GET /users/email/{email}
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Response {
    match state.storage.get_user_by_email(&email).await {
        Ok(Some(user)) => Json(UserResponse {
            success: true,
            data: user,
        })
        .into_response(),
        Ok(None) => not_found("user", &email),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

#[derive(Debug, Deserialize)]
pub struct PreferencesRequest {
    pub preferences: serde_json::Value,
}

/// PATCH /users/{user_id}/preferences
pub async fn patch_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<PreferencesRequest>,
) -> Response {
    match state
        .storage
        .update_user_preferences(&user_id, &body.preferences)
        .await
    {
        Ok(()) => Json(serde_json::json!({ "success": true })).into_response(),
        Err(mentora_core::MentoraError::NotFound { .. }) => not_found("user", &user_id),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
