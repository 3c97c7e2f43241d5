// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router construction and server startup.

use axum::routing::{get, patch, post};
use axum::Router;
use mentora_config::GatewayConfig;
use mentora_core::MentoraError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::{handlers, notifications, planning, settings, teaching, users, AppState};

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::get_root))
        .route("/health", get(handlers::get_health))
        .route("/chat", post(planning::post_chat))
        .route("/chat/stream", post(planning::post_chat_stream))
        .route("/chat/sessions/{clerk_user_id}", get(planning::get_chat_sessions))
        .route("/chat/messages/{session_id}", get(planning::get_chat_messages))
        .route("/learning-plan/{session_id}", get(planning::get_session_plan))
        .route(
            "/learning-plans/from-session",
            post(planning::post_plan_from_session),
        )
        .route("/learning-plans/{clerk_user_id}", get(planning::get_user_plans))
        .route("/teaching/chat", post(teaching::post_teaching_chat))
        .route(
            "/teaching/assessment/create",
            post(teaching::post_assessment_create),
        )
        .route(
            "/teaching/assessment/grade",
            post(teaching::post_assessment_grade),
        )
        .route(
            "/teaching/assessment/recommendations",
            post(teaching::post_assessment_recommendations),
        )
        .route(
            "/teaching/generate-diagram",
            post(teaching::post_generate_diagram),
        )
        .route("/teaching/execute-code", post(teaching::post_execute_code))
        .route("/users/register", post(users::post_register))
        .route("/users/clerk/{clerk_user_id}", get(users::get_user_by_clerk_id))
        .route("/users/email/{email}", get(users::get_user_by_email))
        .route("/users/{user_id}/preferences", patch(users::patch_preferences))
        .route("/notifications/welcome", post(notifications::post_welcome))
        .route(
            "/notifications/learning-plan-ready",
            post(notifications::post_plan_ready),
        )
        .route(
            "/notifications/progress-milestone",
            post(notifications::post_progress_milestone),
        )
        .route(
            "/notifications/daily-summary",
            post(notifications::post_daily_summary),
        )
        .route(
            "/notifications/weekly-report",
            post(notifications::post_weekly_report),
        )
        .route("/notifications/status", get(notifications::get_status))
        .route(
            "/settings/plan-ready-message",
            get(settings::get_plan_ready_message).put(settings::put_plan_ready_message),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds and serves until the process is stopped.
pub async fn start_server(config: &GatewayConfig, state: AppState) -> Result<(), MentoraError> {
    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| MentoraError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| MentoraError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
