// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end gateway tests against an in-process router backed by a
//! throwaway SQLite database. No provider is wired, so every engine runs
//! in its scripted-fallback mode.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use mentora_config::{SandboxConfig, StorageConfig};
use mentora_core::StorageAdapter;
use mentora_email::Notifier;
use mentora_gateway::{server, AppState};
use mentora_planner::{PlanGenerator, PlanningEngine};
use mentora_sandbox::Sandbox;
use mentora_storage::SqliteStorage;
use mentora_teaching::{AssessmentBuilder, TeachingAssistant};
use tempfile::TempDir;
use tower::ServiceExt;

async fn test_app() -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let storage = SqliteStorage::new(StorageConfig {
        database_path: dir
            .path()
            .join("mentora.db")
            .to_string_lossy()
            .into_owned(),
        wal_mode: false,
    });
    storage.initialize().await.unwrap();

    let state = AppState {
        engine: Arc::new(PlanningEngine::new(PlanGenerator::template_only(), None, 4)),
        assistant: Arc::new(TeachingAssistant::new(None)),
        assessments: Arc::new(AssessmentBuilder::new(None)),
        sandbox: Arc::new(Sandbox::new(&SandboxConfig::default())),
        storage: Arc::new(storage),
        notifier: Arc::new(Notifier::disabled()),
    };
    (server::router(state), dir)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn root_reports_service_identity() {
    let (app, _dir) = test_app().await;
    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["service"], "mentora");
}

#[tokio::test]
async fn health_is_ok_with_live_storage() {
    let (app, _dir) = test_app().await;
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "healthy");
}

#[tokio::test]
async fn chat_opens_a_session_and_greets() {
    let (app, _dir) = test_app().await;
    let request = json_request("POST", "/chat", serde_json::json!({ "message": "hello" }));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["stage"], "initial");
    assert_eq!(body["plan_ready"], false);
    assert!(body["session_id"].as_str().unwrap().starts_with("session_"));
}

#[tokio::test]
async fn full_conversation_produces_a_retrievable_plan() {
    let (app, _dir) = test_app().await;

    let first = json_request(
        "POST",
        "/chat",
        serde_json::json!({
            "message": "I want to learn python, I'm a complete beginner, hands-on"
        }),
    );
    let response = app.clone().oneshot(first).await.unwrap();
    let body = read_json(response).await;
    let session_id = body["session_id"].as_str().unwrap().to_string();
    assert_eq!(body["stage"], "gathering");

    let second = json_request(
        "POST",
        "/chat",
        serde_json::json!({
            "message": "about 10 hours a week, over 3 months, for career advancement",
            "session_id": session_id,
        }),
    );
    let response = app.clone().oneshot(second).await.unwrap();
    let body = read_json(response).await;
    assert_eq!(body["stage"], "complete");
    assert_eq!(body["plan_ready"], true);

    let session_id = body["session_id"].as_str().unwrap();
    let response = app
        .oneshot(
            Request::get(format!("/learning-plan/{session_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["subject"], "python");
    assert_eq!(body["data"]["total_duration_weeks"], 12);
    assert_eq!(body["data"]["modules"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn chat_with_user_persists_history() {
    let (app, _dir) = test_app().await;

    let request = json_request(
        "POST",
        "/chat",
        serde_json::json!({ "message": "hello", "clerk_user_id": "clerk_42" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let body = read_json(response).await;
    let session_id = body["session_id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::get(format!("/chat/messages/{session_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = read_json(response).await;
    let messages = body["data"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["sender"], "user");
    assert_eq!(messages[1]["sender"], "ai");

    let response = app
        .oneshot(
            Request::get("/chat/sessions/clerk_42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_plan_is_404() {
    let (app, _dir) = test_app().await;
    let response = app
        .oneshot(
            Request::get("/learning-plan/session_missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn register_then_lookup_and_plan_persistence() {
    let (app, _dir) = test_app().await;

    let request = json_request(
        "POST",
        "/users/register",
        serde_json::json!({
            "clerk_user_id": "clerk_7",
            "email": "ada@example.com",
            "name": "Ada",
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["data"]["email"], "ada@example.com");

    // Registering again returns the same row instead of erroring.
    let request = json_request(
        "POST",
        "/users/register",
        serde_json::json!({ "clerk_user_id": "clerk_7", "email": "ada@example.com" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Drive a session to completion, then persist its plan for the user.
    let request = json_request(
        "POST",
        "/chat",
        serde_json::json!({ "message": "teach me javascript, beginner, visual learner" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let body = read_json(response).await;
    let session_id = body["session_id"].as_str().unwrap().to_string();
    let request = json_request(
        "POST",
        "/chat",
        serde_json::json!({
            "message": "5 hours per week for 2 months",
            "session_id": session_id,
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let body = read_json(response).await;
    assert_eq!(body["plan_ready"], true);
    let session_id = body["session_id"].as_str().unwrap().to_string();

    let request = json_request(
        "POST",
        "/learning-plans/from-session",
        serde_json::json!({ "session_id": session_id, "clerk_user_id": "clerk_7" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let plan_id = body["plan_id"].as_str().unwrap().to_string();
    assert!(plan_id.starts_with("plan_"));

    let response = app
        .oneshot(
            Request::get("/learning-plans/clerk_7")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = read_json(response).await;
    let plans = body["data"].as_array().unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0]["subject"], "javascript");
}

#[tokio::test]
async fn unknown_user_lookup_is_404() {
    let (app, _dir) = test_app().await;
    let response = app
        .oneshot(
            Request::get("/users/clerk/clerk_nobody")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn teaching_chat_falls_back_without_provider() {
    let (app, _dir) = test_app().await;
    let request = json_request(
        "POST",
        "/teaching/chat",
        serde_json::json!({ "message": "explain recursion", "module": "Python Fundamentals" }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert!(body["response"].as_str().unwrap().contains("difficulty"));
    assert_eq!(body["current_concept"], "python_fundamentals");
    assert_eq!(body["trigger_assessment"], false);
}

#[tokio::test]
async fn assessment_create_grade_recommend_cycle() {
    let (app, _dir) = test_app().await;

    let request = json_request(
        "POST",
        "/teaching/assessment/create",
        serde_json::json!({ "concept": "variables", "subject": "python" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let body = read_json(response).await;
    let assessment = body["assessment"].clone();
    let questions = assessment["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);

    // Answer the fallback assessment correctly: option A and True.
    let request = json_request(
        "POST",
        "/teaching/assessment/grade",
        serde_json::json!({
            "assessment": assessment,
            "answers": [
                { "id": questions[0]["id"], "answer": 0 },
                { "id": questions[1]["id"], "answer": true },
            ],
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let body = read_json(response).await;
    assert_eq!(body["results"]["passed"], true);
    assert_eq!(body["results"]["score"], 2);

    let request = json_request(
        "POST",
        "/teaching/assessment/recommendations",
        serde_json::json!({ "results": body["results"] }),
    );
    let response = app.oneshot(request).await.unwrap();
    let body = read_json(response).await;
    assert_eq!(body["recommendations"]["should_continue"], true);
    assert_eq!(body["recommendations"]["next_action"], "continue_teaching");
}

#[tokio::test]
async fn generate_diagram_returns_inline_svg() {
    let (app, _dir) = test_app().await;
    let request = json_request(
        "POST",
        "/teaching/generate-diagram",
        serde_json::json!({ "concept": "neural networks", "subject": "artificial intelligence" }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["diagram_type"], "concept_illustration");
    assert!(body["diagram_url"]
        .as_str()
        .unwrap()
        .starts_with("data:image/svg+xml;base64,"));
}

#[tokio::test]
async fn execute_code_rejects_unknown_language() {
    let (app, _dir) = test_app().await;
    let request = json_request(
        "POST",
        "/teaching/execute-code",
        serde_json::json!({ "language": "cobol", "code": "DISPLAY 'HI'." }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn notifications_report_disabled_flags() {
    let (app, _dir) = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::get("/notifications/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["notifications_enabled"], false);

    let request = json_request(
        "POST",
        "/notifications/welcome",
        serde_json::json!({ "email": "ada@example.com", "name": "Ada" }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["sent"], false);
}

#[tokio::test]
async fn plan_ready_message_round_trips_and_overrides() {
    let (app, _dir) = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::get("/settings/plan-ready-message")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = read_json(response).await;
    assert!(body["message"].is_null());

    let request = json_request(
        "PUT",
        "/settings/plan-ready-message",
        serde_json::json!({ "message": "Head to your dashboard!" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::get("/settings/plan-ready-message")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["message"], "Head to your dashboard!");

    // The stored message closes the plan summary for new conversations.
    let request = json_request(
        "POST",
        "/chat",
        serde_json::json!({ "message": "learn python, beginner, hands-on" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let body = read_json(response).await;
    let session_id = body["session_id"].as_str().unwrap().to_string();
    let request = json_request(
        "POST",
        "/chat",
        serde_json::json!({ "message": "10 hours weekly for 3 months", "session_id": session_id }),
    );
    let response = app.oneshot(request).await.unwrap();
    let body = read_json(response).await;
    assert_eq!(body["plan_ready"], true);
    assert!(body["response"]
        .as_str()
        .unwrap()
        .contains("Head to your dashboard!"));
}

#[tokio::test]
async fn empty_plan_ready_message_is_rejected() {
    let (app, _dir) = test_app().await;
    let request = json_request(
        "PUT",
        "/settings/plan-ready-message",
        serde_json::json!({ "message": "   " }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
