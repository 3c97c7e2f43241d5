// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Teaching chat, assessments, and code execution endpoints.

use std::str::FromStr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use futures::StreamExt;
use mentora_sandbox::Language;
use mentora_teaching::{Assessment, GradeResult, TeachingContext, UserAnswer};
use serde::{Deserialize, Serialize};

use crate::handlers::error_response;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TeachingChatRequest {
    pub message: String,
    #[serde(default)]
    pub stream: bool,
    #[serde(default)]
    pub plan_id: Option<String>,
    /// Index into the plan's module list.
    #[serde(default)]
    pub module_id: Option<usize>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub current_concept: Option<String>,
    #[serde(default)]
    pub learning_style: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TeachingChatResponse {
    pub response: String,
    pub current_concept: String,
    pub should_generate_visual: bool,
    pub trigger_assessment: bool,
    pub timestamp: String,
}

/// Builds the teaching context, preferring explicit request fields and
/// filling gaps from the stored plan when a `plan_id` is supplied.
async fn resolve_context(state: &AppState, body: &TeachingChatRequest) -> TeachingContext {
    let mut context = TeachingContext {
        subject: body.subject.clone(),
        module: body.module.clone(),
        current_concept: body.current_concept.clone(),
        learning_style: body.learning_style.clone(),
        difficulty: body.difficulty.clone(),
    };

    let Some(plan_id) = &body.plan_id else {
        return context;
    };
    let stored = match state.storage.get_plan(plan_id).await {
        Ok(Some(stored)) => stored,
        Ok(None) | Err(_) => return context,
    };
    let Ok(plan) = serde_json::from_value::<mentora_planner::Plan>(stored.plan_data) else {
        return context;
    };

    if context.subject.is_none() {
        context.subject = Some(plan.subject);
    }
    if context.learning_style.is_none() {
        context.learning_style = Some(plan.learning_style);
    }
    if context.difficulty.is_none() {
        context.difficulty = Some(plan.difficulty_level);
    }
    if context.module.is_none() {
        let index = body.module_id.unwrap_or(0);
        if let Some(module) = plan.modules.get(index) {
            context.module = Some(module.title.clone());
        }
    }
    context
}

/// POST /teaching/chat
///
/// With `"stream": true` the reply arrives as SSE `content` chunks followed
/// by a `complete` event carrying the turn metadata.
pub async fn post_teaching_chat(
    State(state): State<AppState>,
    Json(body): Json<TeachingChatRequest>,
) -> Response {
    let context = resolve_context(&state, &body).await;

    if body.stream {
        let chunks = state.assistant.stream_chat(&body.message, &context).await;
        let concept = context.current_concept.clone();
        let events = chunks
            .map(|delta| {
                Ok::<_, std::convert::Infallible>(
                    Event::default()
                        .event("content")
                        .data(serde_json::json!({ "content": delta }).to_string()),
                )
            })
            .chain(futures::stream::once(async move {
                Ok(Event::default()
                    .event("complete")
                    .data(serde_json::json!({ "current_concept": concept }).to_string()))
            }));
        return Sse::new(events).into_response();
    }

    let reply = state.assistant.chat(&body.message, &context).await;
    Json(TeachingChatResponse {
        response: reply.response,
        current_concept: reply.current_concept,
        should_generate_visual: reply.should_generate_visual,
        trigger_assessment: reply.trigger_assessment,
        timestamp: Utc::now().to_rfc3339(),
    })
    .into_response()
}

#[derive(Debug, Deserialize)]
pub struct AssessmentCreateRequest {
    pub concept: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub learning_style: Option<String>,
    #[serde(default)]
    pub previous_responses: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AssessmentCreateResponse {
    pub success: bool,
    pub assessment: Assessment,
}

/// POST /teaching/assessment/create
pub async fn post_assessment_create(
    State(state): State<AppState>,
    Json(body): Json<AssessmentCreateRequest>,
) -> Json<AssessmentCreateResponse> {
    let assessment = state
        .assessments
        .create(
            &body.concept,
            body.subject.as_deref().unwrap_or("the subject"),
            body.difficulty.as_deref().unwrap_or("intermediate"),
            body.learning_style.as_deref().unwrap_or("mixed"),
            &body.previous_responses,
        )
        .await;
    Json(AssessmentCreateResponse {
        success: true,
        assessment,
    })
}

#[derive(Debug, Deserialize)]
pub struct AssessmentGradeRequest {
    pub answers: Vec<UserAnswer>,
    pub assessment: Assessment,
}

#[derive(Debug, Serialize)]
pub struct AssessmentGradeResponse {
    pub success: bool,
    pub results: GradeResult,
}

/// POST /teaching/assessment/grade
pub async fn post_assessment_grade(
    Json(body): Json<AssessmentGradeRequest>,
) -> Json<AssessmentGradeResponse> {
    let results = mentora_teaching::assessment::grade(&body.answers, &body.assessment);
    Json(AssessmentGradeResponse {
        success: true,
        results,
    })
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsRequest {
    pub results: GradeResult,
}

/// POST /teaching/assessment/recommendations
pub async fn post_assessment_recommendations(
    Json(body): Json<RecommendationsRequest>,
) -> Response {
    let recommendation = mentora_teaching::assessment::recommendations(&body.results);
    Json(serde_json::json!({
        "success": true,
        "recommendations": recommendation,
    }))
    .into_response()
}

#[derive(Debug, Deserialize)]
pub struct GenerateDiagramRequest {
    pub concept: String,
    #[serde(rename = "type", default = "default_diagram_type")]
    pub diagram_type: String,
    #[serde(default = "default_diagram_subject")]
    pub subject: String,
}

fn default_diagram_type() -> String {
    "concept_illustration".to_string()
}

fn default_diagram_subject() -> String {
    "General".to_string()
}

#[derive(Debug, Serialize)]
pub struct GenerateDiagramResponse {
    pub success: bool,
    pub diagram_url: String,
    pub diagram_type: String,
    pub concept: String,
}

/// POST /teaching/generate-diagram
///
/// Renders an inline SVG placeholder as a data URL; no image service is
/// called.
pub async fn post_generate_diagram(
    Json(body): Json<GenerateDiagramRequest>,
) -> Json<GenerateDiagramResponse> {
    let diagram_url =
        mentora_teaching::make_diagram_data_url(&body.concept, &body.subject, &body.diagram_type);
    Json(GenerateDiagramResponse {
        success: true,
        diagram_url,
        diagram_type: body.diagram_type,
        concept: body.concept,
    })
}

#[derive(Debug, Deserialize)]
pub struct ExecuteCodeRequest {
    pub language: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct ExecuteCodeResponse {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

/// POST /teaching/execute-code
pub async fn post_execute_code(
    State(state): State<AppState>,
    Json(body): Json<ExecuteCodeRequest>,
) -> Response {
    let language = match Language::from_str(&body.language) {
        Ok(language) => language,
        Err(_) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("unsupported language: {}", body.language),
            )
        }
    };
    match state.sandbox.run(language, &body.code).await {
        Ok(result) => Json(ExecuteCodeResponse {
            success: result.success,
            stdout: result.stdout,
            stderr: result.stderr,
            exit_code: result.exit_code,
        })
        .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_request_parses() {
        let req: ExecuteCodeRequest =
            serde_json::from_str(r#"{"language": "python", "code": "print(1)"}"#).unwrap();
        assert_eq!(req.language, "python");
    }

    #[test]
    fn teaching_request_defaults_are_optional() {
        let req: TeachingChatRequest =
            serde_json::from_str(r#"{"message": "teach me loops"}"#).unwrap();
        assert!(!req.stream);
        assert!(req.plan_id.is_none());
        assert!(req.module_id.is_none());
    }
}
