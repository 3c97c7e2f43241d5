// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification trigger endpoints.
//!
//! Each endpoint reports whether the mail was actually sent; a `false`
//! means the relevant notification flag is off or delivery failed. Neither
//! case is an HTTP error.

use axum::extract::State;
use axum::Json;
use mentora_email::{DailySummary, WeeklyReport};
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SentResponse {
    pub success: bool,
    pub sent: bool,
}

fn sent(flag: bool) -> Json<SentResponse> {
    Json(SentResponse {
        success: true,
        sent: flag,
    })
}

#[derive(Debug, Deserialize)]
pub struct WelcomeRequest {
    pub email: String,
    pub name: String,
}

/// POST /notifications/welcome
pub async fn post_welcome(
    State(state): State<AppState>,
    Json(body): Json<WelcomeRequest>,
) -> Json<SentResponse> {
    sent(state.notifier.send_welcome(&body.email, &body.name).await)
}

#[derive(Debug, Deserialize)]
pub struct PlanReadyRequest {
    pub email: String,
    pub name: String,
    pub plan_title: String,
    #[serde(default)]
    pub plan_summary: String,
}

/// POST /notifications/learning-plan-ready
pub async fn post_plan_ready(
    State(state): State<AppState>,
    Json(body): Json<PlanReadyRequest>,
) -> Json<SentResponse> {
    sent(
        state
            .notifier
            .send_plan_ready(&body.email, &body.name, &body.plan_title, &body.plan_summary)
            .await,
    )
}

#[derive(Debug, Deserialize)]
pub struct MilestoneRequest {
    pub email: String,
    pub name: String,
    pub milestone: String,
    #[serde(default)]
    pub completion_percentage: f64,
}

/// POST /notifications/progress-milestone
pub async fn post_progress_milestone(
    State(state): State<AppState>,
    Json(body): Json<MilestoneRequest>,
) -> Json<SentResponse> {
    sent(
        state
            .notifier
            .send_progress_milestone(
                &body.email,
                &body.name,
                &body.milestone,
                body.completion_percentage,
            )
            .await,
    )
}

#[derive(Debug, Deserialize)]
pub struct DailySummaryRequest {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub summary: DailySummary,
}

/// POST /notifications/daily-summary
pub async fn post_daily_summary(
    State(state): State<AppState>,
    Json(body): Json<DailySummaryRequest>,
) -> Json<SentResponse> {
    sent(
        state
            .notifier
            .send_daily_summary(&body.email, &body.name, &body.summary)
            .await,
    )
}

#[derive(Debug, Deserialize)]
pub struct WeeklyReportRequest {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub report: WeeklyReport,
}

/// POST /notifications/weekly-report
pub async fn post_weekly_report(
    State(state): State<AppState>,
    Json(body): Json<WeeklyReportRequest>,
) -> Json<SentResponse> {
    sent(
        state
            .notifier
            .send_weekly_report(&body.email, &body.name, &body.report)
            .await,
    )
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub notifications_enabled: bool,
    pub daily_summary: bool,
    pub progress_alerts: bool,
    pub weekly_report: bool,
}

/// GET /notifications/status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let config = state.notifier.config();
    Json(StatusResponse {
        notifications_enabled: config.notifications_enabled,
        daily_summary: config.daily_summary,
        progress_alerts: config.progress_alerts,
        weekly_report: config.weekly_report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_summary_request_defaults_stats() {
        let req: DailySummaryRequest =
            serde_json::from_str(r#"{"email": "a@b.example", "name": "Ada"}"#).unwrap();
        assert_eq!(req.summary.lessons_completed, 0);
    }
}
