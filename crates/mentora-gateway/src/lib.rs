// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Mentora platform.
//!
//! Exposes the planning agent, teaching assistant, assessments, code
//! execution, user management, and notifications as a JSON REST API with
//! SSE streaming for chat. Handler-level provider failures never surface
//! as 500s; the underlying engines substitute scripted replies.

pub mod handlers;
pub mod notifications;
pub mod planning;
pub mod server;
pub mod settings;
pub mod teaching;
pub mod users;

use std::sync::Arc;

use mentora_core::StorageAdapter;
use mentora_email::Notifier;
use mentora_planner::PlanningEngine;
use mentora_sandbox::Sandbox;
use mentora_teaching::{AssessmentBuilder, TeachingAssistant};

/// Shared state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<PlanningEngine>,
    pub assistant: Arc<TeachingAssistant>,
    pub assessments: Arc<AssessmentBuilder>,
    pub sandbox: Arc<Sandbox>,
    pub storage: Arc<dyn StorageAdapter>,
    pub notifier: Arc<Notifier>,
}
