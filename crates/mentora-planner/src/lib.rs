// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversational learning-plan agent for the Mentora platform.
//!
//! A finite-stage dialogue (initial, gathering, planning, complete) collects
//! a learner profile through keyword extraction and scripted follow-ups,
//! then produces a structured learning plan from either an LLM strategy or
//! a deterministic template.

pub mod engine;
pub mod extract;
pub mod generate;
pub mod plan;
pub mod profile;
pub mod stage;
pub mod store;

pub use engine::{EngineReply, PlanningEngine};
pub use generate::{LlmStrategy, PlanGenerator, PlanStrategy, TemplateStrategy};
pub use plan::{KanbanTask, Plan, PlanModule, TaskPriority, TaskStatus};
pub use profile::Profile;
pub use stage::Stage;
pub use store::{PlanningSession, Sender, SessionStore};
