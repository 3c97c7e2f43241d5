// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The learning plan data model.

use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

/// A complete personalized learning plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub plan_id: String,
    pub title: String,
    pub description: String,
    pub subject: String,
    pub difficulty_level: String,
    pub learning_style: String,
    pub total_duration_weeks: u32,
    pub modules: Vec<PlanModule>,
    pub kanban_tasks: Vec<KanbanTask>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub learning_outcomes: Vec<String>,
}

/// One syllabus unit within a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanModule {
    pub title: String,
    pub description: String,
    pub duration_weeks: u32,
    #[serde(default)]
    pub key_concepts: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
}

/// A progress-tracking card derived from the plan's modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KanbanTask {
    pub task_id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub assigned_to: String,
    pub priority: TaskPriority,
    pub estimated_hours: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

/// Short random identifier with the given prefix, e.g. `plan_1a2b3c4d`.
pub(crate) fn short_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &hex[..8])
}

/// Capitalize the first letter of each whitespace-separated word.
pub(crate) fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_has_prefix_and_eight_hex_chars() {
        let id = short_id("plan");
        assert!(id.starts_with("plan_"));
        let suffix = &id["plan_".len()..];
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn title_case_capitalizes_each_word() {
        assert_eq!(title_case("machine learning"), "Machine Learning");
        assert_eq!(title_case("python"), "Python");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn task_status_serializes_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        assert_eq!(TaskStatus::Todo.to_string(), "todo");
    }

    #[test]
    fn plan_round_trips_through_json() {
        let plan = Plan {
            plan_id: "plan_00000000".into(),
            title: "Personalized Python Learning Plan".into(),
            description: "A comprehensive plan to master python".into(),
            subject: "python".into(),
            difficulty_level: "beginner".into(),
            learning_style: "hands-on".into(),
            total_duration_weeks: 12,
            modules: vec![PlanModule {
                title: "Python Fundamentals".into(),
                description: "Foundations".into(),
                duration_weeks: 4,
                key_concepts: vec!["Basic terminology".into()],
                activities: vec!["Quizzes".into()],
            }],
            kanban_tasks: vec![KanbanTask {
                task_id: "task_00000000".into(),
                title: "Complete Module 1: Fundamentals".into(),
                description: "Work through the first module".into(),
                status: TaskStatus::Todo,
                assigned_to: "Student".into(),
                priority: TaskPriority::High,
                estimated_hours: 40,
            }],
            prerequisites: vec![],
            learning_outcomes: vec!["Understand core python concepts".into()],
        };
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["kanban_tasks"][0]["status"], "todo");
        assert_eq!(json["kanban_tasks"][0]["priority"], "high");
        let back: Plan = serde_json::from_value(json).unwrap();
        assert_eq!(back, plan);
    }
}
