// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plan generation strategies.
//!
//! Two strategies behind one trait: a deterministic template and an LLM
//! prompt with strict JSON output. The generator is infallible by
//! construction: if the primary strategy fails, the template substitutes.
//! Exactly one substitution, never a retry loop.

use std::sync::Arc;

use async_trait::async_trait;
use mentora_core::json::extract_json;
use mentora_core::traits::ProviderAdapter;
use mentora_core::types::{ChatMessage, ProviderRequest};
use mentora_core::MentoraError;
use tracing::warn;

use crate::plan::{short_id, title_case, KanbanTask, Plan, PlanModule, TaskPriority, TaskStatus};
use crate::profile::Profile;

/// A way of turning a gathered profile into a learning plan.
#[async_trait]
pub trait PlanStrategy: Send + Sync {
    async fn generate(&self, profile: &Profile) -> Result<Plan, MentoraError>;
}

/// Deterministic 12-week curriculum: fundamentals, intermediate, advanced.
pub struct TemplateStrategy;

#[async_trait]
impl PlanStrategy for TemplateStrategy {
    async fn generate(&self, profile: &Profile) -> Result<Plan, MentoraError> {
        Ok(template_plan(profile))
    }
}

fn template_plan(profile: &Profile) -> Plan {
    let subject = profile.subject.as_deref().unwrap_or("the subject");
    let titled = title_case(subject);
    let difficulty = profile.experience.as_deref().unwrap_or("beginner");
    let style = profile.learning_style.as_deref().unwrap_or("mixed");

    Plan {
        plan_id: short_id("plan"),
        title: format!("Personalized {titled} Learning Plan"),
        description: format!("A comprehensive plan to master {subject}"),
        subject: subject.to_string(),
        difficulty_level: difficulty.to_string(),
        learning_style: style.to_string(),
        total_duration_weeks: 12,
        modules: vec![
            PlanModule {
                title: format!("{titled} Fundamentals"),
                description: format!("Core concepts and basics of {subject}"),
                duration_weeks: 4,
                key_concepts: strings(&["Basic terminology", "Core principles", "Essential tools"]),
                activities: strings(&["Interactive tutorials", "Practice exercises", "Quizzes"]),
            },
            PlanModule {
                title: format!("Intermediate {titled}"),
                description: format!("Building practical skills in {subject}"),
                duration_weeks: 4,
                key_concepts: strings(&["Advanced concepts", "Real applications", "Problem solving"]),
                activities: strings(&["Projects", "Case studies", "Hands-on practice"]),
            },
            PlanModule {
                title: format!("Advanced {titled} & Applications"),
                description: format!("Mastering {subject} and real-world applications"),
                duration_weeks: 4,
                key_concepts: strings(&["Expert techniques", "Industry practices", "Innovation"]),
                activities: strings(&["Capstone project", "Portfolio development", "Presentations"]),
            },
        ],
        kanban_tasks: vec![
            KanbanTask {
                task_id: short_id("task"),
                title: "Complete Module 1: Fundamentals".to_string(),
                description: format!("Master the basics of {subject}"),
                status: TaskStatus::Todo,
                assigned_to: "Student".to_string(),
                priority: TaskPriority::High,
                estimated_hours: 40,
            },
            KanbanTask {
                task_id: short_id("task"),
                title: "Complete Module 2: Intermediate Skills".to_string(),
                description: format!("Develop practical {subject} skills"),
                status: TaskStatus::Todo,
                assigned_to: "Student".to_string(),
                priority: TaskPriority::Medium,
                estimated_hours: 40,
            },
            KanbanTask {
                task_id: short_id("task"),
                title: "Complete Module 3: Advanced Applications".to_string(),
                description: format!("Master advanced {subject} concepts"),
                status: TaskStatus::Todo,
                assigned_to: "Student".to_string(),
                priority: TaskPriority::Medium,
                estimated_hours: 40,
            },
        ],
        prerequisites: vec![],
        learning_outcomes: vec![
            format!("Understand core {subject} concepts"),
            format!("Apply {subject} to solve real problems"),
            format!("Build projects using {subject}"),
            format!("Explain {subject} concepts to others"),
        ],
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Prompts the provider for a plan in strict JSON form.
pub struct LlmStrategy {
    provider: Arc<dyn ProviderAdapter>,
}

impl LlmStrategy {
    pub fn new(provider: Arc<dyn ProviderAdapter>) -> Self {
        Self { provider }
    }

    fn build_prompt(profile: &Profile) -> String {
        let subject = profile.subject.as_deref().unwrap_or("the subject");
        format!(
            "You are a curriculum designer. Create a personalized learning plan.\n\n\
             Learner profile:\n\
             - Subject: {subject}\n\
             - Experience: {}\n\
             - Learning style: {}\n\
             - Timeline: {}\n\
             - Time commitment: {}\n\n\
             Respond with ONLY a JSON object, no prose, matching exactly:\n\
             {{\n\
               \"plan_id\": \"string\",\n\
               \"title\": \"string\",\n\
               \"description\": \"string\",\n\
               \"subject\": \"string\",\n\
               \"difficulty_level\": \"beginner|intermediate|advanced\",\n\
               \"learning_style\": \"string\",\n\
               \"total_duration_weeks\": 12,\n\
               \"modules\": [{{\"title\": \"string\", \"description\": \"string\", \
             \"duration_weeks\": 4, \"key_concepts\": [\"string\"], \"activities\": [\"string\"]}}],\n\
               \"kanban_tasks\": [{{\"task_id\": \"string\", \"title\": \"string\", \
             \"description\": \"string\", \"status\": \"todo\", \"assigned_to\": \"Student\", \
             \"priority\": \"high|medium|low\", \"estimated_hours\": 40}}],\n\
               \"prerequisites\": [\"string\"],\n\
               \"learning_outcomes\": [\"string\"]\n\
             }}",
            profile.experience.as_deref().unwrap_or("not specified"),
            profile.learning_style.as_deref().unwrap_or("not specified"),
            profile.timeline.as_deref().unwrap_or("not specified"),
            profile.time_commitment.as_deref().unwrap_or("not specified"),
        )
    }
}

#[async_trait]
impl PlanStrategy for LlmStrategy {
    async fn generate(&self, profile: &Profile) -> Result<Plan, MentoraError> {
        let request = ProviderRequest::new(vec![
            ChatMessage::system(Self::build_prompt(profile)),
            ChatMessage::user("Create the learning plan now."),
        ]);
        let response = self.provider.complete(request).await?;
        let plan: Plan =
            extract_json(&response.content).map_err(|e| MentoraError::Provider {
                message: "plan JSON malformed".to_string(),
                source: Some(Box::new(e)),
            })?;
        if plan.modules.is_empty() || plan.kanban_tasks.is_empty() {
            return Err(MentoraError::Provider {
                message: "plan JSON missing modules or kanban tasks".to_string(),
                source: None,
            });
        }
        Ok(plan)
    }
}

/// Primary strategy plus the template as the single fallback.
///
/// `generate` cannot fail: a primary error is logged and the template
/// answers instead. The template itself is infallible.
pub struct PlanGenerator {
    primary: Arc<dyn PlanStrategy>,
}

impl PlanGenerator {
    pub fn new(primary: Arc<dyn PlanStrategy>) -> Self {
        Self { primary }
    }

    /// Template-only generator, used when no provider is configured.
    pub fn template_only() -> Self {
        Self {
            primary: Arc::new(TemplateStrategy),
        }
    }

    pub async fn generate(&self, profile: &Profile) -> Plan {
        match self.primary.generate(profile).await {
            Ok(plan) => plan,
            Err(e) => {
                warn!(error = %e, "plan strategy failed, using template");
                template_plan(profile)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct FailingStrategy {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PlanStrategy for FailingStrategy {
        async fn generate(&self, _profile: &Profile) -> Result<Plan, MentoraError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(MentoraError::Provider {
                message: "synthetic failure".to_string(),
                source: None,
            })
        }
    }

    fn gathered_profile() -> Profile {
        Profile {
            subject: Some("machine learning".into()),
            experience: Some("beginner".into()),
            learning_style: Some("hands-on".into()),
            ..Profile::default()
        }
    }

    #[tokio::test]
    async fn template_produces_three_modules_over_twelve_weeks() {
        let plan = TemplateStrategy.generate(&gathered_profile()).await.unwrap();
        assert_eq!(plan.title, "Personalized Machine Learning Learning Plan");
        assert_eq!(plan.total_duration_weeks, 12);
        assert_eq!(plan.modules.len(), 3);
        assert!(plan.modules.iter().all(|m| m.duration_weeks == 4));
        assert_eq!(plan.kanban_tasks.len(), 3);
        assert_eq!(plan.kanban_tasks[0].priority, TaskPriority::High);
        assert_eq!(plan.kanban_tasks[1].priority, TaskPriority::Medium);
        assert!(plan.kanban_tasks.iter().all(|t| t.estimated_hours == 40));
        assert_eq!(plan.learning_outcomes.len(), 4);
    }

    #[tokio::test]
    async fn template_defaults_for_sparse_profile() {
        let plan = TemplateStrategy.generate(&Profile::default()).await.unwrap();
        assert_eq!(plan.subject, "the subject");
        assert_eq!(plan.difficulty_level, "beginner");
        assert_eq!(plan.learning_style, "mixed");
    }

    #[tokio::test]
    async fn generator_falls_back_exactly_once() {
        let failing = Arc::new(FailingStrategy {
            calls: AtomicUsize::new(0),
        });
        let generator = PlanGenerator::new(failing.clone());
        let plan = generator.generate(&gathered_profile()).await;
        assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
        assert_eq!(plan.modules.len(), 3);
        assert_eq!(plan.subject, "machine learning");
    }

    #[tokio::test]
    async fn generator_is_infallible_on_empty_profile() {
        let plan = PlanGenerator::template_only().generate(&Profile::default()).await;
        assert!(!plan.modules.is_empty());
    }

    #[test]
    fn llm_prompt_embeds_profile() {
        let prompt = LlmStrategy::build_prompt(&gathered_profile());
        assert!(prompt.contains("Subject: machine learning"));
        assert!(prompt.contains("Experience: beginner"));
        assert!(prompt.contains("kanban_tasks"));
    }
}
