// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The planning conversation engine.
//!
//! Routes each incoming message by session stage. Session state is mutated
//! synchronously under the store's shard lock; provider calls happen after
//! the lock is dropped, and a provider failure is always replaced by a
//! scripted reply. A session is never left in a broken state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mentora_core::traits::ProviderAdapter;
use mentora_core::types::{ChatMessage, ProviderRequest};
use mentora_core::SessionId;
use tracing::{debug, warn};

use crate::extract::extract;
use crate::generate::PlanGenerator;
use crate::plan::Plan;
use crate::profile::Profile;
use crate::stage::Stage;
use crate::store::{PlanningSession, Sender, SessionStore};

const GREETING_FALLBACK: &str = "Hello! I'm here to help you create a personalized \
     learning plan. What subject would you like to learn?";

const GATHERING_FALLBACK: &str =
    "Could you tell me about your experience level and learning preferences?";

const COMPLETE_ACK: &str =
    "Your learning plan is complete! You can now start your learning journey.";

const RESET_REPLY: &str = "Absolutely, let's start a new learning journey. \
     What subject would you like to learn?";

const DEFAULT_READY_MESSAGE: &str = "Ready to start learning? I can take you to your \
     personalized dashboard where you'll see your full plan, progress tracking, and \
     begin your first lesson.";

/// What the engine hands back to the HTTP layer for one message.
#[derive(Debug, Clone)]
pub struct EngineReply {
    pub message: String,
    pub session_id: SessionId,
    pub stage: Stage,
    pub plan_ready: bool,
    pub timestamp: DateTime<Utc>,
}

/// Decision produced under the session lock; awaited work happens after.
enum Routed {
    Reply(String),
    Greet { user_message: String },
    GeneratePlan { profile: Profile },
}

pub struct PlanningEngine {
    store: SessionStore,
    generator: PlanGenerator,
    provider: Option<Arc<dyn ProviderAdapter>>,
    max_questions: u32,
}

impl PlanningEngine {
    pub fn new(
        generator: PlanGenerator,
        provider: Option<Arc<dyn ProviderAdapter>>,
        max_questions: u32,
    ) -> Self {
        Self {
            store: SessionStore::new(),
            generator,
            provider,
            max_questions,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// The plan for a session, if one has been generated.
    pub fn plan(&self, session_id: &SessionId) -> Option<Plan> {
        self.store.get(session_id).and_then(|s| s.plan)
    }

    pub fn session(&self, session_id: &SessionId) -> Option<PlanningSession> {
        self.store.get(session_id)
    }

    /// Process one user message and produce the agent's reply.
    pub async fn handle_message(
        &self,
        session_id: Option<SessionId>,
        message: &str,
        plan_ready_message: Option<&str>,
    ) -> EngineReply {
        let id = session_id.unwrap_or_else(SessionStore::new_session_id);

        if wants_reset(message) {
            self.store.reset(&id);
            self.store.with_session(&id, |session| {
                session.record(Sender::User, message);
                session.record(Sender::Ai, RESET_REPLY);
            });
            return EngineReply {
                message: RESET_REPLY.to_string(),
                session_id: id,
                stage: Stage::Initial,
                plan_ready: false,
                timestamp: Utc::now(),
            };
        }

        let max_questions = self.max_questions;
        let routed = self.store.with_session(&id, |session| {
            session.record(Sender::User, message);
            extract(&mut session.profile, message);
            route(session, message, max_questions)
        });

        let reply = match routed {
            Routed::Reply(text) => text,
            Routed::Greet { user_message } => self.greet(&user_message).await,
            Routed::GeneratePlan { profile } => {
                let plan = self.generator.generate(&profile).await;
                let summary = format_plan_summary(&plan, plan_ready_message);
                self.store.with_session(&id, |session| {
                    session.plan = Some(plan);
                    session.stage = Stage::Complete;
                });
                summary
            }
        };

        let (stage, plan_ready) = self.store.with_session(&id, |session| {
            session.record(Sender::Ai, reply.clone());
            (session.stage, session.plan.is_some())
        });
        debug!(session = %id, %stage, "planning reply sent");

        EngineReply {
            message: reply,
            session_id: id,
            stage,
            plan_ready,
            timestamp: Utc::now(),
        }
    }

    /// Conversational opener via the provider, scripted greeting on any error.
    async fn greet(&self, user_message: &str) -> String {
        let Some(provider) = &self.provider else {
            return GREETING_FALLBACK.to_string();
        };
        let prompt = format!(
            "You are Mentora, a professional AI learning advisor.\n\n\
             The user said: \"{user_message}\"\n\n\
             Respond naturally and professionally. If they mention a specific subject \
             they want to learn, acknowledge it and ask about their experience level. \
             If they don't mention a subject, ask what they'd like to learn.\n\n\
             Keep the response conversational and under 100 words."
        );
        let request = ProviderRequest::new(vec![ChatMessage::system(prompt)]);
        match provider.complete(request).await {
            Ok(response) => response.content,
            Err(e) => {
                warn!(error = %e, "greeting generation failed, using scripted reply");
                GREETING_FALLBACK.to_string()
            }
        }
    }
}

fn wants_reset(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("new journey") || lower.contains("start over")
}

/// Stage dispatch. Runs under the session lock; must not await.
fn route(session: &mut PlanningSession, message: &str, max_questions: u32) -> Routed {
    match session.stage {
        Stage::Initial => {
            if session.profile.subject.is_some() {
                session.stage = Stage::Gathering;
                session.questions_asked += 1;
                Routed::Reply(next_question(&session.profile))
            } else {
                Routed::Greet {
                    user_message: message.to_string(),
                }
            }
        }
        Stage::Gathering => {
            if session.profile.is_complete() || session.questions_asked >= max_questions {
                session.stage = Stage::Planning;
                Routed::GeneratePlan {
                    profile: session.profile.clone(),
                }
            } else {
                session.questions_asked += 1;
                Routed::Reply(next_question(&session.profile))
            }
        }
        // A message landing while generation is in flight gets a holding
        // reply instead of kicking off a second generation.
        Stage::Planning => Routed::Reply(
            "Your learning plan is being prepared. Please wait while I finalize the details."
                .to_string(),
        ),
        Stage::Complete => Routed::Reply(COMPLETE_ACK.to_string()),
    }
}

/// The scripted follow-up for the first unfilled profile slot.
fn next_question(profile: &Profile) -> String {
    if profile.experience.is_none() {
        "What's your current experience level with this subject? Are you a complete \
         beginner, have some experience, or would you consider yourself advanced?"
    } else if profile.learning_style.is_none() {
        "How do you prefer to learn? Through videos and visual materials, hands-on \
         projects and practice, reading materials, or a mix of all styles?"
    } else if profile.time_commitment.is_none() {
        "How much time can you dedicate to learning each week? For example, 5-10 hours \
         per week?"
    } else if profile.timeline.is_none() {
        "What's your ideal timeline for completing this learning journey? A few weeks, \
         a couple of months, or do you prefer to take it slowly?"
    } else {
        GATHERING_FALLBACK
    }
    .to_string()
}

/// Human-readable plan announcement shown when generation finishes.
fn format_plan_summary(plan: &Plan, plan_ready_message: Option<&str>) -> String {
    let mut message = format!(
        "Perfect! I've created your personalized learning plan for {}.\n\n",
        plan.subject
    );
    message.push_str(&format!("{}\n{}\n\n", plan.title, plan.description));
    message.push_str(&format!("Duration: {} weeks\n", plan.total_duration_weeks));
    message.push_str(&format!("Difficulty: {}\n\n", plan.difficulty_level));
    message.push_str("Learning Modules:\n");
    for (i, module) in plan.modules.iter().enumerate() {
        message.push_str(&format!(
            "{}. {} ({} weeks)\n",
            i + 1,
            module.title,
            module.duration_weeks
        ));
    }
    message.push_str("\nYour complete learning plan with syllabus and progress tracking is ready!\n\n");
    let ready = plan_ready_message
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_READY_MESSAGE);
    message.push_str(ready);
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> PlanningEngine {
        PlanningEngine::new(PlanGenerator::template_only(), None, 4)
    }

    #[tokio::test]
    async fn first_message_without_subject_greets() {
        let engine = engine();
        let reply = engine.handle_message(None, "hello there", None).await;
        assert_eq!(reply.stage, Stage::Initial);
        assert!(!reply.plan_ready);
        assert_eq!(reply.message, GREETING_FALLBACK);
    }

    #[tokio::test]
    async fn subject_mention_advances_to_gathering() {
        let engine = engine();
        let reply = engine.handle_message(None, "I want to learn python", None).await;
        assert_eq!(reply.stage, Stage::Gathering);
        assert!(reply.message.contains("experience level"));
    }

    #[tokio::test]
    async fn complete_profile_yields_plan_in_one_conversation() {
        let engine = engine();
        let first = engine
            .handle_message(
                None,
                "I want to learn Python, I'm a beginner, I prefer hands-on projects",
                None,
            )
            .await;
        let id = first.session_id.clone();
        assert_eq!(first.stage, Stage::Gathering);
        assert!(first.message.contains("dedicate to learning each week"));

        let second = engine
            .handle_message(Some(id.clone()), "about 10 hours a week", None)
            .await;
        assert_eq!(second.stage, Stage::Complete);
        assert!(second.plan_ready);
        assert!(second.message.contains("Personalized Python Learning Plan"));
        assert!(second.message.contains("Duration: 12 weeks"));

        let plan = engine.plan(&id).unwrap();
        assert_eq!(plan.subject, "python");
        assert_eq!(plan.difficulty_level, "beginner");
        assert_eq!(plan.learning_style, "hands-on");
    }

    #[tokio::test]
    async fn question_cap_forces_plan_generation() {
        let engine = engine();
        let first = engine.handle_message(None, "teach me chemistry", None).await;
        let id = first.session_id.clone();

        // Four unhelpful answers exhaust the question budget.
        let mut last = first;
        for _ in 0..4 {
            last = engine
                .handle_message(Some(id.clone()), "hmm, not sure", None)
                .await;
        }
        assert_eq!(last.stage, Stage::Complete);
        assert!(last.plan_ready);
        let plan = engine.plan(&id).unwrap();
        assert_eq!(plan.subject, "chemistry");
        assert_eq!(plan.difficulty_level, "beginner");
    }

    #[tokio::test]
    async fn terminal_stage_returns_static_acknowledgment() {
        let engine = engine();
        let first = engine
            .handle_message(None, "python, beginner, hands-on, 5 hours", None)
            .await;
        let id = first.session_id.clone();
        let second = engine
            .handle_message(Some(id.clone()), "10 hours and I like videos", None)
            .await;
        assert_eq!(second.stage, Stage::Complete);

        let third = engine.handle_message(Some(id), "what now?", None).await;
        assert_eq!(third.message, COMPLETE_ACK);
        assert_eq!(third.stage, Stage::Complete);
    }

    #[tokio::test]
    async fn start_over_replaces_the_session() {
        let engine = engine();
        let first = engine.handle_message(None, "I want to learn physics", None).await;
        let id = first.session_id.clone();
        assert_eq!(first.stage, Stage::Gathering);

        let reset = engine
            .handle_message(Some(id.clone()), "let's start over", None)
            .await;
        assert_eq!(reset.stage, Stage::Initial);
        assert!(!reset.plan_ready);
        let session = engine.session(&id).unwrap();
        assert!(session.profile.subject.is_none());
    }

    #[tokio::test]
    async fn ready_message_override_is_appended() {
        let engine = engine();
        let first = engine
            .handle_message(None, "javascript, I'm a beginner, hands-on", None)
            .await;
        let id = first.session_id.clone();
        let done = engine
            .handle_message(Some(id), "10 hours a week", Some("Head to your dashboard!"))
            .await;
        assert!(done.message.ends_with("Head to your dashboard!"));
        assert!(!done.message.contains(DEFAULT_READY_MESSAGE));
    }

    #[tokio::test]
    async fn history_records_both_sides() {
        let engine = engine();
        let reply = engine.handle_message(None, "hello", None).await;
        let session = engine.session(&reply.session_id).unwrap();
        assert_eq!(session.history.len(), 2);
        assert_eq!(session.history[0].sender, Sender::User);
        assert_eq!(session.history[1].sender, Sender::Ai);
    }
}
