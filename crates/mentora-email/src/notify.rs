// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed notification sends with per-type gating.
//!
//! Each send returns `bool`: `true` on delivery, `false` when the
//! notification is disabled or delivery fails. SMTP errors are logged and
//! swallowed; a broken relay must never take a request down with it.

use std::sync::Arc;

use chrono::Utc;
use mentora_config::EmailConfig;
use mentora_core::MailerAdapter;
use tracing::{info, warn};

/// Per-day stats for the daily summary mail.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DailySummary {
    pub time_spent_minutes: u32,
    pub lessons_completed: u32,
    pub avg_quiz_score: u32,
    pub ai_interactions: u32,
    pub streak_days: u32,
}

/// Per-week stats for the weekly report mail.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WeeklyReport {
    pub total_time_minutes: u32,
    pub lessons_completed: u32,
    pub avg_quiz_score: u32,
    pub topics_covered: Vec<String>,
}

pub struct Notifier {
    mailer: Option<Arc<dyn MailerAdapter>>,
    config: EmailConfig,
}

impl Notifier {
    pub fn new(mailer: Option<Arc<dyn MailerAdapter>>, config: EmailConfig) -> Self {
        Self { mailer, config }
    }

    /// The notification flags in effect, for status reporting.
    pub fn config(&self) -> &EmailConfig {
        &self.config
    }

    /// A notifier that drops everything, for deployments without SMTP.
    pub fn disabled() -> Self {
        Self {
            mailer: None,
            config: EmailConfig::default(),
        }
    }

    async fn deliver(&self, to: &str, subject: &str, body: &str) -> bool {
        if !self.config.notifications_enabled {
            info!(%to, "notifications disabled, skipping send");
            return false;
        }
        let Some(mailer) = &self.mailer else {
            info!(%to, "no mailer configured, skipping send");
            return false;
        };
        match mailer.send(to, subject, body).await {
            Ok(()) => {
                info!(%to, %subject, "notification sent");
                true
            }
            Err(e) => {
                warn!(%to, error = %e, "notification delivery failed");
                false
            }
        }
    }

    /// Gated only by the master flag.
    pub async fn send_welcome(&self, to: &str, name: &str) -> bool {
        let subject = "Welcome to Mentora - Your Learning Journey Begins!";
        let body = format!(
            "Hello {name}!\n\n\
             We're thrilled to have you join Mentora, where AI meets personalized \
             education.\n\n\
             What you can expect:\n\
             - Personalized learning plans built around your goals\n\
             - Progress tracking with detailed insights\n\
             - A tutor that adapts to your pace and learning style\n\n\
             Ready to start? Log in to your dashboard and begin your first lesson.\n\n\
             The Mentora Team"
        );
        self.deliver(to, subject, &body).await
    }

    /// Gated only by the master flag.
    pub async fn send_plan_ready(
        &self,
        to: &str,
        name: &str,
        plan_title: &str,
        plan_summary: &str,
    ) -> bool {
        let subject = format!("Your Learning Plan is Ready: {plan_title}");
        let body = format!(
            "Hello {name}!\n\n\
             Great news! We've crafted a personalized learning plan based on your \
             goals and preferences.\n\n\
             {plan_title}\n\
             {plan_summary}\n\n\
             Your plan includes customized learning objectives, curated modules, \
             and progress tracking with milestones.\n\n\
             Start your learning journey from your dashboard.\n\n\
             The Mentora Team"
        );
        self.deliver(to, &subject, &body).await
    }

    pub async fn send_progress_milestone(
        &self,
        to: &str,
        name: &str,
        milestone: &str,
        completion_percentage: f64,
    ) -> bool {
        if !self.config.progress_alerts {
            return false;
        }
        let subject = format!("Milestone Achieved: {milestone}");
        let body = format!(
            "Congratulations, {name}!\n\n\
             You've reached an important milestone in your learning journey:\n\n\
             {milestone}\n\n\
             Overall progress: {completion_percentage:.1}% complete.\n\n\
             Keep up the excellent work! Every step forward is a victory worth \
             celebrating.\n\n\
             The Mentora Team"
        );
        self.deliver(to, &subject, &body).await
    }

    pub async fn send_daily_summary(&self, to: &str, name: &str, summary: &DailySummary) -> bool {
        if !self.config.daily_summary {
            return false;
        }
        let subject = format!(
            "Your Daily Learning Summary - {}",
            Utc::now().format("%B %d, %Y")
        );
        let body = format!(
            "Great job today, {name}!\n\n\
             Minutes learned: {}\n\
             Lessons completed: {}\n\
             Average quiz score: {}%\n\
             Tutor conversations: {}\n\
             Day streak: {}\n\n\
             Tomorrow's goals: continue your streak, beat today's quiz score, and \
             explore a new topic with your tutor.\n\n\
             The Mentora Team",
            summary.time_spent_minutes,
            summary.lessons_completed,
            summary.avg_quiz_score,
            summary.ai_interactions,
            summary.streak_days,
        );
        self.deliver(to, &subject, &body).await
    }

    pub async fn send_weekly_report(&self, to: &str, name: &str, report: &WeeklyReport) -> bool {
        if !self.config.weekly_report {
            return false;
        }
        let subject = format!(
            "Your Weekly Learning Report - Week of {}",
            Utc::now().format("%B %d, %Y")
        );
        let topics = if report.topics_covered.is_empty() {
            "none yet".to_string()
        } else {
            report
                .topics_covered
                .iter()
                .take(10)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };
        let body = format!(
            "Hello {name}!\n\n\
             Here's a summary of your learning achievements this week:\n\n\
             Total learning time: {} minutes\n\
             Lessons completed: {}\n\
             Average quiz score: {}%\n\
             Topics covered: {topics}\n\n\
             Next week: keep the momentum going, explore new topics, and push \
             those quiz scores higher.\n\n\
             The Mentora Team",
            report.total_time_minutes, report.lessons_completed, report.avg_quiz_score,
        );
        self.deliver(to, &subject, &body).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mentora_core::types::{AdapterType, HealthStatus};
    use mentora_core::{MentoraError, ServiceAdapter};
    use tokio::sync::Mutex;

    use super::*;

    struct RecordingMailer {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl RecordingMailer {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                fail,
            })
        }
    }

    #[async_trait]
    impl ServiceAdapter for RecordingMailer {
        fn name(&self) -> &str {
            "recording"
        }

        fn version(&self) -> semver::Version {
            semver::Version::new(0, 1, 0)
        }

        fn adapter_type(&self) -> AdapterType {
            AdapterType::Mailer
        }

        async fn health_check(&self) -> Result<HealthStatus, MentoraError> {
            Ok(HealthStatus::Healthy)
        }

        async fn shutdown(&self) -> Result<(), MentoraError> {
            Ok(())
        }
    }

    #[async_trait]
    impl MailerAdapter for RecordingMailer {
        async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), MentoraError> {
            if self.fail {
                return Err(MentoraError::Mail {
                    message: "synthetic delivery failure".into(),
                    source: None,
                });
            }
            self.sent
                .lock()
                .await
                .push((to.to_string(), subject.to_string()));
            Ok(())
        }
    }

    fn enabled_config() -> EmailConfig {
        EmailConfig {
            notifications_enabled: true,
            ..EmailConfig::default()
        }
    }

    #[tokio::test]
    async fn master_flag_off_sends_nothing() {
        let mailer = RecordingMailer::new(false);
        let notifier = Notifier::new(Some(mailer.clone()), EmailConfig::default());
        assert!(!notifier.send_welcome("a@b.test", "Ada").await);
        assert!(mailer.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn welcome_ignores_per_type_flags() {
        let mailer = RecordingMailer::new(false);
        let notifier = Notifier::new(Some(mailer.clone()), enabled_config());
        assert!(notifier.send_welcome("a@b.test", "Ada").await);
        let sent = mailer.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.starts_with("Welcome to Mentora"));
    }

    #[tokio::test]
    async fn milestone_requires_progress_alerts_flag() {
        let mailer = RecordingMailer::new(false);
        let notifier = Notifier::new(Some(mailer.clone()), enabled_config());
        assert!(
            !notifier
                .send_progress_milestone("a@b.test", "Ada", "Module 1 done", 33.3)
                .await
        );

        let config = EmailConfig {
            progress_alerts: true,
            ..enabled_config()
        };
        let notifier = Notifier::new(Some(mailer.clone()), config);
        assert!(
            notifier
                .send_progress_milestone("a@b.test", "Ada", "Module 1 done", 33.3)
                .await
        );
        assert_eq!(
            mailer.sent.lock().await[0].1,
            "Milestone Achieved: Module 1 done"
        );
    }

    #[tokio::test]
    async fn daily_and_weekly_follow_their_flags() {
        let mailer = RecordingMailer::new(false);
        let config = EmailConfig {
            daily_summary: true,
            ..enabled_config()
        };
        let notifier = Notifier::new(Some(mailer.clone()), config);
        assert!(
            notifier
                .send_daily_summary("a@b.test", "Ada", &DailySummary::default())
                .await
        );
        assert!(
            !notifier
                .send_weekly_report("a@b.test", "Ada", &WeeklyReport::default())
                .await
        );
    }

    #[tokio::test]
    async fn delivery_failure_returns_false_not_error() {
        let mailer = RecordingMailer::new(true);
        let notifier = Notifier::new(Some(mailer), enabled_config());
        assert!(!notifier.send_welcome("a@b.test", "Ada").await);
    }

    #[tokio::test]
    async fn disabled_notifier_always_returns_false() {
        let notifier = Notifier::disabled();
        assert!(!notifier.send_welcome("a@b.test", "Ada").await);
    }
}
