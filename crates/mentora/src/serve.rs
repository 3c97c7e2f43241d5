// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mentora serve` command implementation.
//!
//! Wires the planning engine, teaching assistant, assessments, code
//! sandbox, SQLite storage, and SMTP notifier into the HTTP gateway. Every
//! LLM-backed component degrades to its deterministic fallback when no
//! OpenAI key is configured, so the server is fully usable offline.

use std::sync::Arc;

use mentora_config::MentoraConfig;
use mentora_core::{MentoraError, ProviderAdapter, StorageAdapter};
use mentora_email::{Notifier, SmtpMailer};
use mentora_gateway::{server, AppState};
use mentora_openai::OpenAiProvider;
use mentora_planner::{LlmStrategy, PlanGenerator, PlanningEngine};
use mentora_sandbox::Sandbox;
use mentora_storage::SqliteStorage;
use mentora_teaching::{AssessmentBuilder, TeachingAssistant};
use tracing::{info, warn};

/// Runs the `mentora serve` command.
pub async fn run_serve(config: MentoraConfig) -> Result<(), MentoraError> {
    init_tracing(&config.agent.log_level);

    info!(name = %config.agent.name, "starting mentora serve");

    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;
    info!(path = %config.storage.database_path, "storage initialized");

    let provider: Option<Arc<dyn ProviderAdapter>> = if config.openai.api_key.is_some() {
        let provider = OpenAiProvider::new(config.openai.clone())?;
        info!(model = %config.openai.default_model, "openai provider configured");
        Some(Arc::new(provider))
    } else {
        info!("no openai key configured, running with template fallbacks");
        None
    };

    let generator = match &provider {
        Some(provider) => PlanGenerator::new(Arc::new(LlmStrategy::new(Arc::clone(provider)))),
        None => PlanGenerator::template_only(),
    };
    let engine = PlanningEngine::new(generator, provider.clone(), config.agent.max_questions);

    let mailer = match SmtpMailer::new(&config.email) {
        Ok(mailer) => Some(Arc::new(mailer) as Arc<dyn mentora_core::MailerAdapter>),
        Err(e) => {
            warn!(error = %e, "mail delivery disabled");
            None
        }
    };
    let notifier = Notifier::new(mailer, config.email.clone());

    let state = AppState {
        engine: Arc::new(engine),
        assistant: Arc::new(TeachingAssistant::new(provider.clone())),
        assessments: Arc::new(AssessmentBuilder::new(provider)),
        sandbox: Arc::new(Sandbox::new(&config.sandbox)),
        storage: storage.clone(),
        notifier: Arc::new(notifier),
    };

    let result = server::start_server(&config.gateway, state).await;

    if let Err(e) = storage.close().await {
        warn!(error = %e, "storage close failed");
    }
    info!("mentora serve shutdown complete");
    result
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mentora={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
