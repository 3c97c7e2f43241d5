// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./mentora.toml` > `~/.config/mentora/mentora.toml` > `/etc/mentora/mentora.toml`
//! with environment variable overrides via `MENTORA_` prefix, plus the bare
//! process-env names the platform has always documented (`OPENAI_API_KEY`,
//! `SES_SMTP_*`, notification flags).

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::MentoraConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/mentora/mentora.toml` (system-wide)
/// 3. `~/.config/mentora/mentora.toml` (user XDG config)
/// 4. `./mentora.toml` (local directory)
/// 5. Legacy bare environment variables (`OPENAI_API_KEY`, `SES_SMTP_*`, ...)
/// 6. `MENTORA_*` environment variables
pub fn load_config() -> Result<MentoraConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a specific TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config file specification.
pub fn load_config_from_str(toml_content: &str) -> Result<MentoraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MentoraConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MentoraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MentoraConfig::default()))
        .merge(Toml::file(path))
        .merge(legacy_env_provider())
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(MentoraConfig::default()))
        .merge(Toml::file("/etc/mentora/mentora.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("mentora/mentora.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("mentora.toml"))
        .merge(legacy_env_provider())
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// CRITICAL: Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `MENTORA_OPENAI_API_KEY` must
/// map to `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("MENTORA_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: MENTORA_OPENAI_API_KEY -> "openai_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("email_", "email.", 1)
            .replacen("sandbox_", "sandbox.", 1);
        mapped.into()
    })
}

/// Bare env names carried over from earlier deployments of the platform.
///
/// These predate the `MENTORA_` prefix and remain the documented way to wire
/// the OpenAI key and SES credentials in hosting environments.
fn legacy_env_provider() -> Env {
    Env::raw()
        .only(&[
            "OPENAI_API_KEY",
            "OPENAI_MAX_TOKENS",
            "SES_SMTP_USERNAME",
            "SES_SMTP_PASSWORD",
            "SES_SMTP_HOST",
            "SES_SMTP_PORT",
            "NOTIFICATIONS_ENABLED",
            "DAILY_SUMMARY_ENABLED",
            "PROGRESS_ALERTS_ENABLED",
            "WEEKLY_REPORT_ENABLED",
        ])
        .map(|key| {
            let mapped = match key.as_str() {
                "OPENAI_API_KEY" | "openai_api_key" => "openai.api_key",
                "OPENAI_MAX_TOKENS" | "openai_max_tokens" => "openai.max_tokens",
                "SES_SMTP_USERNAME" | "ses_smtp_username" => "email.smtp_username",
                "SES_SMTP_PASSWORD" | "ses_smtp_password" => "email.smtp_password",
                "SES_SMTP_HOST" | "ses_smtp_host" => "email.smtp_host",
                "SES_SMTP_PORT" | "ses_smtp_port" => "email.smtp_port",
                "NOTIFICATIONS_ENABLED" | "notifications_enabled" => {
                    "email.notifications_enabled"
                }
                "DAILY_SUMMARY_ENABLED" | "daily_summary_enabled" => "email.daily_summary",
                "PROGRESS_ALERTS_ENABLED" | "progress_alerts_enabled" => {
                    "email.progress_alerts"
                }
                "WEEKLY_REPORT_ENABLED" | "weekly_report_enabled" => "email.weekly_report",
                other => other,
            };
            mapped.into()
        })
}
