// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as API key format, valid bind addresses, and non-empty paths. API key
//! format failures are fatal at startup: a malformed key would otherwise
//! surface as silent template fallbacks on every LLM path.

use crate::diagnostic::ConfigError;
use crate::model::MentoraConfig;

/// Minimum accepted OpenAI API key length, including the `sk-` prefix.
const API_KEY_MIN_LEN: usize = 40;
/// Maximum accepted OpenAI API key length.
const API_KEY_MAX_LEN: usize = 200;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &MentoraConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate bind_address is not empty and looks like an IP or hostname
    let addr = config.gateway.bind_address.trim();
    if addr.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.bind_address must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!(
                    "gateway.bind_address `{addr}` is not a valid IP address or hostname"
                ),
            });
        }
    }

    // Validate database_path is not empty
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate API key format when one is configured
    if let Some(key) = &config.openai.api_key {
        validate_api_key(key, &mut errors);
    }

    // Validate sampling temperature range
    if !(0.0..=2.0).contains(&config.openai.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "openai.temperature must be between 0.0 and 2.0, got {}",
                config.openai.temperature
            ),
        });
    }

    if config.openai.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "openai.max_tokens must be greater than 0".to_string(),
        });
    }

    if config.sandbox.execution_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "sandbox.execution_timeout_secs must be greater than 0".to_string(),
        });
    }

    // Mail credentials must come in pairs
    if config.email.smtp_username.is_some() != config.email.smtp_password.is_some() {
        errors.push(ConfigError::Validation {
            message: "email.smtp_username and email.smtp_password must be set together"
                .to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// OpenAI key shape checks: `sk-` prefix, plausible length, no whitespace.
///
/// Catches the common deployment mistakes (truncated paste, quoted value,
/// wrong variable entirely) before the first request is ever made.
fn validate_api_key(key: &str, errors: &mut Vec<ConfigError>) {
    if !key.starts_with("sk-") {
        errors.push(ConfigError::Validation {
            message: "openai.api_key must start with `sk-`".to_string(),
        });
        return;
    }

    if key.len() < API_KEY_MIN_LEN || key.len() > API_KEY_MAX_LEN {
        errors.push(ConfigError::Validation {
            message: format!(
                "openai.api_key has implausible length {} (expected {API_KEY_MIN_LEN}-{API_KEY_MAX_LEN})",
                key.len()
            ),
        });
    }

    if key.chars().any(|c| c.is_whitespace()) {
        errors.push(ConfigError::Validation {
            message: "openai.api_key must not contain whitespace".to_string(),
        });
    }
}
