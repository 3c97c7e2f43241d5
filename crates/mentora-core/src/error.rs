// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Mentora platform.

use thiserror::Error;

/// The primary error type used across all Mentora adapter traits and core operations.
#[derive(Debug, Error)]
pub enum MentoraError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// LLM provider errors (API failure, token limits, model not found).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Mail delivery errors (SMTP connection, authentication, send failure).
    #[error("mail error: {message}")]
    Mail {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Code execution errors (unsupported language, spawn failure).
    #[error("execution error: {0}")]
    Execution(String),

    /// Requested entity does not exist.
    #[error("not found: {kind}/{id}")]
    NotFound { kind: String, id: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MentoraError {
    /// Wraps an arbitrary error as a provider failure with context.
    pub fn provider(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        MentoraError::Provider {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Wraps an arbitrary error as a storage failure.
    pub fn storage(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        MentoraError::Storage {
            source: Box::new(source),
        }
    }
}
