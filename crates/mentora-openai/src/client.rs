// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI chat-completions API.
//!
//! Provides [`OpenAiClient`] which handles request construction,
//! authentication, and streaming SSE responses. Failed requests are NOT
//! retried here: every LLM call site in the platform substitutes a
//! deterministic fallback instead, so the error must surface immediately.

use std::pin::Pin;
use std::time::Duration;

use futures::Stream;
use mentora_core::MentoraError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use mentora_config::model::OpenAiConfig;

use crate::sse::{self, StreamEvent};
use crate::types::{ApiErrorResponse, CompletionRequest, CompletionResponse};

/// HTTP client for OpenAI API communication.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    default_model: String,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new OpenAI API client from configuration.
    ///
    /// Fails when no API key is configured or the key cannot be used as a
    /// header value.
    pub fn new(config: &OpenAiConfig) -> Result<Self, MentoraError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| MentoraError::Config("openai.api_key is not set".into()))?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| MentoraError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| MentoraError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            default_model: config.default_model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the default model identifier.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Sends a non-streaming request and returns the full response.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, MentoraError> {
        let mut req = request.clone();
        req.stream = false;

        let response = self
            .client
            .post(self.completions_url())
            .json(&req)
            .send()
            .await
            .map_err(|e| MentoraError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %req.model, "completion response received");

        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        let body = response.text().await.map_err(|e| MentoraError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| MentoraError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Sends a streaming request and returns a stream of SSE events.
    pub async fn stream(
        &self,
        request: &CompletionRequest,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<StreamEvent, MentoraError>> + Send>>, MentoraError>
    {
        let mut req = request.clone();
        req.stream = true;

        let response = self
            .client
            .post(self.completions_url())
            .json(&req)
            .send()
            .await
            .map_err(|e| MentoraError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %req.model, "streaming response received");

        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        Ok(sse::parse_sse_stream(response))
    }
}

/// Turn a non-2xx response into a provider error, preferring the API's own
/// error envelope when the body parses.
async fn api_error(status: reqwest::StatusCode, response: reqwest::Response) -> MentoraError {
    let body = response.text().await.unwrap_or_default();
    let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
        format!(
            "OpenAI API error ({}): {}",
            api_err.error.type_.as_deref().unwrap_or("unknown"),
            api_err.error.message
        )
    } else {
        format!("API returned {status}: {body}")
    };
    MentoraError::Provider {
        message,
        source: None,
    }
}
