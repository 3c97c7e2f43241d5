// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ProviderAdapter implementation over the OpenAI client.

use std::pin::Pin;

use async_trait::async_trait;
use futures::stream::{Stream, StreamExt};

use mentora_config::model::OpenAiConfig;
use mentora_core::types::{
    ChatRole, ProviderRequest, ProviderResponse, ProviderStreamChunk, TokenUsage,
};
use mentora_core::{
    AdapterType, HealthStatus, MentoraError, ProviderAdapter, ServiceAdapter,
};

use crate::client::OpenAiClient;
use crate::sse::StreamEvent;
use crate::types::{CompletionRequest, WireMessage};

/// OpenAI-backed provider adapter.
pub struct OpenAiProvider {
    client: OpenAiClient,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Result<Self, MentoraError> {
        let client = OpenAiClient::new(&config)?;
        Ok(Self { client, config })
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }

    fn to_wire(&self, request: &ProviderRequest) -> CompletionRequest {
        CompletionRequest {
            model: request
                .model
                .clone()
                .unwrap_or_else(|| self.client.default_model().to_string()),
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: match m.role {
                        ChatRole::System => "system",
                        ChatRole::User => "user",
                        ChatRole::Assistant => "assistant",
                    }
                    .to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            max_tokens: request.max_tokens.or(Some(self.config.max_tokens)),
            temperature: request.temperature.or(Some(self.config.temperature)),
            stream: false,
        }
    }
}

#[async_trait]
impl ServiceAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, MentoraError> {
        // No probe request: a healthy adapter is one with a usable key.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MentoraError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, MentoraError> {
        let wire = self.to_wire(&request);
        let response = self.client.complete(&wire).await?;

        let content = response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| MentoraError::Provider {
                message: "API response contained no choices".into(),
                source: None,
            })?;

        Ok(ProviderResponse {
            content,
            model: response.model,
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }

    async fn stream(
        &self,
        request: ProviderRequest,
    ) -> Result<
        Pin<Box<dyn Stream<Item = Result<ProviderStreamChunk, MentoraError>> + Send>>,
        MentoraError,
    > {
        let wire = self.to_wire(&request);
        let inner = self.client.stream(&wire).await?;

        let mapped = inner.filter_map(|event| async move {
            match event {
                Ok(StreamEvent::Chunk(chunk)) => {
                    let choice = chunk.choices.into_iter().next()?;
                    Some(Ok(ProviderStreamChunk {
                        delta: choice.delta.content.unwrap_or_default(),
                        finish_reason: choice.finish_reason,
                    }))
                }
                Ok(StreamEvent::Done) => None,
                Err(e) => Some(Err(e)),
            }
        });

        Ok(Box::pin(mapped))
    }
}
