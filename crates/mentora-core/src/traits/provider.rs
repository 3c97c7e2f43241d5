// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for LLM provider integrations.

use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::error::MentoraError;
use crate::traits::adapter::ServiceAdapter;
use crate::types::{ProviderRequest, ProviderResponse, ProviderStreamChunk};

/// Adapter for LLM provider integrations.
///
/// Provider adapters handle communication with language model APIs,
/// supporting both single-shot completion and streaming responses.
#[async_trait]
pub trait ProviderAdapter: ServiceAdapter {
    /// Sends a completion request and returns the full response.
    async fn complete(&self, request: ProviderRequest)
    -> Result<ProviderResponse, MentoraError>;

    /// Sends a completion request and returns a stream of response chunks.
    async fn stream(
        &self,
        request: ProviderRequest,
    ) -> Result<
        Pin<Box<dyn Stream<Item = Result<ProviderStreamChunk, MentoraError>> + Send>>,
        MentoraError,
    >;
}
