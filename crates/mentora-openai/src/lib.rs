// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI chat-completions provider adapter for the Mentora platform.

pub mod adapter;
pub mod client;
pub mod sse;
pub mod types;

pub use adapter::OpenAiProvider;
pub use client::OpenAiClient;
