// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for Mentora services.

pub mod adapter;
pub mod mailer;
pub mod provider;
pub mod storage;

pub use adapter::ServiceAdapter;
pub use mailer::MailerAdapter;
pub use provider::ProviderAdapter;
pub use storage::StorageAdapter;
