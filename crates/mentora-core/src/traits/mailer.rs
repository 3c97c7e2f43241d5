// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mailer adapter trait for outbound notification delivery.

use async_trait::async_trait;

use crate::error::MentoraError;
use crate::traits::adapter::ServiceAdapter;

/// Adapter for outbound mail delivery.
///
/// Mailer adapters send plain-text notification mail. Delivery failures
/// are reported as errors here; callers decide whether a failure is fatal
/// (notification sends are not).
#[async_trait]
pub trait MailerAdapter: ServiceAdapter {
    /// Sends a plain-text message to a single recipient.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MentoraError>;
}
