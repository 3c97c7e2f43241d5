// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound email notifications for the Mentora platform.

pub mod notify;
pub mod smtp;

pub use notify::{DailySummary, Notifier, WeeklyReport};
pub use smtp::SmtpMailer;
