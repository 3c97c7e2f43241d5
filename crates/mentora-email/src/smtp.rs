// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMTP mailer over an SES-style submission relay.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use mentora_config::EmailConfig;
use mentora_core::types::{AdapterType, HealthStatus};
use mentora_core::{MailerAdapter, MentoraError, ServiceAdapter};
use tracing::debug;

#[derive(Debug)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    /// Builds a STARTTLS transport from the config. Fails when credentials
    /// are absent; callers treat that as "mail disabled".
    pub fn new(config: &EmailConfig) -> Result<Self, MentoraError> {
        let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password)
        else {
            return Err(MentoraError::Config(
                "smtp credentials are not configured".to_string(),
            ));
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| MentoraError::Mail {
                message: format!("invalid smtp relay {}", config.smtp_host),
                source: Some(Box::new(e)),
            })?
            .port(config.smtp_port)
            .credentials(Credentials::new(username.clone(), password.clone()))
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl ServiceAdapter for SmtpMailer {
    fn name(&self) -> &str {
        "smtp"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Mailer
    }

    async fn health_check(&self) -> Result<HealthStatus, MentoraError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(HealthStatus::Healthy),
            Ok(false) => Ok(HealthStatus::Unhealthy("smtp relay refused".to_string())),
            Err(e) => {
                debug!(error = %e, "smtp connection test failed");
                Ok(HealthStatus::Unhealthy(format!("smtp unreachable: {e}")))
            }
        }
    }

    async fn shutdown(&self) -> Result<(), MentoraError> {
        Ok(())
    }
}

#[async_trait]
impl MailerAdapter for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MentoraError> {
        let message = Message::builder()
            .from(self.from_address.parse().map_err(|e| MentoraError::Mail {
                message: format!("invalid from address {}", self.from_address),
                source: Some(Box::new(e)),
            })?)
            .to(to.parse().map_err(|e| MentoraError::Mail {
                message: format!("invalid recipient address {to}"),
                source: Some(Box::new(e)),
            })?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| MentoraError::Mail {
                message: "message construction failed".to_string(),
                source: Some(Box::new(e)),
            })?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MentoraError::Mail {
                message: format!("delivery to {to} failed"),
                source: Some(Box::new(e)),
            })?;
        Ok(())
    }
}
