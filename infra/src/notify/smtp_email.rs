//! SMTP email delivery for verification codes

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{debug, info};

use onbo_shared::config::SmtpConfig;
use onbo_shared::utils::mask_contact;

use crate::InfrastructureError;

use super::code_message;

/// Sends verification codes by email over SMTP
pub struct SmtpEmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    /// Create a new SMTP sender from configuration
    pub fn new(config: &SmtpConfig) -> Result<Self, InfrastructureError> {
        let from: Mailbox = config.from_address.parse().map_err(|e| {
            InfrastructureError::Config(format!("Invalid SMTP from address: {}", e))
        })?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP relay: {}", e)))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        info!("SMTP email sender initialized for relay: {}", config.host);

        Ok(Self { mailer, from })
    }

    /// Send a verification code; returns the SMTP response code as the
    /// delivery id
    pub async fn send_code(
        &self,
        email: &str,
        code: &str,
        expires_in_seconds: u64,
    ) -> Result<String, InfrastructureError> {
        let to: Mailbox = email.parse().map_err(|e| {
            InfrastructureError::Notify(format!("Invalid recipient address: {}", e))
        })?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject("Your Onbo verification code")
            .body(code_message(code, expires_in_seconds))
            .map_err(|e| InfrastructureError::Notify(format!("Failed to build email: {}", e)))?;

        let response = self
            .mailer
            .send(message)
            .await
            .map_err(|e| InfrastructureError::Notify(format!("SMTP send failed: {}", e)))?;

        debug!(
            recipient = %mask_contact(email),
            "Verification email accepted by relay"
        );

        Ok(format!("smtp-{}", response.code()))
    }
}
