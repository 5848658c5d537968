//! Twilio SMS delivery for verification codes
//!
//! Calls the Twilio Messages REST API directly with basic auth; the
//! returned message SID becomes the delivery id.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use onbo_shared::config::TwilioConfig;
use onbo_shared::utils::mask_contact;

use crate::InfrastructureError;

use super::code_message;

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
}

/// Sends verification codes over the Twilio SMS API
pub struct TwilioSmsSender {
    client: Client,
    account_sid: String,
    from_number: String,
    auth_header: String,
}

impl TwilioSmsSender {
    /// Create a new Twilio sender from configuration
    pub fn new(config: &TwilioConfig) -> Result<Self, InfrastructureError> {
        if config.account_sid.is_empty() || config.auth_token.is_empty() {
            return Err(InfrastructureError::Config(
                "Twilio credentials not configured".to_string(),
            ));
        }
        if !config.from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "Twilio from number must be in E.164 format".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                InfrastructureError::Config(format!("Failed to build HTTP client: {}", e))
            })?;

        let auth_header = format!(
            "Basic {}",
            BASE64.encode(format!("{}:{}", config.account_sid, config.auth_token))
        );

        info!(
            "Twilio SMS sender initialized with from number: {}",
            mask_contact(&config.from_number)
        );

        Ok(Self {
            client,
            account_sid: config.account_sid.clone(),
            from_number: config.from_number.clone(),
            auth_header,
        })
    }

    /// Send a verification code; returns the Twilio message SID
    pub async fn send_code(
        &self,
        phone: &str,
        code: &str,
        expires_in_seconds: u64,
    ) -> Result<String, InfrastructureError> {
        let url = format!(
            "{}/Accounts/{}/Messages.json",
            TWILIO_API_BASE, self.account_sid
        );
        let body = code_message(code, expires_in_seconds);

        let response = self
            .client
            .post(&url)
            .header("Authorization", &self.auth_header)
            .form(&[
                ("To", phone),
                ("From", self.from_number.as_str()),
                ("Body", body.as_str()),
            ])
            .send()
            .await
            .map_err(|e| InfrastructureError::Notify(format!("Twilio request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Notify(format!(
                "Twilio returned {}: {}",
                status, detail
            )));
        }

        let message: MessageResponse = response.json().await.map_err(|e| {
            InfrastructureError::Notify(format!("Unexpected Twilio response: {}", e))
        })?;

        debug!(
            recipient = %mask_contact(phone),
            message_sid = %message.sid,
            "Verification SMS accepted by Twilio"
        );

        Ok(message.sid)
    }
}
