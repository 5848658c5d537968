//! Production notifier dispatching to the configured delivery channels

use async_trait::async_trait;

use onbo_core::domain::entities::verification_session::DeliveryMethod;
use onbo_core::services::verification::Notifier;
use onbo_shared::config::NotifyConfig;

use crate::InfrastructureError;

use super::smtp_email::SmtpEmailSender;
use super::twilio_sms::TwilioSmsSender;

/// Notifier backed by real delivery channels.
///
/// Channels are optional: a deployment that only allows email delivery
/// need not configure Twilio. Requests for an unconfigured channel fail
/// as delivery errors, which the workflow surfaces as `DeliveryFailed`
/// while keeping staged records usable.
pub struct ChannelNotifier {
    email: Option<SmtpEmailSender>,
    sms: Option<TwilioSmsSender>,
}

impl ChannelNotifier {
    /// Build the notifier from delivery configuration.
    ///
    /// A channel is configured when its settings are present; an invalid
    /// configuration (as opposed to an absent one) is a startup error.
    pub fn new(config: &NotifyConfig) -> Result<Self, InfrastructureError> {
        let email = if config.smtp.username.is_empty() {
            None
        } else {
            Some(SmtpEmailSender::new(&config.smtp)?)
        };
        let sms = if config.twilio.account_sid.is_empty() {
            None
        } else {
            Some(TwilioSmsSender::new(&config.twilio)?)
        };

        Ok(Self { email, sms })
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn deliver_code(
        &self,
        contact: &str,
        method: DeliveryMethod,
        code: &str,
        expires_in_seconds: u64,
    ) -> Result<String, String> {
        let result = match method {
            DeliveryMethod::Email => match &self.email {
                Some(sender) => sender.send_code(contact, code, expires_in_seconds).await,
                None => Err(InfrastructureError::Notify(
                    "Email channel not configured".to_string(),
                )),
            },
            DeliveryMethod::Sms => match &self.sms {
                Some(sender) => sender.send_code(contact, code, expires_in_seconds).await,
                None => Err(InfrastructureError::Notify(
                    "SMS channel not configured".to_string(),
                )),
            },
        };

        result.map_err(|e| e.to_string())
    }
}
