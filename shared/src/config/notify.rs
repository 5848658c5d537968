//! Delivery channel configuration (SMTP email and Twilio SMS)

use serde::{Deserialize, Serialize};

/// SMTP configuration for email delivery
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// SMTP relay host
    pub host: String,

    /// SMTP port
    pub port: u16,

    /// SMTP username
    pub username: String,

    /// SMTP password
    pub password: String,

    /// From address for outgoing mail
    pub from_address: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: 587,
            username: String::new(),
            password: String::new(),
            from_address: String::from("no-reply@onbo.app"),
            timeout_secs: 10,
        }
    }
}

impl SmtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SMTP_HOST").unwrap_or(defaults.host),
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            username: std::env::var("SMTP_USERNAME").unwrap_or(defaults.username),
            password: std::env::var("SMTP_PASSWORD").unwrap_or(defaults.password),
            from_address: std::env::var("SMTP_FROM_ADDRESS").unwrap_or(defaults.from_address),
            timeout_secs: std::env::var("SMTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

/// Twilio configuration for SMS delivery
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,

    /// Twilio Auth Token
    pub auth_token: String,

    /// From phone number (must be a Twilio phone number, E.164)
    pub from_number: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            timeout_secs: 10,
        }
    }
}

impl TwilioConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            account_sid: std::env::var("TWILIO_ACCOUNT_SID").unwrap_or(defaults.account_sid),
            auth_token: std::env::var("TWILIO_AUTH_TOKEN").unwrap_or(defaults.auth_token),
            from_number: std::env::var("TWILIO_FROM_NUMBER").unwrap_or(defaults.from_number),
            timeout_secs: std::env::var("TWILIO_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

/// Combined delivery channel configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotifyConfig {
    /// SMTP settings for the email channel
    pub smtp: SmtpConfig,

    /// Twilio settings for the SMS channel
    pub twilio: TwilioConfig,

    /// Use the console mock notifier instead of real channels
    #[serde(default)]
    pub use_mock: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            smtp: SmtpConfig::default(),
            twilio: TwilioConfig::default(),
            use_mock: false,
        }
    }
}

impl NotifyConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            smtp: SmtpConfig::from_env(),
            twilio: TwilioConfig::from_env(),
            use_mock: std::env::var("NOTIFY_USE_MOCK")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}
