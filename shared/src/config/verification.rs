//! Verification code policy configuration

use serde::{Deserialize, Serialize};

/// Default number of seconds a code and its staged records stay valid
pub const DEFAULT_CODE_TTL_SECONDS: u64 = 600;

/// Default verification code length
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Verification code policy configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Length of generated codes
    pub code_length: usize,

    /// Code alphabet: "numeric" or "alphanumeric"
    pub code_alphabet: String,

    /// Seconds before a code and its staged registration expire
    pub code_ttl_seconds: u64,

    /// Fixed code returned instead of a random one. Test/staging only;
    /// must never be set in production deployments.
    #[serde(default)]
    pub fixed_code: Option<String>,

    /// Delivery methods the service will accept ("email", "sms")
    pub allowed_delivery_methods: Vec<String>,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            code_alphabet: String::from("numeric"),
            code_ttl_seconds: DEFAULT_CODE_TTL_SECONDS,
            fixed_code: None,
            allowed_delivery_methods: vec![String::from("email"), String::from("sms")],
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_length: std::env::var("VERIFICATION_CODE_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.code_length),
            code_alphabet: std::env::var("VERIFICATION_CODE_ALPHABET")
                .unwrap_or(defaults.code_alphabet),
            code_ttl_seconds: std::env::var("VERIFICATION_CODE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.code_ttl_seconds),
            fixed_code: std::env::var("VERIFICATION_FIXED_CODE").ok().filter(|v| !v.is_empty()),
            allowed_delivery_methods: std::env::var("VERIFICATION_DELIVERY_METHODS")
                .map(|v| v.split(',').map(|m| m.trim().to_lowercase()).collect())
                .unwrap_or(defaults.allowed_delivery_methods),
        }
    }
}
