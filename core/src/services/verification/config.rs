//! Configuration for the verification workflow

use crate::domain::entities::verification_session::DeliveryMethod;

use super::code_generator::CodeAlphabet;

/// Default number of seconds a code and its staged records stay valid
pub const DEFAULT_CODE_TTL_SECONDS: u64 = 600;

/// Default length of generated verification codes
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Configuration for the verification workflow
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Length of generated codes
    pub code_length: usize,

    /// Alphabet codes are drawn from
    pub code_alphabet: CodeAlphabet,

    /// Seconds before a session and its draft expire
    pub code_ttl_seconds: u64,

    /// Fixed code issued instead of a random one. Only for test and
    /// staging configurations; never derived from ambient environment
    /// detection.
    pub fixed_code: Option<String>,

    /// Delivery methods the service accepts
    pub allowed_delivery_methods: Vec<DeliveryMethod>,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            code_alphabet: CodeAlphabet::Numeric,
            code_ttl_seconds: DEFAULT_CODE_TTL_SECONDS,
            fixed_code: None,
            allowed_delivery_methods: vec![DeliveryMethod::Email, DeliveryMethod::Sms],
        }
    }
}
