//! Verification session entity linking a one-time code to a contact address.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reason a verification code was issued.
///
/// The purpose is part of the session key, so the same code can never
/// satisfy two different flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationPurpose {
    /// Prove contact ownership to promote a staged registration
    FinishRegistration,
    /// Prove contact ownership to start a password reset
    ForgotPassword,
}

impl VerificationPurpose {
    /// Key fragment / wire value for this purpose
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationPurpose::FinishRegistration => "finish_registration",
            VerificationPurpose::ForgotPassword => "forgot_password",
        }
    }

    /// Whether sessions with this purpose carry a staged registration draft
    pub fn requires_draft(&self) -> bool {
        matches!(self, VerificationPurpose::FinishRegistration)
    }
}

impl fmt::Display for VerificationPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "finish_registration" => Ok(VerificationPurpose::FinishRegistration),
            "forgot_password" => Ok(VerificationPurpose::ForgotPassword),
            other => Err(format!("Unknown verification purpose: {}", other)),
        }
    }
}

/// Channel a verification code is delivered over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Email,
    Sms,
}

impl DeliveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Email => "email",
            DeliveryMethod::Sms => "sms",
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(DeliveryMethod::Email),
            "sms" => Ok(DeliveryMethod::Sms),
            other => Err(format!("Unknown delivery method: {}", other)),
        }
    }
}

/// A live verification session.
///
/// A session exists in the temporary store if and only if it has neither
/// expired nor been consumed by a successful validation; consumption is
/// deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSession {
    /// Email address or phone number being verified (normalized)
    pub contact: String,

    /// The one-time code, single-use
    pub code: String,

    /// Why this code was issued
    pub purpose: VerificationPurpose,

    /// Channel the code was delivered over
    pub delivery_method: DeliveryMethod,

    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the session expires
    pub expires_at: DateTime<Utc>,

    /// Storage key of the registration draft staged alongside this session,
    /// present only for purposes that carry one
    pub linked_draft_key: Option<String>,
}

impl VerificationSession {
    /// Creates a new session expiring `ttl_seconds` from now
    pub fn new(
        contact: String,
        code: String,
        purpose: VerificationPurpose,
        delivery_method: DeliveryMethod,
        ttl_seconds: u64,
        linked_draft_key: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            contact,
            code,
            purpose,
            delivery_method,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_seconds as i64),
            linked_draft_key,
        }
    }

    /// Storage key for a session identified by (purpose, contact, code)
    pub fn key_for(purpose: VerificationPurpose, contact: &str, code: &str) -> String {
        format!("verification:{}:{}:{}", purpose, contact, code)
    }

    /// Storage key of this session
    pub fn storage_key(&self) -> String {
        Self::key_for(self.purpose, &self.contact, &self.code)
    }

    /// Whether the session is past its expiry instant.
    ///
    /// The store's TTL eviction is eventual; callers must not rely on it
    /// alone and check logical expiry on every read.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Seconds remaining until expiry, zero if already expired
    pub fn seconds_until_expiry(&self) -> u64 {
        let remaining = self.expires_at - Utc::now();
        remaining.num_seconds().max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = VerificationSession::new(
            "john@example.com".to_string(),
            "123456".to_string(),
            VerificationPurpose::FinishRegistration,
            DeliveryMethod::Email,
            600,
            Some("registration:john@example.com:123456".to_string()),
        );

        assert!(!session.is_expired());
        assert_eq!(session.expires_at, session.created_at + Duration::seconds(600));
        assert!(session.seconds_until_expiry() <= 600);
    }

    #[test]
    fn test_storage_key_layout() {
        let session = VerificationSession::new(
            "john@example.com".to_string(),
            "123456".to_string(),
            VerificationPurpose::ForgotPassword,
            DeliveryMethod::Email,
            600,
            None,
        );

        assert_eq!(
            session.storage_key(),
            "verification:forgot_password:john@example.com:123456"
        );
    }

    #[test]
    fn test_purpose_scopes_keys() {
        let a = VerificationSession::key_for(
            VerificationPurpose::FinishRegistration,
            "+61412345678",
            "111111",
        );
        let b = VerificationSession::key_for(
            VerificationPurpose::ForgotPassword,
            "+61412345678",
            "111111",
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_expired_session() {
        let session = VerificationSession::new(
            "john@example.com".to_string(),
            "123456".to_string(),
            VerificationPurpose::FinishRegistration,
            DeliveryMethod::Email,
            0,
            None,
        );

        std::thread::sleep(std::time::Duration::from_millis(10));
        assert!(session.is_expired());
        assert_eq!(session.seconds_until_expiry(), 0);
    }

    #[test]
    fn test_purpose_round_trip() {
        for purpose in [
            VerificationPurpose::FinishRegistration,
            VerificationPurpose::ForgotPassword,
        ] {
            assert_eq!(purpose.as_str().parse::<VerificationPurpose>().unwrap(), purpose);
        }
        assert!("unknown".parse::<VerificationPurpose>().is_err());
    }

    #[test]
    fn test_only_registration_requires_draft() {
        assert!(VerificationPurpose::FinishRegistration.requires_draft());
        assert!(!VerificationPurpose::ForgotPassword.requires_draft());
    }

    #[test]
    fn test_serialization_round_trip() {
        let session = VerificationSession::new(
            "+61412345678".to_string(),
            "654321".to_string(),
            VerificationPurpose::FinishRegistration,
            DeliveryMethod::Sms,
            600,
            None,
        );

        let json = serde_json::to_string(&session).unwrap();
        let parsed: VerificationSession = serde_json::from_str(&json).unwrap();
        assert_eq!(session, parsed);
        assert!(json.contains("finish_registration"));
        assert!(json.contains("\"sms\""));
    }
}
