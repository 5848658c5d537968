//! Registration draft entity staged while a contact address is unverified.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::verification_session::VerificationSession;

/// Registration details as submitted by the claimant.
///
/// Carries the plaintext secret and therefore never leaves memory: it is
/// not serializable, and its `Debug` output redacts the password.
#[derive(Clone)]
pub struct NewRegistration {
    /// Display name for the new account
    pub full_name: String,

    /// Email address, if provided
    pub email: Option<String>,

    /// Phone number, if provided
    pub phone: Option<String>,

    /// Plaintext password; hashed before anything is stored
    pub password: String,
}

impl fmt::Debug for NewRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewRegistration")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The staged payload of a registration draft.
///
/// Closed schema; the password field holds a one-way hash, never the
/// plaintext secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPayload {
    /// Display name for the new account
    pub full_name: String,

    /// Email address, if provided
    pub email: Option<String>,

    /// Phone number, if provided
    pub phone: Option<String>,

    /// One-way hash of the claimant's password
    pub password_hash: String,
}

/// A staged registration awaiting promotion into the durable user store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDraft {
    /// Contact address being verified (normalized)
    pub contact: String,

    /// Code of the session this draft is linked to
    pub code: String,

    /// The staged registration payload
    pub payload: DraftPayload,

    /// Timestamp when the draft was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the draft expires
    pub expires_at: DateTime<Utc>,
}

impl RegistrationDraft {
    /// Creates a draft linked to `session`, sharing its clock origin so the
    /// two records expire together.
    pub fn linked_to(session: &VerificationSession, payload: DraftPayload) -> Self {
        Self {
            contact: session.contact.clone(),
            code: session.code.clone(),
            payload,
            created_at: session.created_at,
            expires_at: session.expires_at,
        }
    }

    /// Storage key for a draft identified by (contact, code)
    pub fn key_for(contact: &str, code: &str) -> String {
        format!("registration:{}:{}", contact, code)
    }

    /// Storage key of this draft
    pub fn storage_key(&self) -> String {
        Self::key_for(&self.contact, &self.code)
    }

    /// Whether the draft is past its expiry instant
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::verification_session::{DeliveryMethod, VerificationPurpose};

    fn sample_session() -> VerificationSession {
        VerificationSession::new(
            "john@example.com".to_string(),
            "123456".to_string(),
            VerificationPurpose::FinishRegistration,
            DeliveryMethod::Email,
            600,
            Some(RegistrationDraft::key_for("john@example.com", "123456")),
        )
    }

    fn sample_payload() -> DraftPayload {
        DraftPayload {
            full_name: "John".to_string(),
            email: Some("john@example.com".to_string()),
            phone: None,
            password_hash: "hashed::p@ss".to_string(),
        }
    }

    #[test]
    fn test_draft_shares_session_clock_origin() {
        let session = sample_session();
        let draft = RegistrationDraft::linked_to(&session, sample_payload());

        assert_eq!(draft.created_at, session.created_at);
        assert_eq!(draft.expires_at, session.expires_at);
        assert_eq!(Some(draft.storage_key()), session.linked_draft_key);
    }

    #[test]
    fn test_storage_key_layout() {
        assert_eq!(
            RegistrationDraft::key_for("john@example.com", "123456"),
            "registration:john@example.com:123456"
        );
    }

    #[test]
    fn test_new_registration_debug_redacts_password() {
        let registration = NewRegistration {
            full_name: "John".to_string(),
            email: Some("john@example.com".to_string()),
            phone: None,
            password: "p@ss".to_string(),
        };

        let debug = format!("{:?}", registration);
        assert!(!debug.contains("p@ss"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_serialization_round_trip() {
        let draft = RegistrationDraft::linked_to(&sample_session(), sample_payload());
        let json = serde_json::to_string(&draft).unwrap();
        let parsed: RegistrationDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(draft, parsed);
    }
}
