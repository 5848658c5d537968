//! User entity representing a committed account in the durable store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::registration_draft::DraftPayload;

/// A durable user account.
///
/// Users only ever enter the durable store through promotion of a verified
/// registration draft, so the password field is always a one-way hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub full_name: String,

    /// Email address, if registered with one
    pub email: Option<String>,

    /// Phone number, if registered with one
    pub phone: Option<String>,

    /// One-way hash of the account password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Whether the account's contact address has been verified
    pub is_verified: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new, not-yet-verified user
    pub fn new(
        full_name: String,
        email: Option<String>,
        phone: Option<String>,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            full_name,
            email,
            phone,
            password_hash,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builds a user from a promoted registration draft payload.
    ///
    /// The account is marked verified: promotion only happens after the
    /// claimant proved control of the contact address.
    pub fn from_draft_payload(payload: DraftPayload) -> Self {
        let mut user = Self::new(
            payload.full_name,
            payload.email,
            payload.phone,
            payload.password_hash,
        );
        user.verify();
        user
    }

    /// Marks the user's contact address as verified
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }
}
