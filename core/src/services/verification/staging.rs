//! Typed staging of sessions and drafts in the temporary TTL store.

use constant_time_eq::constant_time_eq;
use std::sync::Arc;
use tracing::{debug, warn};

use onbo_shared::utils::mask_contact;

use crate::domain::entities::registration_draft::RegistrationDraft;
use crate::domain::entities::verification_session::{VerificationPurpose, VerificationSession};
use crate::errors::{DomainError, DomainResult, VerificationError};

use super::traits::TemporaryStore;

/// Thin typed accessor over the temporary store for the two staged record
/// kinds of the onboarding workflow.
///
/// Records are stored as JSON under the key layout
/// `verification:{purpose}:{contact}:{code}` and
/// `registration:{contact}:{code}`, with the configured TTL. Writes
/// overwrite any existing record under the same key (last writer wins).
///
/// Expiry is enforced twice: physically by the store's TTL eviction and
/// logically on every read, so a record past `expires_at` is treated as
/// absent even before the store reclaims it.
pub struct VerificationStaging<T: TemporaryStore> {
    store: Arc<T>,
    ttl_seconds: u64,
}

impl<T: TemporaryStore> Clone for VerificationStaging<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            ttl_seconds: self.ttl_seconds,
        }
    }
}

impl<T: TemporaryStore> VerificationStaging<T> {
    pub fn new(store: Arc<T>, ttl_seconds: u64) -> Self {
        Self { store, ttl_seconds }
    }

    /// TTL applied to staged records, in seconds
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Store a session with the configured TTL
    pub async fn put_session(&self, session: &VerificationSession) -> DomainResult<()> {
        let value = encode(session, "verification session")?;
        self.store
            .set_with_expiry(&session.storage_key(), &value, self.ttl_seconds)
            .await
            .map_err(store_unavailable)
    }

    /// Look up a live session by exact (purpose, contact, code) key
    pub async fn get_session(
        &self,
        purpose: VerificationPurpose,
        contact: &str,
        code: &str,
    ) -> DomainResult<Option<VerificationSession>> {
        let key = VerificationSession::key_for(purpose, contact, code);
        let raw = self.store.get(&key).await.map_err(store_unavailable)?;
        match raw {
            Some(raw) => Ok(self.check_session(decode(&raw, "verification session")?, code)),
            None => Ok(None),
        }
    }

    /// Atomically look up and remove a session
    pub async fn consume_session(
        &self,
        purpose: VerificationPurpose,
        contact: &str,
        code: &str,
    ) -> DomainResult<Option<VerificationSession>> {
        let key = VerificationSession::key_for(purpose, contact, code);
        let raw = self.store.get_del(&key).await.map_err(store_unavailable)?;
        match raw {
            Some(raw) => Ok(self.check_session(decode(&raw, "verification session")?, code)),
            None => Ok(None),
        }
    }

    /// Remove a session; returns whether it existed
    pub async fn delete_session(
        &self,
        purpose: VerificationPurpose,
        contact: &str,
        code: &str,
    ) -> DomainResult<bool> {
        let key = VerificationSession::key_for(purpose, contact, code);
        self.store.delete(&key).await.map_err(store_unavailable)
    }

    /// Store a draft with the configured TTL
    pub async fn put_draft(&self, draft: &RegistrationDraft) -> DomainResult<()> {
        let value = encode(draft, "registration draft")?;
        self.store
            .set_with_expiry(&draft.storage_key(), &value, self.ttl_seconds)
            .await
            .map_err(store_unavailable)
    }

    /// Look up a live draft by exact (contact, code) key
    pub async fn get_draft(
        &self,
        contact: &str,
        code: &str,
    ) -> DomainResult<Option<RegistrationDraft>> {
        let key = RegistrationDraft::key_for(contact, code);
        let raw = self.store.get(&key).await.map_err(store_unavailable)?;
        match raw {
            Some(raw) => {
                let draft: RegistrationDraft = decode(&raw, "registration draft")?;
                Ok((!draft.is_expired()).then_some(draft))
            }
            None => Ok(None),
        }
    }

    /// Remove a draft; returns whether it existed
    pub async fn delete_draft(&self, contact: &str, code: &str) -> DomainResult<bool> {
        let key = RegistrationDraft::key_for(contact, code);
        self.store.delete(&key).await.map_err(store_unavailable)
    }

    /// Atomically consume a session together with its linked draft.
    ///
    /// Both records are removed in a single store operation, and only when
    /// both are present; the workflow can never observe one consumed and
    /// the other surviving. Returns `None` when either record is missing
    /// or logically expired.
    pub async fn consume_session_and_draft(
        &self,
        purpose: VerificationPurpose,
        contact: &str,
        code: &str,
    ) -> DomainResult<Option<(VerificationSession, RegistrationDraft)>> {
        let session_key = VerificationSession::key_for(purpose, contact, code);
        let draft_key = RegistrationDraft::key_for(contact, code);

        let pair = self
            .store
            .take_pair(&session_key, &draft_key)
            .await
            .map_err(store_unavailable)?;
        let Some((raw_session, raw_draft)) = pair else {
            return Ok(None);
        };

        let session: VerificationSession = decode(&raw_session, "verification session")?;
        let draft: RegistrationDraft = decode(&raw_draft, "registration draft")?;

        let Some(session) = self.check_session(session, code) else {
            return Ok(None);
        };
        if draft.is_expired() {
            debug!(
                contact = %mask_contact(contact),
                event = "draft_expired",
                "Registration draft past expiry; treating as absent"
            );
            return Ok(None);
        }

        Ok(Some((session, draft)))
    }

    /// Logical validity checks applied to every session read
    fn check_session(
        &self,
        session: VerificationSession,
        presented_code: &str,
    ) -> Option<VerificationSession> {
        if !constant_time_eq(session.code.as_bytes(), presented_code.as_bytes()) {
            warn!(
                contact = %mask_contact(&session.contact),
                event = "session_code_mismatch",
                "Stored session does not match presented code"
            );
            return None;
        }
        if session.is_expired() {
            debug!(
                contact = %mask_contact(&session.contact),
                event = "session_expired",
                "Verification session past expiry; treating as absent"
            );
            return None;
        }
        Some(session)
    }
}

fn store_unavailable(message: String) -> DomainError {
    VerificationError::StoreUnavailable { message }.into()
}

fn encode<V: serde::Serialize>(value: &V, kind: &str) -> DomainResult<String> {
    serde_json::to_string(value).map_err(|e| DomainError::Internal {
        message: format!("Failed to encode {}: {}", kind, e),
    })
}

fn decode<V: serde::de::DeserializeOwned>(raw: &str, kind: &str) -> DomainResult<V> {
    serde_json::from_str(raw).map_err(|e| DomainError::Internal {
        message: format!("Corrupt {} record: {}", kind, e),
    })
}
