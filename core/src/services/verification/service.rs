//! Main verification session manager implementation

use std::sync::Arc;
use tracing::{info, warn};

use onbo_shared::utils::{is_valid_email, is_valid_phone, mask_contact, normalize_contact};

use crate::domain::entities::registration_draft::{DraftPayload, NewRegistration, RegistrationDraft};
use crate::domain::entities::verification_session::{
    DeliveryMethod, VerificationPurpose, VerificationSession,
};
use crate::errors::{DomainError, DomainResult, VerificationError};

use super::code_generator::CodeGenerator;
use super::config::VerificationServiceConfig;
use super::staging::VerificationStaging;
use super::traits::{Notifier, PasswordHasher, TemporaryStore};
use super::types::{RequestCodeResult, ValidateCodeResult};

/// Verification session manager.
///
/// Creates sessions (staging a registration draft alongside when the
/// purpose requires one), delivers codes, and validates presented codes.
pub struct VerificationService<N, T, H>
where
    N: Notifier,
    T: TemporaryStore,
    H: PasswordHasher,
{
    /// Delivery channel for issued codes
    notifier: Arc<N>,
    /// Typed accessor over the temporary store
    staging: VerificationStaging<T>,
    /// One-way hasher applied to secrets before staging
    password_hasher: Arc<H>,
    /// Code generation policy
    code_generator: CodeGenerator,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<N, T, H> VerificationService<N, T, H>
where
    N: Notifier,
    T: TemporaryStore,
    H: PasswordHasher,
{
    /// Create a new verification service
    pub fn new(
        notifier: Arc<N>,
        store: Arc<T>,
        password_hasher: Arc<H>,
        config: VerificationServiceConfig,
    ) -> Self {
        let staging = VerificationStaging::new(store, config.code_ttl_seconds);
        let code_generator = CodeGenerator::from_config(&config);
        Self {
            notifier,
            staging,
            password_hasher,
            code_generator,
            config,
        }
    }

    /// The staging accessor shared with the promotion coordinator
    pub(crate) fn staging(&self) -> &VerificationStaging<T> {
        &self.staging
    }

    /// Issue a verification code.
    ///
    /// For registration flows the caller provides the registration details;
    /// the secret is hashed and the draft staged before the session is
    /// written, so the session never points at a missing draft. Notifier
    /// failure surfaces as `DeliveryFailed` while the staged records stay
    /// usable; re-requesting simply supersedes them with a fresh code.
    pub async fn request_code(
        &self,
        contact: &str,
        purpose: VerificationPurpose,
        delivery_method: DeliveryMethod,
        registration: Option<NewRegistration>,
    ) -> DomainResult<RequestCodeResult> {
        if !self.config.allowed_delivery_methods.contains(&delivery_method) {
            return Err(VerificationError::DeliveryMethodNotAllowed {
                method: delivery_method.to_string(),
            }
            .into());
        }

        let contact = normalize_contact(contact);
        let valid = match delivery_method {
            DeliveryMethod::Email => is_valid_email(&contact),
            DeliveryMethod::Sms => is_valid_phone(&contact),
        };
        if !valid {
            return Err(DomainError::Validation {
                message: format!(
                    "Invalid {} address: {}",
                    delivery_method,
                    mask_contact(&contact)
                ),
            });
        }

        if purpose.requires_draft() != registration.is_some() {
            let message = if purpose.requires_draft() {
                format!("Purpose {} requires registration details", purpose)
            } else {
                format!("Purpose {} does not accept registration details", purpose)
            };
            return Err(DomainError::Validation { message });
        }

        let code = self.code_generator.generate(purpose);

        let linked_draft_key = registration
            .is_some()
            .then(|| RegistrationDraft::key_for(&contact, &code));
        let session = VerificationSession::new(
            contact.clone(),
            code.clone(),
            purpose,
            delivery_method,
            self.config.code_ttl_seconds,
            linked_draft_key,
        );

        if let Some(registration) = registration {
            let NewRegistration {
                full_name,
                email,
                phone,
                password,
            } = registration;
            let email = email.map(|e| normalize_contact(&e));
            let phone = phone.map(|p| normalize_contact(&p));

            // The verified contact always lands on the draft; a differing
            // address in the registration details would otherwise commit an
            // unverified contact at promotion time.
            let (email, phone) = match delivery_method {
                DeliveryMethod::Email => {
                    if matches!(&email, Some(e) if *e != contact) {
                        return Err(DomainError::Validation {
                            message: "Registration email must match the contact being verified"
                                .to_string(),
                        });
                    }
                    (Some(contact.clone()), phone)
                }
                DeliveryMethod::Sms => {
                    if matches!(&phone, Some(p) if *p != contact) {
                        return Err(DomainError::Validation {
                            message: "Registration phone must match the contact being verified"
                                .to_string(),
                        });
                    }
                    (email, Some(contact.clone()))
                }
            };

            let password_hash = self
                .password_hasher
                .hash_password(&password)
                .await
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to hash password: {}", e),
                })?;
            let payload = DraftPayload {
                full_name,
                email,
                phone,
                password_hash,
            };
            let draft = RegistrationDraft::linked_to(&session, payload);
            self.staging.put_draft(&draft).await?;
        }

        self.staging.put_session(&session).await?;

        let delivery_id = self
            .notifier
            .deliver_code(
                &contact,
                delivery_method,
                &code,
                self.config.code_ttl_seconds,
            )
            .await
            .map_err(|e| {
                warn!(
                    contact = %mask_contact(&contact),
                    purpose = %purpose,
                    error = %e,
                    event = "code_delivery_failed",
                    "Failed to deliver verification code; staged records remain usable"
                );
                DomainError::from(VerificationError::DeliveryFailed { message: e })
            })?;

        info!(
            contact = %mask_contact(&contact),
            purpose = %purpose,
            delivery_method = %delivery_method,
            event = "code_issued",
            "Issued verification code"
        );

        Ok(RequestCodeResult {
            delivery_id,
            expires_at: session.expires_at,
            expires_in_seconds: self.config.code_ttl_seconds,
        })
    }

    /// Validate a presented code.
    ///
    /// Absence of a matching live session (never issued, already
    /// consumed, or expired) is uniformly `InvalidOrExpiredCode`.
    /// Pure-verify sessions are consumed here; sessions carrying a draft
    /// are left in place for `complete_registration`.
    pub async fn validate_code(
        &self,
        contact: &str,
        purpose: VerificationPurpose,
        code: &str,
    ) -> DomainResult<ValidateCodeResult> {
        let contact = normalize_contact(contact);
        let Some(code) = self.normalize_code(code) else {
            return Err(VerificationError::InvalidOrExpiredCode.into());
        };

        let session = self
            .staging
            .get_session(purpose, &contact, &code)
            .await?
            .ok_or(VerificationError::InvalidOrExpiredCode)?;

        if session.linked_draft_key.is_some() {
            // Consumption is deferred to complete_registration so that
            // validation and promotion happen as one atomic step.
            return Ok(ValidateCodeResult { consumed: false });
        }

        // Pure-verify purpose: single use, consume now. A concurrent
        // validation may have consumed it since the lookup; that caller
        // wins and this one observes absence.
        let consumed = self.staging.consume_session(purpose, &contact, &code).await?;
        if consumed.is_none() {
            return Err(VerificationError::InvalidOrExpiredCode.into());
        }

        info!(
            contact = %mask_contact(&contact),
            purpose = %purpose,
            event = "code_validated",
            "Verification code validated and consumed"
        );

        Ok(ValidateCodeResult { consumed: true })
    }

    /// Normalize a presented code: trim, uppercase, and require the
    /// configured shape. Malformed codes become `None`, which callers
    /// report as `InvalidOrExpiredCode` to keep the uniform answer.
    pub(crate) fn normalize_code(&self, code: &str) -> Option<String> {
        let code = code.trim().to_ascii_uppercase();
        (code.len() == self.config.code_length && self.config.code_alphabet.matches(&code))
            .then_some(code)
    }
}
