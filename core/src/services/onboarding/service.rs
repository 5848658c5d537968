//! Main onboarding service implementation

use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use onbo_shared::utils::{mask_contact, normalize_contact};

use crate::domain::entities::registration_draft::NewRegistration;
use crate::domain::entities::user::User;
use crate::domain::entities::verification_session::{DeliveryMethod, VerificationPurpose};
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::repositories::UserRepository;
use crate::services::verification::{
    Notifier, PasswordHasher, RequestCodeResult, TemporaryStore, ValidateCodeResult,
    VerificationService,
};

/// Onboarding service for the complete verification-gated registration flow
pub struct OnboardingService<U, N, T, H>
where
    U: UserRepository,
    N: Notifier,
    T: TemporaryStore,
    H: PasswordHasher,
{
    /// User repository for durable account storage
    user_repository: Arc<U>,
    /// Verification session manager
    verification_service: Arc<VerificationService<N, T, H>>,
}

impl<U, N, T, H> OnboardingService<U, N, T, H>
where
    U: UserRepository,
    N: Notifier,
    T: TemporaryStore,
    H: PasswordHasher,
{
    /// Create a new onboarding service
    pub fn new(
        user_repository: Arc<U>,
        verification_service: Arc<VerificationService<N, T, H>>,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
        }
    }

    /// Issue a registration code, staging the registration details.
    ///
    /// Contacts that already own a durable account are rejected before any
    /// code is issued. A concurrent registration through another path can
    /// still slip past this check; the database unique key catches it at
    /// commit time.
    pub async fn request_registration_code(
        &self,
        contact: &str,
        delivery_method: DeliveryMethod,
        registration: NewRegistration,
    ) -> DomainResult<RequestCodeResult> {
        let normalized = normalize_contact(contact);
        let existing = match delivery_method {
            DeliveryMethod::Email => self.user_repository.find_by_email(&normalized).await?,
            DeliveryMethod::Sms => self.user_repository.find_by_phone(&normalized).await?,
        };
        if existing.is_some() {
            info!(
                contact = %mask_contact(&normalized),
                event = "registration_rejected_duplicate",
                "Registration code requested for an already registered contact"
            );
            return Err(DomainError::BusinessRule {
                message: "Contact address already registered".to_string(),
            });
        }

        self.verification_service
            .request_code(
                contact,
                VerificationPurpose::FinishRegistration,
                delivery_method,
                Some(registration),
            )
            .await
    }

    /// Issue a code for a pure-verify purpose (no staged registration)
    pub async fn request_verification_code(
        &self,
        contact: &str,
        purpose: VerificationPurpose,
        delivery_method: DeliveryMethod,
    ) -> DomainResult<RequestCodeResult> {
        self.verification_service
            .request_code(contact, purpose, delivery_method, None)
            .await
    }

    /// Validate a presented code without promoting anything
    pub async fn validate_code(
        &self,
        contact: &str,
        purpose: VerificationPurpose,
        code: &str,
    ) -> DomainResult<ValidateCodeResult> {
        self.verification_service
            .validate_code(contact, purpose, code)
            .await
    }

    /// Promote a staged registration into the durable user store.
    ///
    /// The session and its draft are consumed in one atomic store
    /// operation before the durable commit, guaranteeing at-most-one
    /// commit per issued code: of N concurrent calls with the same valid
    /// code, exactly one observes the records.
    ///
    /// If the durable commit then fails, the consumed records are not
    /// resurrected; the caller restarts the request-code flow.
    pub async fn complete_registration(
        &self,
        contact: &str,
        purpose: VerificationPurpose,
        code: &str,
    ) -> DomainResult<Uuid> {
        let contact = normalize_contact(contact);
        let Some(code) = self.verification_service.normalize_code(code) else {
            return Err(VerificationError::InvalidOrExpiredCode.into());
        };

        let consumed = self
            .verification_service
            .staging()
            .consume_session_and_draft(purpose, &contact, &code)
            .await?;
        let Some((session, draft)) = consumed else {
            return Err(VerificationError::InvalidOrExpiredCode.into());
        };

        info!(
            contact = %mask_contact(&contact),
            purpose = %session.purpose,
            event = "registration_consumed",
            "Consumed verification session and draft for promotion"
        );

        let user = User::from_draft_payload(draft.payload);
        match self.user_repository.create(user).await {
            Ok(created) => {
                info!(
                    contact = %mask_contact(&contact),
                    user_id = %created.id,
                    event = "registration_promoted",
                    "Registration promoted into the durable user store"
                );
                Ok(created.id)
            }
            Err(e) => {
                error!(
                    contact = %mask_contact(&contact),
                    error = %e,
                    event = "registration_commit_failed",
                    "Durable commit failed after consuming staged records; user must restart registration"
                );
                Err(VerificationError::RegistrationCommitFailed {
                    message: e.to_string(),
                }
                .into())
            }
        }
    }
}
