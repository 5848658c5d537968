//! DTOs for the onboarding endpoints

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use onbo_core::domain::entities::registration_draft::NewRegistration;
use onbo_core::domain::entities::verification_session::{DeliveryMethod, VerificationPurpose};

/// Registration details submitted alongside a code request.
///
/// Deliberately not `Debug`/`Serialize`: it carries the plaintext password
/// and must never end up in logs or response bodies.
#[derive(Clone, Deserialize, Validate)]
pub struct RegistrationDetails {
    /// Display name for the new account
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,

    /// Email address, if registering one
    #[validate(email)]
    pub email: Option<String>,

    /// Phone number, if registering one
    #[validate(length(min = 7, max = 20))]
    pub phone: Option<String>,

    /// Plaintext password; hashed before anything is stored
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

impl From<RegistrationDetails> for NewRegistration {
    fn from(details: RegistrationDetails) -> Self {
        NewRegistration {
            full_name: details.full_name,
            email: details.email,
            phone: details.phone,
            password: details.password,
        }
    }
}

/// Request body for POST /onboarding/request-code
#[derive(Clone, Deserialize, Validate)]
pub struct RequestCodeRequest {
    /// Contact address to verify (email or E.164 phone)
    #[validate(length(min = 3, max = 254))]
    pub contact: String,

    /// Why the code is requested
    pub purpose: VerificationPurpose,

    /// Channel to deliver the code over
    pub delivery_method: DeliveryMethod,

    /// Registration details; required for `finish_registration`
    #[validate]
    pub registration: Option<RegistrationDetails>,
}

/// Response body for POST /onboarding/request-code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCodeResponse {
    /// Seconds until the issued code expires
    pub expires_in_seconds: u64,

    /// Provider delivery id
    pub delivery_id: String,
}

/// Request body for POST /onboarding/verify-code
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    /// Contact address the code was sent to
    #[validate(length(min = 3, max = 254))]
    pub contact: String,

    /// Purpose the code was issued for
    pub purpose: VerificationPurpose,

    /// The presented one-time code
    #[validate(length(min = 4, max = 10))]
    pub code: String,
}

/// Response body for POST /onboarding/verify-code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    /// The code matched a live session
    pub verified: bool,

    /// Whether this validation consumed the session (pure-verify purposes)
    pub consumed: bool,
}

/// Request body for POST /onboarding/complete
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompleteRegistrationRequest {
    /// Contact address the registration was staged under
    #[validate(length(min = 3, max = 254))]
    pub contact: String,

    /// The presented one-time code
    #[validate(length(min = 4, max = 10))]
    pub code: String,
}

/// Response body for POST /onboarding/complete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteRegistrationResponse {
    /// Durable id of the newly committed account
    pub user_id: Uuid,
}
