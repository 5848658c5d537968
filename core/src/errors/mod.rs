//! Domain-specific error types and error handling.

use thiserror::Error;

/// Errors of the verification-gated onboarding workflow.
///
/// `InvalidOrExpiredCode` is returned uniformly whether a code was never
/// issued, already consumed, or expired, so callers cannot tell which case
/// occurred.
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Invalid or expired verification code")]
    InvalidOrExpiredCode,

    #[error("Failed to deliver verification code: {message}")]
    DeliveryFailed { message: String },

    #[error("Temporary store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Registration could not be committed: {message}")]
    RegistrationCommitFailed { message: String },

    #[error("Delivery method not allowed: {method}")]
    DeliveryMethodNotAllowed { method: String },
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Business rule violation: {message}")]
    BusinessRule { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to workflow-specific error types
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Whether this error is worth retrying with the same input
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::Verification(VerificationError::StoreUnavailable { .. })
        )
    }
}
