//! Verification session workflow.
//!
//! This module implements code issuance and validation for the
//! verification-gated onboarding flow:
//! - code generation (CSPRNG, with a config-gated fixed mode for tests)
//! - typed staging of sessions and registration drafts in a TTL store
//! - session creation, delivery, and code validation
//!
//! Promotion of a staged registration into the durable store lives in the
//! sibling `onboarding` module.

mod code_generator;
mod config;
mod service;
mod staging;
mod traits;
mod types;

pub mod mocks;

#[cfg(test)]
mod tests;

pub use code_generator::{CodeAlphabet, CodeGenerator};
pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use staging::VerificationStaging;
pub use traits::{Notifier, PasswordHasher, TemporaryStore};
pub use types::{RequestCodeResult, ValidateCodeResult};
