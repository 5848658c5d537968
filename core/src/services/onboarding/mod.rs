//! Account onboarding orchestration.
//!
//! Wraps the verification session manager with the durable user store:
//! duplicate-account checks before a registration code is issued, and
//! atomic promotion of a verified draft into the user repository.

mod service;

#[cfg(test)]
mod tests;

pub use service::OnboardingService;
