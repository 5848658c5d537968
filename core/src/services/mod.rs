//! Business services containing domain logic and use cases.

pub mod onboarding;
pub mod verification;

// Re-export commonly used types
pub use onboarding::OnboardingService;
pub use verification::{
    CodeGenerator, Notifier, PasswordHasher, RequestCodeResult, TemporaryStore,
    ValidateCodeResult, VerificationService, VerificationServiceConfig, VerificationStaging,
};
