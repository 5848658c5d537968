//! Onboarding route handlers.

pub mod complete_registration;
pub mod request_code;
pub mod verify_code;

use std::sync::Arc;

use onbo_core::repositories::UserRepository;
use onbo_core::services::onboarding::OnboardingService;
use onbo_core::services::verification::{Notifier, PasswordHasher, TemporaryStore};

pub use complete_registration::complete_registration;
pub use request_code::request_code;
pub use verify_code::verify_code;

/// Application state shared by all onboarding handlers
pub struct AppState<U, N, T, H>
where
    U: UserRepository,
    N: Notifier,
    T: TemporaryStore,
    H: PasswordHasher,
{
    pub onboarding: Arc<OnboardingService<U, N, T, H>>,
}
