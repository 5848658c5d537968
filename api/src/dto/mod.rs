//! Request and response DTOs

pub mod onboarding;
