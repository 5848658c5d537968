//! Unit tests for the onboarding service
