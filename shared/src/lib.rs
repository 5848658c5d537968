//! # Onbo Shared
//!
//! Cross-cutting types for the Onbo backend: configuration structs,
//! API response envelopes, and contact-address validation utilities.

pub mod config;
pub mod types;
pub mod utils;
