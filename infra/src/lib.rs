//! # Infrastructure Layer
//!
//! Concrete implementations of the Onbo core's collaborator interfaces:
//! - **cache**: Redis-backed temporary TTL store for staged verification
//!   sessions and registration drafts
//! - **database**: MySQL user repository using SQLx
//! - **notify**: delivery channels (SMTP email, Twilio SMS, console)
//! - **security**: bcrypt password hashing

use thiserror::Error;

pub mod cache;
pub mod database;
pub mod notify;
pub mod security;

/// Errors raised by infrastructure services
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("Notification error: {0}")]
    Notify(String),
}
