//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis connection settings for the temporary TTL store
//! - `database` - MySQL connection and pool configuration
//! - `environment` - Environment detection
//! - `notify` - Email (SMTP) and SMS (Twilio) delivery settings
//! - `server` - HTTP server configuration
//! - `verification` - Code policy and staging TTL configuration

pub mod cache;
pub mod database;
pub mod environment;
pub mod notify;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use notify::{NotifyConfig, SmtpConfig, TwilioConfig};
pub use server::ServerConfig;
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Temporary store (Redis) configuration
    pub cache: CacheConfig,

    /// Verification code policy
    pub verification: VerificationConfig,

    /// Delivery channel configuration
    pub notify: NotifyConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            verification: VerificationConfig::from_env(),
            notify: NotifyConfig::from_env(),
        }
    }
}
