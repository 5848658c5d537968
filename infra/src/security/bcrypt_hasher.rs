//! Bcrypt implementation of the PasswordHasher trait

use async_trait::async_trait;

use onbo_core::services::verification::PasswordHasher;

/// Password hasher backed by bcrypt.
///
/// Hashing runs on the blocking thread pool; at the default cost a hash
/// takes tens of milliseconds, which would stall the async executor.
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the bcrypt default cost
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Create a hasher with a custom cost factor
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash_password(&self, plaintext: &str) -> Result<String, String> {
        let plaintext = plaintext.to_string();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| format!("Hashing task failed: {}", e))?
            .map_err(|e| format!("Failed to hash password: {}", e))
    }

    async fn verify_password(&self, plaintext: &str, hash: &str) -> Result<bool, String> {
        let plaintext = plaintext.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &hash))
            .await
            .map_err(|e| format!("Verification task failed: {}", e))?
            .map_err(|e| format!("Failed to verify password: {}", e))
    }
}
