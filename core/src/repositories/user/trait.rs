//! User repository trait defining the interface for user data persistence.
//!
//! This is the durable, authoritative store for committed accounts. The
//! onboarding workflow only ever calls it with fully verified payloads;
//! staged (unverified) data never reaches an implementation of this trait.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their email address (normalized, lowercase)
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered with this address
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their phone number (E.164)
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user in the repository
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Creation failed (e.g. a duplicate account was
    ///   committed concurrently through another path, or a storage error)
    async fn create(&self, user: User) -> Result<User, DomainError>;
}
