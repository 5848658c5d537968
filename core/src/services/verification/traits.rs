//! Traits for the collaborators of the verification workflow.
//!
//! These are the narrow seams behind which delivery channels, the volatile
//! TTL store, and password hashing live. Implementations are provided by
//! the infrastructure crate; in-memory versions for tests live in
//! [`super::mocks`].

use async_trait::async_trait;

use crate::domain::entities::verification_session::DeliveryMethod;

/// Trait for delivering verification codes to a contact address
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a code over the given channel.
    ///
    /// Returns a provider message id on success. Delivery is
    /// fire-and-forget from the workflow's perspective; a failure leaves
    /// any staged records untouched.
    async fn deliver_code(
        &self,
        contact: &str,
        method: DeliveryMethod,
        code: &str,
        expires_in_seconds: u64,
    ) -> Result<String, String>;
}

/// Trait for the volatile TTL-keyed store backing sessions and drafts.
///
/// Every operation is atomic with respect to the keys it names. Any
/// backing store providing per-key expiry and an atomic check-and-delete
/// primitive satisfies this contract; no specific store is load-bearing.
#[async_trait]
pub trait TemporaryStore: Send + Sync {
    /// Write a value, overwriting any existing one, expiring after `ttl_seconds`
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64)
        -> Result<(), String>;

    /// Read a value; `None` if absent or already evicted
    async fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// Atomically read and remove a value; `None` if absent
    async fn get_del(&self, key: &str) -> Result<Option<String>, String>;

    /// Remove a key; returns whether it existed
    async fn delete(&self, key: &str) -> Result<bool, String>;

    /// Atomically read and remove two keys.
    ///
    /// Succeeds only when both keys exist, in which case both are removed
    /// and their values returned; otherwise neither key is touched. This is
    /// the single race-free mutation path of the workflow: concurrent
    /// callers racing on the same pair must observe at most one `Some`.
    async fn take_pair(
        &self,
        first: &str,
        second: &str,
    ) -> Result<Option<(String, String)>, String>;
}

/// Trait for one-way password hashing.
///
/// The workflow hashes the claimant's secret before anything is staged, so
/// a reversible secret never reaches the temporary store. Hashing is
/// deliberately expensive; implementations move the work off the async
/// executor.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext secret
    async fn hash_password(&self, plaintext: &str) -> Result<String, String>;

    /// Check a plaintext secret against a stored hash
    async fn verify_password(&self, plaintext: &str, hash: &str) -> Result<bool, String>;
}
