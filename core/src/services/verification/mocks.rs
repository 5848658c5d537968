//! In-memory implementations of the workflow collaborators.
//!
//! Used by the test suites of this crate and the API crate. The store
//! never evicts physically, which is exactly what the logical-expiry
//! tests need.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Mutex;

use crate::domain::entities::verification_session::DeliveryMethod;

use super::traits::{Notifier, PasswordHasher, TemporaryStore};

/// In-memory temporary store.
///
/// All operations run under a single lock, so the atomicity guarantees of
/// the `TemporaryStore` contract hold trivially. TTLs are accepted and
/// ignored: records stay until deleted, leaving logical expiry as the only
/// expiry mechanism in tests.
pub struct InMemoryTemporaryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_all: AtomicBool,
}

impl InMemoryTemporaryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            fail_all: AtomicBool::new(false),
        }
    }

    /// Make every subsequent operation fail, simulating an unreachable store
    pub fn set_fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the store holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Raw read without the trait's failure simulation
    pub async fn peek(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }

    fn check_available(&self) -> Result<(), String> {
        if self.fail_all.load(Ordering::SeqCst) {
            Err("Simulated store outage".to_string())
        } else {
            Ok(())
        }
    }
}

impl Default for InMemoryTemporaryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TemporaryStore for InMemoryTemporaryStore {
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        _ttl_seconds: u64,
    ) -> Result<(), String> {
        self.check_available()?;
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.check_available()?;
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn get_del(&self, key: &str) -> Result<Option<String>, String> {
        self.check_available()?;
        Ok(self.entries.lock().await.remove(key))
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        self.check_available()?;
        Ok(self.entries.lock().await.remove(key).is_some())
    }

    async fn take_pair(
        &self,
        first: &str,
        second: &str,
    ) -> Result<Option<(String, String)>, String> {
        self.check_available()?;
        let mut entries = self.entries.lock().await;
        if entries.contains_key(first) && entries.contains_key(second) {
            let a = entries.remove(first).expect("checked");
            let b = entries.remove(second).expect("checked");
            Ok(Some((a, b)))
        } else {
            Ok(None)
        }
    }
}

/// A delivered code captured by the mock notifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredCode {
    pub contact: String,
    pub method: DeliveryMethod,
    pub code: String,
}

/// Mock notifier recording every delivery
pub struct MockNotifier {
    deliveries: Mutex<Vec<DeliveredCode>>,
    counter: AtomicU64,
    fail_all: AtomicBool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            counter: AtomicU64::new(0),
            fail_all: AtomicBool::new(false),
        }
    }

    /// Make every subsequent delivery fail
    pub fn set_fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Number of deliveries attempted successfully
    pub async fn delivery_count(&self) -> usize {
        self.deliveries.lock().await.len()
    }

    /// The most recently delivered code, if any
    pub async fn last_delivery(&self) -> Option<DeliveredCode> {
        self.deliveries.lock().await.last().cloned()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn deliver_code(
        &self,
        contact: &str,
        method: DeliveryMethod,
        code: &str,
        _expires_in_seconds: u64,
    ) -> Result<String, String> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err("Simulated delivery failure".to_string());
        }

        self.deliveries.lock().await.push(DeliveredCode {
            contact: contact.to_string(),
            method,
            code: code.to_string(),
        });
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("mock-delivery-{}", n))
    }
}

/// Mock hasher with a recognizable, non-identity transform
pub struct MockPasswordHasher;

#[async_trait]
impl PasswordHasher for MockPasswordHasher {
    async fn hash_password(&self, plaintext: &str) -> Result<String, String> {
        Ok(format!("hashed::{}", plaintext))
    }

    async fn verify_password(&self, plaintext: &str, hash: &str) -> Result<bool, String> {
        Ok(hash == format!("hashed::{}", plaintext))
    }
}
