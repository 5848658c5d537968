//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// Mock user repository for testing
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    fail_creates: AtomicBool,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            fail_creates: AtomicBool::new(false),
        }
    }

    /// Make every subsequent `create` fail with an internal error
    pub fn set_fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    /// Number of committed users
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.phone.as_deref() == Some(phone))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Simulated user store failure".to_string(),
            });
        }

        let mut users = self.users.write().await;

        // Duplicate contact check, mirroring the unique keys of the real schema
        let duplicate = users.values().any(|u| {
            (user.email.is_some() && u.email == user.email)
                || (user.phone.is_some() && u.phone == user.phone)
        });
        if duplicate {
            return Err(DomainError::Validation {
                message: "Contact address already registered".to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }
}
