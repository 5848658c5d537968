//! Console notifier for development environments
//!
//! Logs verification codes instead of delivering them. Never enable in
//! production: codes land in the logs in the clear.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use onbo_core::domain::entities::verification_session::DeliveryMethod;
use onbo_core::services::verification::Notifier;
use onbo_shared::utils::mask_contact;

/// Notifier that prints codes to the application log
pub struct ConsoleNotifier {
    /// Counter for tracking number of deliveries
    delivery_count: AtomicU64,
}

impl ConsoleNotifier {
    /// Create a new console notifier
    pub fn new() -> Self {
        Self {
            delivery_count: AtomicU64::new(0),
        }
    }

    /// Total number of deliveries logged
    pub fn delivery_count(&self) -> u64 {
        self.delivery_count.load(Ordering::SeqCst)
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn deliver_code(
        &self,
        contact: &str,
        method: DeliveryMethod,
        code: &str,
        expires_in_seconds: u64,
    ) -> Result<String, String> {
        let n = self.delivery_count.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            contact = %mask_contact(contact),
            method = %method,
            code = %code,
            expires_in_seconds,
            "Console notifier: verification code (development only)"
        );
        Ok(format!("console-{}", n))
    }
}
