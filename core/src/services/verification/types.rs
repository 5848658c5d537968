//! Types for verification workflow results

use chrono::{DateTime, Utc};

/// Result of issuing a verification code
#[derive(Debug, Clone)]
pub struct RequestCodeResult {
    /// Provider message id returned by the notifier
    pub delivery_id: String,

    /// When the code (and any staged registration) expires
    pub expires_at: DateTime<Utc>,

    /// TTL window in seconds, for an expiry countdown in clients
    pub expires_in_seconds: u64,
}

/// Result of validating a code
#[derive(Debug, Clone)]
pub struct ValidateCodeResult {
    /// Whether this validation consumed the session.
    ///
    /// Pure-verify purposes consume immediately; sessions carrying a
    /// registration draft stay live until `complete_registration` consumes
    /// session and draft together.
    pub consumed: bool,
}
