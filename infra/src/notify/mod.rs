//! Delivery channel implementations for verification codes.
//!
//! `ChannelNotifier` is the production implementation of the core
//! `Notifier` trait, dispatching to SMTP email or Twilio SMS by delivery
//! method. `ConsoleNotifier` logs codes instead of sending them, for
//! development environments without provider credentials.

pub mod channel;
pub mod console;
pub mod smtp_email;
pub mod twilio_sms;

pub use channel::ChannelNotifier;
pub use console::ConsoleNotifier;
pub use smtp_email::SmtpEmailSender;
pub use twilio_sms::TwilioSmsSender;

/// Message body for a verification code delivery
pub(crate) fn code_message(code: &str, expires_in_seconds: u64) -> String {
    format!(
        "Your Onbo verification code is: {}. It expires in {} minutes.",
        code,
        (expires_in_seconds / 60).max(1)
    )
}
