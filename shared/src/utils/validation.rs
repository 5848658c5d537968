//! Contact address validation and normalization utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic email shape check; full RFC 5322 is not the goal
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+$").unwrap()
});

// International phone number regex (E.164 format)
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").unwrap());

/// Check if an email address has a valid shape
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Check if a phone number is valid E.164
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(&normalize_phone(phone))
}

/// Lowercase and trim an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Strip formatting characters from a phone number, keeping digits and `+`
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Normalize a contact address of either kind. Emails are lowercased and
/// trimmed; anything else is treated as a phone number.
pub fn normalize_contact(contact: &str) -> String {
    if contact.contains('@') {
        normalize_email(contact)
    } else {
        normalize_phone(contact)
    }
}

/// Mask a contact address for logging (e.g. `jo****@example.com`, `+61****5678`)
pub fn mask_contact(contact: &str) -> String {
    if let Some(at) = contact.find('@') {
        let local = &contact[..at];
        let kept = local.chars().take(2).collect::<String>();
        format!("{}****{}", kept, &contact[at..])
    } else {
        let normalized = normalize_phone(contact);
        if normalized.len() >= 7 {
            format!(
                "{}****{}",
                &normalized[0..3],
                &normalized[normalized.len() - 4..]
            )
        } else {
            "****".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("john@example.com"));
        assert!(is_valid_email("a.b+tag@sub.example.co"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_valid_phones() {
        assert!(is_valid_phone("+61412345678"));
        assert!(is_valid_phone("+1 415 555 0100"));
        assert!(!is_valid_phone("0412345678"));
        assert!(!is_valid_phone("+0123"));
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+61 412-345-678"), "+61412345678");
        assert_eq!(normalize_phone("(415) 555 0100"), "4155550100");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  John@Example.COM "), "john@example.com");
    }

    #[test]
    fn test_mask_contact() {
        assert_eq!(mask_contact("john@example.com"), "jo****@example.com");
        assert_eq!(mask_contact("+61412345678"), "+61****5678");
        assert_eq!(mask_contact("12345"), "****");
    }
}
