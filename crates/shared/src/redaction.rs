//! Secret detection and redaction utilities.
//!
//! Log fields and error metadata pass through these helpers before they
//! leave the process.

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

const SECRET_MARKERS: &[&str] = &["KEY", "TOKEN", "SECRET", "PASSWORD", "CREDENTIAL", "CARD"];

/// Checks if a key/variable name likely refers to a secret.
///
/// Matching is case-insensitive.
///
/// # Examples
///
/// ```
/// use cinema_tickets_shared::is_secret_key;
///
/// assert!(is_secret_key("paymentApiKey"));
/// assert!(is_secret_key("cardNumber"));
/// assert!(!is_secret_key("accountId"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    SECRET_MARKERS.iter().any(|marker| key.contains(marker))
}

/// Returns [`REDACTED`] for secret keys, or the original value otherwise.
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_secret_patterns() {
        assert!(is_secret_key("PAYMENT_API_KEY"));
        assert!(is_secret_key("session_token"));
        assert!(is_secret_key("gatewaySecret"));
        assert!(is_secret_key("CARD_NUMBER"));
        assert!(is_secret_key("merchant_credentials"));
    }

    #[test]
    fn leaves_purchase_fields_alone() {
        assert!(!is_secret_key("accountId"));
        assert!(!is_secret_key("totalCost"));
        assert!(!is_secret_key("seats"));
        assert!(!is_secret_key("TICKETS_MAX_PER_PURCHASE"));
    }

    #[test]
    fn redacts_only_secret_values() {
        assert_eq!(redact_if_secret("cardNumber", "4111111111111111"), REDACTED);
        assert_eq!(redact_if_secret("accountId", "42"), "42");
    }
}
