//! Phone number validation functions

use once_cell::sync::Lazy;
use regex::Regex;

/// Inline error shown under the phone field
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";

// Optional '+', non-zero lead digit, up to three more digits, optional
// separator, then the subscriber number.
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[1-9][0-9]{0,3}\s?[0-9]{4,14}$").expect("phone pattern is valid")
});

/// Validates a phone number loosely enough for international formats
///
/// All whitespace is stripped before matching, so `+91 98765 43210` and
/// `+919876543210` are equivalent.
pub fn validate_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_REGEX.is_match(&compact)
}
