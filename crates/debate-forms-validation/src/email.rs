//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

/// Inline error shown under the email field
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";

// One non-whitespace run, '@', then a domain holding at least one '.'
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Validates the loose `local@domain.tld` shape
///
/// Accepts any non-whitespace local part and any domain that contains a dot
/// with at least one character on both sides of it. No DNS or RFC 5322 checks.
pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("user@example.com")]
    #[case("test.user@example.co.uk")]
    #[case("user+tag@example.com")]
    #[case("a@b.c")]
    #[case("weird!chars#@domain.x.y")]
    fn accepts_valid_shapes(#[case] email: &str) {
        assert!(validate_email(email), "{email} should be valid");
    }

    #[rstest]
    #[case("")]
    #[case("bad-email")]
    #[case("@example.com")]
    #[case("user@")]
    #[case("user@example")]
    #[case("user@@example.com")]
    #[case("user@.com")]
    #[case("user@example.")]
    #[case("us er@example.com")]
    #[case("user@exa mple.com")]
    #[case(" user@example.com")]
    fn rejects_invalid_shapes(#[case] email: &str) {
        assert!(!validate_email(email), "{email:?} should be invalid");
    }
}
