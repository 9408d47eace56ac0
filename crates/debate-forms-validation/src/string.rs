//! String validation functions

/// Inline error shown under the motivation field
pub const MOTIVATION_MESSAGE: &str = "If provided, please write at least 50 characters";

/// Validates that the trimmed text holds at least `min` characters
pub fn validate_text_length(text: &str, min: usize) -> bool {
    text.trim().chars().count() >= min
}

/// Like [`validate_text_length`], but blank input passes
///
/// Used for optional free-text fields that only need a minimum once filled in.
pub fn validate_optional_text_length(text: &str, min: usize) -> bool {
    text.trim().is_empty() || validate_text_length(text, min)
}

/// Validates a required value: anything but whitespace
pub fn validate_required(value: &str) -> bool {
    !value.trim().is_empty()
}
