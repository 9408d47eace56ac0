//! Collection validation functions

/// Inline error shown under the interests checkbox group
pub const INTERESTS_MESSAGE: &str = "Please select at least one area of interest";

/// Validates that at least one interest checkbox is selected
pub fn validate_interests(selected_count: usize) -> bool {
    selected_count > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interests() {
        assert!(!validate_interests(0));
        assert!(validate_interests(1));
        assert!(validate_interests(7));
    }
}
