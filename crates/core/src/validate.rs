//! Message validation shared by the request surface and the AI gateway.

use crate::error::CoreError;

/// Validate a raw message: non-empty after trimming and within the length
/// bound. Returns the trimmed length check result only; the caller keeps
/// the original (untrimmed) message for analysis.
pub fn validate_message(message: &str, max_chars: usize) -> Result<(), CoreError> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Message must not be empty".into()));
    }
    if message.chars().count() > max_chars {
        return Err(CoreError::Validation(format!(
            "Message exceeds maximum length of {max_chars} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_normal_message() {
        assert!(validate_message("Your account is blocked", 1000).is_ok());
    }

    #[test]
    fn rejects_empty_and_whitespace_only() {
        assert!(validate_message("", 1000).is_err());
        assert!(validate_message("   \n\t ", 1000).is_err());
    }

    #[test]
    fn rejects_over_length() {
        let long = "a".repeat(1001);
        assert!(validate_message(&long, 1000).is_err());
        let exact = "a".repeat(1000);
        assert!(validate_message(&exact, 1000).is_ok());
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        let msg = "₹".repeat(1000);
        assert!(validate_message(&msg, 1000).is_ok());
    }
}
