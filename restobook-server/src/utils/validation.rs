//! Input validation helpers
//!
//! Text checks for staff account settings. Reservation submissions are
//! checked in [`crate::reservations::validator`].

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Staff usernames
pub const MAX_NAME_LEN: usize = 200;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_text() {
        assert!(validate_required_text("admin", "username", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "username", MAX_NAME_LEN).is_err());
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "username", MAX_NAME_LEN).is_err());
    }
}
