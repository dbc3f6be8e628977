//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! The document store enforces no lengths on its own, so every
//! string taken from a request body passes through here.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: pizza, area, customer, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions, special instructions, ingredient labels
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, postal code, payment method
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (stored as-is; the storefront has no hashing scheme)
pub const MAX_PASSWORD_LEN: usize = 128;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Delivery addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

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

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Minimal email shape check: non-empty, has '@', within length limit.
pub fn validate_email(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    if !value.contains('@') {
        return Err(AppError::validation("email is not a valid address"));
    }
    Ok(())
}
