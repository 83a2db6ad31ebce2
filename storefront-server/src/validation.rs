//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by the
//! CRUD handlers. PostgreSQL TEXT has no built-in length enforcement.

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, category, banner, attribute, neighborhood, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions, notes, order notes
pub const MAX_NOTE_LEN: usize = 2000;

/// Short identifiers: phone, slug, icon, color codes, payment method
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Banner custom HTML
pub const MAX_HTML_LEN: usize = 50_000;

/// Largest quantity accepted on one order line
pub const MAX_LINE_QUANTITY: i32 = 999;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        )
        .with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
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
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate a price: non-negative, at most two decimal places.
pub fn validate_price(value: Decimal, field: &str) -> Result<(), AppError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("{field} must not be negative"),
        )
        .with_detail("field", field));
    }
    if value.normalize().scale() > 2 {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("{field} must have at most 2 decimal places"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate an optional price.
pub fn validate_optional_price(value: Option<Decimal>, field: &str) -> Result<(), AppError> {
    match value {
        Some(v) => validate_price(v, field),
        None => Ok(()),
    }
}

/// Validate a non-negative integer (stock, order)
pub fn validate_non_negative(value: i32, field: &str) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must not be negative"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate an image URL (http(s) or root-relative) within the length limit.
pub fn validate_image_url(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_URL_LEN)?;
    if !shared::gallery::is_acceptable_url(value.trim()) {
        return Err(AppError::with_message(
            ErrorCode::ImageUrlInvalid,
            format!("{field} is not a valid image URL"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate an optional image URL; an empty string counts as absent.
pub fn validate_optional_image_url(value: &Option<String>, field: &str) -> Result<(), AppError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => validate_image_url(v, field),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Notebook", "name", MAX_NAME_LEN).is_ok());
        let err = validate_required_text("  ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let err = validate_required_text(&long, "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "notes", 5).is_ok());
        assert!(validate_optional_text(&Some("abc".into()), "notes", 5).is_ok());
        assert!(validate_optional_text(&Some("abcdef".into()), "notes", 5).is_err());
    }

    #[test]
    fn test_price() {
        assert!(validate_price(Decimal::new(1890, 2), "price").is_ok());
        assert!(validate_price(Decimal::ZERO, "price").is_ok());
        assert!(validate_price(Decimal::new(18900, 3), "price").is_ok());
        let err = validate_price(Decimal::new(-1, 0), "price").unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductInvalidPrice);
        assert!(validate_price(Decimal::new(18901, 3), "price").is_err());
    }

    #[test]
    fn test_image_url() {
        assert!(validate_image_url("https://cdn.example.com/a.jpg", "imageUrl").is_ok());
        assert!(validate_image_url("/uploads/a.jpg", "imageUrl").is_ok());
        let err = validate_image_url("javascript:alert(1)", "imageUrl").unwrap_err();
        assert_eq!(err.code, ErrorCode::ImageUrlInvalid);
        assert!(validate_optional_image_url(&Some(String::new()), "imageUrl").is_ok());
    }
}
