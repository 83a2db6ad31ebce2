//! Form drafts
//!
//! A draft is an immutable value; every edit goes through
//! [`Draft::reduce`], which returns a new draft or an error and leaves the
//! original untouched. [`Draft::validate`] gates submission: an invalid
//! draft never reaches the network.

pub mod banner;
pub mod delivery_zone;
pub mod product;

pub use banner::{BannerAction, BannerDraft};
pub use delivery_zone::{DeliveryZoneAction, DeliveryZoneDraft};
pub use product::{ProductAction, ProductDraft, SpecDraft};

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::gallery::GalleryError;
use thiserror::Error;

/// Draft edit or validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} is not a valid amount: {value:?}")]
    InvalidAmount { field: &'static str, value: String },

    #[error("{0} must not be negative")]
    NegativeAmount(&'static str),

    #[error("{field} is not a valid image URL")]
    InvalidUrl { field: &'static str },

    #[error("{field} index {index} out of range ({len} entries)")]
    IndexOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },

    #[error(transparent)]
    Gallery(#[from] GalleryError),
}

impl From<DraftError> for AppError {
    fn from(err: DraftError) -> Self {
        match &err {
            DraftError::Gallery(e) => e.clone().into(),
            DraftError::MissingField(field) => {
                AppError::with_message(ErrorCode::RequiredField, err.to_string())
                    .with_detail("field", *field)
            }
            DraftError::InvalidAmount { field, .. } => {
                AppError::with_message(ErrorCode::InvalidFormat, err.to_string())
                    .with_detail("field", *field)
            }
            DraftError::NegativeAmount(field) => {
                AppError::with_message(ErrorCode::ValueOutOfRange, err.to_string())
                    .with_detail("field", *field)
            }
            DraftError::InvalidUrl { field } => {
                AppError::with_message(ErrorCode::ImageUrlInvalid, err.to_string())
                    .with_detail("field", *field)
            }
            DraftError::IndexOutOfRange { field, .. } => {
                AppError::with_message(ErrorCode::ValueOutOfRange, err.to_string())
                    .with_detail("field", *field)
            }
        }
    }
}

/// Immutable form state edited through actions
pub trait Draft: Clone {
    type Action;

    /// Apply one edit, returning the new draft
    fn reduce(&self, action: Self::Action) -> Result<Self, DraftError>;

    /// Check that the draft can be submitted
    fn validate(&self) -> Result<(), DraftError>;
}

/// Parse a money amount typed in a form.
///
/// Accepts `1234.56`, `1234,56` and `1.234,56`; blank input is `None`.
pub(crate) fn parse_amount(
    field: &'static str,
    raw: &str,
    allow_negative: bool,
) -> Result<Option<Decimal>, DraftError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };
    let invalid = || DraftError::InvalidAmount {
        field,
        value: raw.to_string(),
    };

    let value: Decimal = normalized.parse().map_err(|_| invalid())?;
    if value.normalize().scale() > 2 {
        return Err(invalid());
    }
    if !allow_negative && value.is_sign_negative() && !value.is_zero() {
        return Err(DraftError::NegativeAmount(field));
    }
    Ok(Some(value))
}

/// Required non-negative amount
pub(crate) fn require_amount(field: &'static str, raw: &str) -> Result<Decimal, DraftError> {
    parse_amount(field, raw, false)?.ok_or(DraftError::MissingField(field))
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), DraftError> {
    if value.trim().is_empty() {
        return Err(DraftError::MissingField(field));
    }
    Ok(())
}

/// Blank strings become `None`
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_formats() {
        assert_eq!(
            parse_amount("price", "89.90", false).unwrap(),
            Some(Decimal::new(8990, 2))
        );
        assert_eq!(
            parse_amount("price", "89,90", false).unwrap(),
            Some(Decimal::new(8990, 2))
        );
        assert_eq!(
            parse_amount("price", "1.234,56", false).unwrap(),
            Some(Decimal::new(123456, 2))
        );
        assert_eq!(parse_amount("price", "  ", false).unwrap(), None);
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert!(matches!(
            parse_amount("price", "abc", false),
            Err(DraftError::InvalidAmount { field: "price", .. })
        ));
        assert!(matches!(
            parse_amount("price", "1.005", false),
            Err(DraftError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(
            parse_amount("price", "-5", false),
            Err(DraftError::NegativeAmount("price"))
        );
        assert_eq!(
            parse_amount("priceModifier", "-5,00", true).unwrap(),
            Some(Decimal::new(-500, 2))
        );
    }

    #[test]
    fn test_required_amount() {
        assert_eq!(require_amount("price", ""), Err(DraftError::MissingField("price")));
    }

    #[test]
    fn test_draft_error_maps_to_app_error() {
        let err: AppError = DraftError::MissingField("name").into();
        assert_eq!(err.code, ErrorCode::RequiredField);
        let err: AppError = DraftError::Gallery(GalleryError::DuplicateUrl("/a.jpg".into())).into();
        assert_eq!(err.code, ErrorCode::ImageUrlDuplicate);
    }
}
