//! User-facing notices (toasts)
//!
//! Every failure surfaces as a notice with a generic "try again"
//! description. There is no automatic retry.

use serde::Serialize;
use shared::error::ErrorCode;

use crate::error::ClientError;
use crate::save::{SaveReport, SaveStatus};

pub const TRY_AGAIN: &str = "Something went wrong. Please try again.";
pub const CATEGORY_HAS_PRODUCTS: &str = "Cannot delete a category that still has products.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            description: String::new(),
        }
    }

    /// Notice for a failed action, e.g. `Notice::from_error("Delete category", &err)`
    pub fn from_error(action: &str, err: &ClientError) -> Self {
        tracing::warn!(action, error = %err, "Action failed");
        let description = match err.error_code() {
            Some(ErrorCode::CategoryHasProducts) => CATEGORY_HAS_PRODUCTS,
            _ => TRY_AGAIN,
        };
        Self {
            level: NoticeLevel::Error,
            title: format!("{action} failed"),
            description: description.to_string(),
        }
    }

    /// Notice summarizing a save
    pub fn from_report(subject: &str, report: &SaveReport) -> Self {
        match report.status() {
            SaveStatus::Complete => Self::success(format!("{subject} saved")),
            SaveStatus::Partial => Self {
                level: NoticeLevel::Warning,
                title: format!("{subject} saved with problems"),
                description: format!(
                    "{} step(s) did not complete. {TRY_AGAIN}",
                    report.problems().count()
                ),
            },
            SaveStatus::Failed => Self {
                level: NoticeLevel::Error,
                title: format!("{subject} could not be saved"),
                description: TRY_AGAIN.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::AppError;

    #[test]
    fn test_category_with_products_has_specific_message() {
        let err: ClientError = AppError::new(ErrorCode::CategoryHasProducts).into();
        let notice = Notice::from_error("Delete category", &err);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.description, CATEGORY_HAS_PRODUCTS);
    }

    #[test]
    fn test_other_errors_say_try_again() {
        let err: ClientError = AppError::new(ErrorCode::CategoryNotFound).into();
        assert_eq!(Notice::from_error("Delete category", &err).description, TRY_AGAIN);

        let err = ClientError::InvalidResponse {
            status: 502,
            body: String::new(),
        };
        assert_eq!(Notice::from_error("Save product", &err).description, TRY_AGAIN);
    }

    #[test]
    fn test_report_notice_levels() {
        let failed = SaveReport::default();
        assert_eq!(Notice::from_report("Product", &failed).level, NoticeLevel::Error);

        let complete = SaveReport {
            record_id: Some(1),
            steps: vec![],
        };
        assert_eq!(
            Notice::from_report("Product", &complete).title,
            "Product saved"
        );
    }
}
