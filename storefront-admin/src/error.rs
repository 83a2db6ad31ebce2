//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection, timeout, body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error envelope
    #[error("API error {code}: {message}")]
    Api {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Non-success response without a readable envelope
    #[error("Invalid response ({status}): {body}")]
    InvalidResponse { status: u16, body: String },
}

impl ClientError {
    /// Structured error code of an API error, if the server sent a known one
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api { code, .. } => ErrorCode::try_from(*code).ok(),
            _ => None,
        }
    }

    /// Whether the server rejected the call with `code`
    pub fn is(&self, code: ErrorCode) -> bool {
        self.error_code() == Some(code)
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        ClientError::Api {
            code: err.code.code(),
            message: err.message,
            details: err
                .details
                .map(|d| serde_json::Value::Object(d.into_iter().collect())),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_code_lookup() {
        let err: ClientError = AppError::new(ErrorCode::CategoryHasProducts).into();
        assert!(err.is(ErrorCode::CategoryHasProducts));
        assert_eq!(err.error_code(), Some(ErrorCode::CategoryHasProducts));
    }

    #[test]
    fn test_unknown_code_has_no_error_code() {
        let err = ClientError::Api {
            code: 4242,
            message: "?".into(),
            details: None,
        };
        assert_eq!(err.error_code(), None);
    }
}
