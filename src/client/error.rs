//! Client error types
//!
//! Errors raised by the data-access layer, from the identifier precondition
//! check down to transport and decode failures.

use thiserror::Error;

/// Errors that can occur when fetching dashboard data
#[derive(Error, Debug)]
pub enum ClientError {
    /// No restaurant identifier was given and no fallback was set.
    /// Raised before any network access.
    #[error("Restaurant identifier required")]
    IdentifierRequired,

    #[error("Dashboard API unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ClientError {
    /// Whether this failure happened before any I/O was attempted
    pub fn is_precondition(&self) -> bool {
        matches!(self, ClientError::IdentifierRequired)
    }

    /// Classify a `reqwest` error the same way for every call site
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(err)
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Parse(err.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::IdentifierRequired;
        assert_eq!(err.to_string(), "Restaurant identifier required");

        let err = ClientError::ApiError {
            status: 404,
            message: "restaurant not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error 404: restaurant not found");
    }

    #[test]
    fn test_precondition_classification() {
        assert!(ClientError::IdentifierRequired.is_precondition());
        assert!(!ClientError::Timeout.is_precondition());
        assert!(!ClientError::Parse("bad".into()).is_precondition());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: ClientError = json_err.into();
        assert!(matches!(err, ClientError::Parse(_)));
    }
}
