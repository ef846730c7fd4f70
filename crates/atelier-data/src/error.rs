//! REST client error types.

use atelier_commerce::forms::FieldError;
use thiserror::Error;

/// Message shown when a session is rejected and the backend gave no reason.
pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

/// Errors that can occur when talking to the backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend rejected the input.
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    /// The token was missing or rejected. The stored token has already
    /// been cleared; the user should be sent to `login_path`.
    #[error("Unauthorized: {message}")]
    Unauthorized { login_path: String, message: String },

    /// The resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success response.
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The request could not be built (e.g., an unreadable upload).
    #[error("Invalid request: {0}")]
    Request(String),
}

impl ApiError {
    /// One line suitable for showing to the user.
    ///
    /// Validation errors list their field messages when there are any.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Unable to reach the server. Check your connection.".to_string(),
            ApiError::Validation { message, errors } if errors.is_empty() => message.clone(),
            ApiError::Validation { errors, .. } => errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            ApiError::Unauthorized { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Unauthorized { .. } => SESSION_EXPIRED.to_string(),
            ApiError::NotFound(message) | ApiError::Server { message, .. } => message.clone(),
            ApiError::Decode(_) => "Unexpected response from the server.".to_string(),
            ApiError::Request(message) => message.clone(),
        }
    }

    /// Login path to redirect to, if this error ended the session.
    pub fn login_path(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { login_path, .. } => Some(login_path),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_joins_fields() {
        let err = ApiError::Validation {
            message: "Validation failed".into(),
            errors: vec![
                FieldError::new("title", "Title is required"),
                FieldError::new("price", "Price must be positive"),
            ],
        };
        assert_eq!(err.user_message(), "Title is required, Price must be positive");

        let bare = ApiError::Validation {
            message: "Out of stock".into(),
            errors: Vec::new(),
        };
        assert_eq!(bare.user_message(), "Out of stock");
    }

    #[test]
    fn test_unauthorized_message() {
        let err = ApiError::Unauthorized {
            login_path: "/login".into(),
            message: String::new(),
        };
        assert_eq!(err.user_message(), SESSION_EXPIRED);
        assert_eq!(err.login_path(), Some("/login"));
        assert_eq!(ApiError::NotFound("x".into()).login_path(), None);
    }
}
