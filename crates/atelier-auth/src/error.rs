//! Authentication errors.

use atelier_commerce::forms::FieldError;
use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// A credential form failed validation.
    #[error("{}", .0.iter().map(|e| e.message.as_str()).collect::<Vec<_>>().join("; "))]
    Validation(Vec<FieldError>),

    /// An action requires a signed-in user.
    #[error("please log in to continue")]
    NotAuthenticated,

    /// An action requires the admin role.
    #[error("insufficient permissions")]
    InsufficientPermissions,

    /// Unknown role string.
    #[error("unknown role: {0}")]
    InvalidRole(String),

    /// Persisting the session failed.
    #[error("cache error: {0}")]
    Cache(#[from] atelier_cache::CacheError),
}

impl AuthError {
    /// Check if the user has to sign in (again) to proceed.
    pub fn needs_login(&self) -> bool {
        matches!(
            self,
            AuthError::NotAuthenticated | AuthError::InsufficientPermissions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_login() {
        assert!(AuthError::NotAuthenticated.needs_login());
        assert!(!AuthError::InvalidRole("root".into()).needs_login());
    }

    #[test]
    fn test_validation_display() {
        let err = AuthError::Validation(vec![
            FieldError::new("email", "Email is required"),
            FieldError::new("password", "Password is required"),
        ]);
        assert_eq!(err.to_string(), "Email is required; Password is required");
    }
}
