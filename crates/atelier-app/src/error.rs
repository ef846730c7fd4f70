//! Error types for the application layer.

use atelier_auth::AuthError;
use atelier_cache::CacheError;
use atelier_commerce::ids::OrderId;
use atelier_commerce::order::OrderStatus;
use atelier_commerce::CommerceError;
use atelier_data::{ApiError, CUSTOMER_LOGIN_PATH};
use thiserror::Error;

/// Errors surfaced by controllers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Domain input was rejected before any request went out.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Credential form or session problem.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Local storage failed.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// A cancel for this order is already pending.
    #[error("order {0} is already being cancelled")]
    CancelInFlight(OrderId),

    /// The order's status no longer allows cancelling.
    #[error("order cannot be cancelled while {0}")]
    CannotCancel(OrderStatus),

    /// The same submission is already pending.
    #[error("a request is already in progress")]
    Busy,

    /// A signed-in user is required.
    #[error("not signed in")]
    NotAuthenticated,

    /// The admin role is required.
    #[error("admin access required")]
    Forbidden,
}

impl AppError {
    /// One line suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(e) => e.user_message(),
            AppError::Commerce(e) => e.to_string(),
            AppError::Auth(e) => e.to_string(),
            AppError::Cache(_) => "Could not save your changes on this device.".to_string(),
            AppError::CancelInFlight(_) => "This order is already being cancelled.".to_string(),
            AppError::CannotCancel(status) => format!(
                "{} orders can no longer be cancelled.",
                status.display_name()
            ),
            AppError::Busy => "Please wait for the current request to finish.".to_string(),
            AppError::NotAuthenticated => "Please log in to continue.".to_string(),
            AppError::Forbidden => "You need an admin account to do that.".to_string(),
        }
    }

    /// Login route to send the user to, if this error requires signing in.
    pub fn login_path(&self) -> Option<&str> {
        match self {
            AppError::Api(e) => e.login_path(),
            AppError::NotAuthenticated => Some(CUSTOMER_LOGIN_PATH),
            _ => None,
        }
    }
}

/// What happened to a background load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response was stored.
    Applied,
    /// A newer request superseded this one; the response was dropped.
    Stale,
    /// The request failed; the message is in the store's error slot.
    Failed(String),
    /// The session was rejected; go to this login route.
    LoginRequired(String),
}

impl LoadOutcome {
    pub(crate) fn from_error(err: &ApiError) -> Self {
        match err.login_path() {
            Some(path) => LoadOutcome::LoginRequired(path.to_string()),
            None => LoadOutcome::Failed(err.user_message()),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AppError::CannotCancel(OrderStatus::Accepted).user_message(),
            "Accepted orders can no longer be cancelled."
        );
        assert_eq!(AppError::NotAuthenticated.login_path(), Some("/login"));
        assert_eq!(AppError::Forbidden.login_path(), None);
    }

    #[test]
    fn test_outcome_from_unauthorized() {
        let err = ApiError::Unauthorized {
            login_path: "/admin/login".into(),
            message: String::new(),
        };
        assert_eq!(
            LoadOutcome::from_error(&err),
            LoadOutcome::LoginRequired("/admin/login".into())
        );
        let err = ApiError::NotFound("Product not found".into());
        assert_eq!(
            LoadOutcome::from_error(&err),
            LoadOutcome::Failed("Product not found".into())
        );
    }
}
