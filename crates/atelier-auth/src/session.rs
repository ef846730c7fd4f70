//! The persisted auth session snapshot.

use crate::token::AuthToken;
use crate::user::User;
use serde::{Deserialize, Serialize};

/// What the auth store persists.
///
/// `is_authenticated` is stored for readers of the raw snapshot but is
/// recomputed from `user` on load; a user being present is the only
/// thing that makes a session authenticated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub token: Option<AuthToken>,
}

impl AuthSession {
    /// The signed-out session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: User, token: AuthToken) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
            token: Some(token),
        }
    }

    /// Re-derive the flag from `user`.
    pub(crate) fn normalized(mut self) -> Self {
        self.is_authenticated = self.user.is_some();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::Role;

    #[test]
    fn test_normalize_trusts_user_not_flag() {
        let stale = AuthSession {
            user: None,
            is_authenticated: true,
            token: Some(AuthToken::new("t")),
        };
        assert!(!stale.normalized().is_authenticated);

        let session = AuthSession {
            user: Some(User::new("u1", "Ada", "ada@example.com", Role::Customer)),
            is_authenticated: false,
            token: None,
        };
        assert!(session.normalized().is_authenticated);
    }

    #[test]
    fn test_wire_shape() {
        let session = AuthSession::authenticated(
            User::new("u1", "Ada", "ada@example.com", Role::Admin),
            AuthToken::new("tok"),
        );
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["isAuthenticated"], true);
        assert_eq!(json["token"], "tok");
        assert_eq!(json["user"]["role"], "admin");
    }
}
