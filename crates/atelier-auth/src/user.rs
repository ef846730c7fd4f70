//! User types.

use crate::AuthError;
use atelier_commerce::ids::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Shopper.
    #[default]
    Customer,
    /// Store administrator.
    Admin,
}

impl Role {
    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            _ => Err(AuthError::InvalidRole(s.to_string())),
        }
    }
}

/// A signed-in user, as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(
        id: impl Into<UserId>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            created_at: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Name for greetings, falling back to the email.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!(matches!("staff".parse::<Role>(), Err(AuthError::InvalidRole(_))));
    }

    #[test]
    fn test_deserialize_backend_user() {
        let json = r#"{"_id":"u1","name":"","email":"ada@example.com","role":"admin"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.is_admin());
        assert_eq!(user.display_name(), "ada@example.com");
        assert!(user.created_at.is_none());
    }

    #[test]
    fn test_role_defaults_to_customer() {
        let json = r#"{"id":"u2","name":"Bo","email":"bo@example.com"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Customer);
    }
}
