//! Login and registration forms.

use crate::token::AuthToken;
use crate::user::User;
use crate::AuthError;
use atelier_commerce::forms::FieldError;
use serde::{Deserialize, Serialize};

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// One field change on a credential form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialUpdate {
    Name(String),
    Email(String),
    Password(String),
    ConfirmPassword(String),
}

/// Body of `POST /auth/login` and `POST /admin/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Body of `POST /auth/register`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// The `data` of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthGrant {
    pub user: User,
    pub token: AuthToken,
}

/// Login form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name updates are ignored; login has no name field.
    pub fn apply(&mut self, update: CredentialUpdate) {
        match update {
            CredentialUpdate::Email(v) => self.email = v,
            CredentialUpdate::Password(v) => self.password = v,
            CredentialUpdate::Name(_) | CredentialUpdate::ConfirmPassword(_) => {}
        }
    }

    pub fn validate(&self) -> Result<LoginRequest, AuthError> {
        let mut errors = Vec::new();
        check_email(&mut errors, &self.email);
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Registration form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, update: CredentialUpdate) {
        match update {
            CredentialUpdate::Name(v) => self.name = v,
            CredentialUpdate::Email(v) => self.email = v,
            CredentialUpdate::Password(v) => self.password = v,
            CredentialUpdate::ConfirmPassword(v) => self.confirm_password = v,
        }
    }

    pub fn validate(&self) -> Result<RegisterRequest, AuthError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }
        check_email(&mut errors, &self.email);
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }
        if self.password != self.confirm_password {
            errors.push(FieldError::new("confirmPassword", "Passwords do not match"));
        }
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }
        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

fn check_email(errors: &mut Vec<FieldError>, email: &str) {
    let email = email.trim();
    if email.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
        return;
    }
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if !valid {
        errors.push(FieldError::new("email", "Enter a valid email address"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(err: AuthError) -> Vec<String> {
        match err {
            AuthError::Validation(errors) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_login_form() {
        let mut form = LoginForm::new();
        assert_eq!(fields(form.validate().unwrap_err()), vec!["email", "password"]);

        form.apply(CredentialUpdate::Email(" ada@example.com ".into()));
        form.apply(CredentialUpdate::Password("pw".into()));
        let request = form.validate().unwrap();
        assert_eq!(request.email, "ada@example.com");
    }

    #[test]
    fn test_email_shape() {
        let mut form = LoginForm::new();
        form.apply(CredentialUpdate::Password("pw".into()));
        for bad in ["ada", "@example.com", "ada@localhost", "ada@.com"] {
            form.apply(CredentialUpdate::Email(bad.into()));
            assert_eq!(fields(form.validate().unwrap_err()), vec!["email"], "{}", bad);
        }
    }

    #[test]
    fn test_register_form() {
        let mut form = RegisterForm::new();
        form.apply(CredentialUpdate::Name("Ada".into()));
        form.apply(CredentialUpdate::Email("ada@example.com".into()));
        form.apply(CredentialUpdate::Password("abc".into()));
        form.apply(CredentialUpdate::ConfirmPassword("abd".into()));
        assert_eq!(
            fields(form.validate().unwrap_err()),
            vec!["password", "confirmPassword"]
        );

        form.apply(CredentialUpdate::Password("longenough".into()));
        form.apply(CredentialUpdate::ConfirmPassword("longenough".into()));
        assert_eq!(form.validate().unwrap().name, "Ada");
    }

    #[test]
    fn test_request_debug_hides_password() {
        let request = LoginRequest {
            email: "ada@example.com".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{:?}", request).contains("hunter2"));
    }

    #[test]
    fn test_grant_decodes() {
        let json = r#"{"user":{"_id":"u1","name":"Ada","email":"ada@example.com","role":"customer"},"token":"jwt"}"#;
        let grant: AuthGrant = serde_json::from_str(json).unwrap();
        assert_eq!(grant.token.as_str(), "jwt");
    }
}
