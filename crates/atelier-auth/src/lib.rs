//! Authentication state for Atelier.
//!
//! Holds the signed-in user and bearer token, persisted through
//! `atelier-cache`, plus the login/registration forms.

mod credentials;
mod error;
mod session;
mod store;
mod token;
mod user;

pub use credentials::{
    AuthGrant, CredentialUpdate, LoginForm, LoginRequest, RegisterForm, RegisterRequest,
    MIN_PASSWORD_LEN,
};
pub use error::AuthError;
pub use session::AuthSession;
pub use store::AuthStore;
pub use token::AuthToken;
pub use user::{Role, User};
