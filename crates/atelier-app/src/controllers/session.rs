//! Sign-in, registration and session restore.

use crate::error::AppError;
use crate::shared::{lock, Shared};
use atelier_auth::{AuthGrant, AuthStore, LoginForm, RegisterForm, User};
use atelier_cache::KvStore;
use atelier_data::{ApiClient, ApiError};

/// Drives the [`AuthStore`] from the auth endpoints.
#[derive(Debug)]
pub struct SessionController<S> {
    api: ApiClient,
    auth: Shared<AuthStore<S>>,
}

impl<S: KvStore> SessionController<S> {
    pub(crate) fn new(api: ApiClient, auth: Shared<AuthStore<S>>) -> Self {
        Self { api, auth }
    }

    /// Customer sign-in.
    pub async fn login(&self, form: &LoginForm) -> Result<User, AppError> {
        let request = form.validate()?;
        let grant = self.api.login(&request).await?;
        Ok(self.accept(grant))
    }

    /// Admin console sign-in. A non-admin account is refused and nothing
    /// is stored.
    pub async fn admin_login(&self, form: &LoginForm) -> Result<User, AppError> {
        let request = form.validate()?;
        let grant = self.api.admin_login(&request).await?;
        if !grant.user.is_admin() {
            tracing::warn!(user = %grant.user.id, "non-admin account refused at admin login");
            return Err(AppError::Forbidden);
        }
        Ok(self.accept(grant))
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<User, AppError> {
        let request = form.validate()?;
        let grant = self.api.register(&request).await?;
        Ok(self.accept(grant))
    }

    /// Sign out. The local session is always cleared, even when the
    /// backend call fails.
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            tracing::warn!(error = %e, "logout request failed, clearing session anyway");
        }
        lock(&self.auth).logout();
    }

    /// Check a persisted token against the backend on startup.
    ///
    /// A rejected token ends the session. A network failure keeps the
    /// persisted session as-is so the app still starts offline.
    pub async fn restore(&self) -> Option<User> {
        if lock(&self.auth).token().is_none() {
            return None;
        }

        match self.api.me().await {
            Ok(user) => {
                lock(&self.auth).set_user(Some(user.clone()));
                Some(user)
            }
            Err(ApiError::Unauthorized { .. }) => {
                tracing::debug!("persisted session rejected");
                lock(&self.auth).logout();
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not verify session");
                lock(&self.auth).user().cloned()
            }
        }
    }

    pub fn current_user(&self) -> Option<User> {
        lock(&self.auth).user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        lock(&self.auth).is_authenticated()
    }

    fn accept(&self, grant: AuthGrant) -> User {
        let user = grant.user.clone();
        lock(&self.auth).login(grant.user, grant.token);
        user
    }
}
