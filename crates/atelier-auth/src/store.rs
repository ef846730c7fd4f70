//! Persisted auth store.

use crate::session::AuthSession;
use crate::token::AuthToken;
use crate::user::User;
use atelier_cache::{keys, Cache, CacheError, KvStore};

/// Current user and token, paired with durable storage.
///
/// Authenticated iff a user is present. Every mutation is written through;
/// write failures are logged and swallowed.
#[derive(Debug)]
pub struct AuthStore<S> {
    session: AuthSession,
    cache: Cache<S>,
}

impl<S: KvStore> AuthStore<S> {
    /// Load the persisted session, starting signed out if there is none
    /// or it cannot be read.
    pub fn hydrate(store: S) -> Self {
        let cache = Cache::new(store);
        let session = match cache.get::<AuthSession>(keys::AUTH) {
            Ok(Some(session)) => session.normalized(),
            Ok(None) => AuthSession::anonymous(),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable auth session");
                AuthSession::anonymous()
            }
        };
        Self { session, cache }
    }

    /// Set user and token together.
    pub fn login(&mut self, user: User, token: AuthToken) {
        tracing::debug!(user = %user.id, role = user.role.as_str(), "logged in");
        self.session = AuthSession::authenticated(user, token);
        self.persist();
    }

    /// Clear user and token together.
    pub fn logout(&mut self) {
        tracing::debug!("logged out");
        self.session = AuthSession::anonymous();
        self.persist();
    }

    /// Replace the user, leaving the token alone.
    pub fn set_user(&mut self, user: Option<User>) {
        self.session.is_authenticated = user.is_some();
        self.session.user = user;
        self.persist();
    }

    /// Replace the token, leaving the user alone.
    pub fn set_token(&mut self, token: Option<AuthToken>) {
        self.session.token = token;
        self.persist();
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.session.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(User::is_admin)
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Write the current session unconditionally.
    pub fn flush(&self) -> Result<(), CacheError> {
        self.cache.set(keys::AUTH, &self.session)
    }

    fn persist(&self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "failed to persist auth session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::Role;
    use atelier_cache::MemoryStore;
    use std::sync::Arc;

    fn ada() -> User {
        User::new("u1", "Ada", "ada@example.com", Role::Customer)
    }

    #[test]
    fn test_login_logout_round_trip() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = AuthStore::hydrate(Arc::clone(&backend));
        assert!(!store.is_authenticated());

        store.login(ada(), AuthToken::new("tok"));
        let reloaded = AuthStore::hydrate(Arc::clone(&backend));
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.token().map(AuthToken::as_str), Some("tok"));
        assert_eq!(reloaded.user().map(|u| u.name.as_str()), Some("Ada"));

        store.logout();
        let reloaded = AuthStore::hydrate(Arc::clone(&backend));
        assert!(!reloaded.is_authenticated());
        assert!(reloaded.user().is_none());
        assert!(reloaded.token().is_none());
    }

    #[test]
    fn test_authenticated_follows_user() {
        let mut store = AuthStore::hydrate(MemoryStore::new());
        store.set_token(Some(AuthToken::new("tok")));
        assert!(!store.is_authenticated());

        store.set_user(Some(ada()));
        assert!(store.is_authenticated());

        store.set_user(None);
        assert!(!store.is_authenticated());
        assert!(store.token().is_some());
    }

    #[test]
    fn test_clearing_token_keeps_user() {
        let mut store = AuthStore::hydrate(MemoryStore::new());
        store.login(ada(), AuthToken::new("tok"));
        store.set_token(None);
        assert!(store.is_authenticated());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_is_admin() {
        let mut store = AuthStore::hydrate(MemoryStore::new());
        assert!(!store.is_admin());
        store.login(
            User::new("a1", "Root", "root@example.com", Role::Admin),
            AuthToken::new("tok"),
        );
        assert!(store.is_admin());
    }

    #[test]
    fn test_hydrate_discards_corrupt_state() {
        let backend = MemoryStore::new();
        backend.set_raw(keys::AUTH, b"not json").unwrap();
        let store = AuthStore::hydrate(backend);
        assert!(!store.is_authenticated());
    }
}
