//! Key-Value store abstraction with automatic serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// A raw byte-oriented key-value backend.
///
/// Implementations must be synchronous: stores write through on every
/// mutation and read once at startup.
pub trait KvStore: Send + Sync {
    /// Read the raw bytes stored under `key`.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Write raw bytes under `key`, replacing any previous value.
    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check whether `key` exists.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get_raw(key)?.is_some())
    }

    /// List all keys.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        (**self).set_raw(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        (**self).keys()
    }
}

/// Type-safe cache over a [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
///
/// # Example
///
/// ```rust
/// use atelier_cache::{Cache, MemoryStore};
///
/// let cache = Cache::new(MemoryStore::new());
/// cache.set("greeting", &"hello").unwrap();
/// let value: Option<String> = cache.get("greeting").unwrap();
/// assert_eq!(value.as_deref(), Some("hello"));
/// ```
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: KvStore> Cache<S> {
    /// Wrap a backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set_raw(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }

    /// Borrow the underlying backend.
    pub fn store(&self) -> &S {
        &self.store
    }
}
