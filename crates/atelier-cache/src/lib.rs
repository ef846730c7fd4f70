//! Durable client-side storage for the Atelier storefront.
//!
//! Stores persist their state through a [`Cache`] wrapped around a
//! [`KvStore`] backend. The backend is swappable: [`FileStore`] survives
//! restarts, [`MemoryStore`] is used in tests.
//!
//! # Example
//!
//! ```rust
//! use atelier_cache::{keys, Cache, MemoryStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Default)]
//! struct Cart {
//!     items: Vec<String>,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set(keys::CART, &Cart::default()).unwrap();
//! let cart: Option<Cart> = cache.get(keys::CART).unwrap();
//! assert!(cart.is_some());
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::{Cache, KvStore};
pub use store::{FileStore, MemoryStore};

/// Stable storage keys shared by the persisted stores.
pub mod keys {
    /// Cart contents.
    pub const CART: &str = "cart-storage";
    /// Auth session (user + token).
    pub const AUTH: &str = "auth-storage";
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{keys, Cache, CacheError, FileStore, KvStore, MemoryStore};
}
