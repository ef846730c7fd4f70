//! Persisted cart store.

use crate::cart::{Cart, CartItem};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use atelier_cache::{keys, Cache, CacheError, KvStore};

/// The cart paired with its durable-storage adapter.
///
/// State is read once in [`CartStore::hydrate`] and written through
/// after every mutating call. A failed write is logged and otherwise
/// ignored: the in-memory cart stays authoritative and the store never
/// reports an error to its caller.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    cache: Cache<S>,
}

impl<S: KvStore> CartStore<S> {
    /// Load the persisted cart, starting empty if there is none or it
    /// cannot be read.
    pub fn hydrate(store: S) -> Self {
        let cache = Cache::new(store);
        let cart = match cache.get::<Cart>(keys::CART) {
            Ok(Some(cart)) => {
                tracing::debug!(lines = cart.line_count(), "cart restored");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable cart");
                Cart::new()
            }
        };
        Self { cart, cache }
    }

    pub fn add_to_cart(
        &mut self,
        product: &Product,
        quantity: u32,
        size: Option<&str>,
        color: Option<&str>,
    ) {
        self.cart.add(product, quantity, size, color);
        tracing::debug!(product = %product.id, quantity, ?size, ?color, "added to cart");
        self.persist();
    }

    /// Remove every line for `product_id`, all variants included.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) {
        let removed = self.cart.remove_product(product_id);
        tracing::debug!(product = %product_id, removed, "removed from cart");
        self.persist();
    }

    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        self.cart.update_quantity(product_id, quantity);
        tracing::debug!(product = %product_id, quantity, "cart quantity updated");
        self.persist();
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        tracing::debug!("cart cleared");
        self.persist();
    }

    pub fn total(&self) -> Money {
        self.cart.total()
    }

    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Write the current cart unconditionally.
    pub fn flush(&self) -> Result<(), CacheError> {
        self.cache.set(keys::CART, &self.cart)
    }

    fn persist(&self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "failed to persist cart");
        }
    }
}
