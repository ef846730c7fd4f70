//! Checkout.

use crate::error::AppError;
use crate::shared::{lock, Shared};
use atelier_auth::AuthStore;
use atelier_cache::KvStore;
use atelier_commerce::cart::CartStore;
use atelier_commerce::forms::CheckoutForm;
use atelier_commerce::order::Order;
use atelier_data::ApiClient;
use std::sync::atomic::{AtomicBool, Ordering};

/// Turns the cart into an order.
#[derive(Debug)]
pub struct CheckoutController<S> {
    api: ApiClient,
    cart: Shared<CartStore<S>>,
    auth: Shared<AuthStore<S>>,
    submitting: AtomicBool,
}

impl<S: KvStore> CheckoutController<S> {
    pub(crate) fn new(
        api: ApiClient,
        cart: Shared<CartStore<S>>,
        auth: Shared<AuthStore<S>>,
    ) -> Self {
        Self {
            api,
            cart,
            auth,
            submitting: AtomicBool::new(false),
        }
    }

    /// Place the order. The cart is cleared only once the backend has
    /// accepted it.
    pub async fn submit(&self, form: &CheckoutForm) -> Result<Order, AppError> {
        if !lock(&self.auth).is_authenticated() {
            return Err(AppError::NotAuthenticated);
        }
        let request = form.build_request(lock(&self.cart).cart())?;

        if self.submitting.swap(true, Ordering::SeqCst) {
            return Err(AppError::Busy);
        }
        let guard = SubmitGuard(&self.submitting);
        let result = self.api.create_order(&request).await;
        drop(guard);

        let order = result?;
        tracing::info!(order = %order.id, number = %order.order_number, "order placed");
        lock(&self.cart).clear_cart();
        Ok(order)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }
}

/// Releases the busy flag when the submit finishes or its future is dropped.
struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
