//! The application root.

use crate::config::AppConfig;
use crate::controllers::{
    AdminController, CatalogController, CheckoutController, OrdersController, SessionController,
};
use crate::error::AppError;
use crate::shared::{lock, shared, Shared};
use atelier_auth::AuthStore;
use atelier_cache::KvStore;
use atelier_commerce::cart::CartStore;
use atelier_commerce::catalog::ProductStore;
use atelier_data::{ApiClient, ApiError, Credentials, HttpTransport, Transport};
use std::sync::{Arc, MutexGuard};

/// Owns every store, the API client and the page controllers.
///
/// Created once with [`App::init`], which hydrates the persisted stores,
/// and torn down with [`App::shutdown`], which flushes them.
///
/// # Example
///
/// ```rust,ignore
/// let storage = Arc::new(FileStore::open(".atelier")?);
/// let app = App::connect(AppConfig::default(), storage)?;
/// app.session().restore().await;
/// app.catalog().load_products(app.catalog().query()).await;
/// app.shutdown()?;
/// ```
#[derive(Debug)]
pub struct App<S> {
    config: AppConfig,
    api: ApiClient,
    cart: Shared<CartStore<S>>,
    auth: Shared<AuthStore<S>>,
    products: Shared<ProductStore>,
    catalog: CatalogController,
    orders: OrdersController,
    session: SessionController<S>,
    checkout: CheckoutController<S>,
    admin: AdminController<S>,
}

impl<S: KvStore + Clone + 'static> App<S> {
    /// Hydrate the stores from `storage` and wire the controllers to
    /// `transport`.
    pub fn init(config: AppConfig, storage: S, transport: impl Transport + 'static) -> Self {
        let cart = shared(CartStore::hydrate(storage.clone()));
        let auth = shared(AuthStore::hydrate(storage));
        let products = shared(ProductStore::new());

        let credentials: Arc<dyn Credentials> = auth.clone();
        let api = ApiClient::new(transport, credentials);

        {
            let cart = lock(&cart);
            let auth = lock(&auth);
            tracing::info!(
                app = %config.name,
                cart_items = cart.item_count(),
                signed_in = auth.is_authenticated(),
                "app initialized"
            );
        }

        Self {
            catalog: CatalogController::new(api.clone(), products.clone(), config.page_size),
            orders: OrdersController::new(api.clone()),
            session: SessionController::new(api.clone(), auth.clone()),
            checkout: CheckoutController::new(api.clone(), cart.clone(), auth.clone()),
            admin: AdminController::new(api.clone(), auth.clone(), products.clone()),
            config,
            api,
            cart,
            auth,
            products,
        }
    }

    /// [`App::init`] over HTTP to the configured API URL.
    pub fn connect(config: AppConfig, storage: S) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(&config.api_url)?;
        Ok(Self::init(config, storage, transport))
    }

    /// Flush every persisted store.
    pub fn shutdown(self) -> Result<(), AppError> {
        lock(&self.cart).flush()?;
        lock(&self.auth).flush()?;
        tracing::info!(app = %self.config.name, "app shut down");
        Ok(())
    }

    /// Record the current route. Decides where a rejected session sends
    /// the user.
    pub fn navigate(&self, path: &str) {
        tracing::debug!(path, "navigate");
        self.api.set_location(path);
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Lock the cart store. Do not hold across an `.await`.
    pub fn cart(&self) -> MutexGuard<'_, CartStore<S>> {
        lock(&self.cart)
    }

    /// Lock the auth store. Do not hold across an `.await`.
    pub fn auth(&self) -> MutexGuard<'_, AuthStore<S>> {
        lock(&self.auth)
    }

    /// Lock the product store. Do not hold across an `.await`.
    pub fn products(&self) -> MutexGuard<'_, ProductStore> {
        lock(&self.products)
    }

    pub fn catalog(&self) -> &CatalogController {
        &self.catalog
    }

    pub fn orders(&self) -> &OrdersController {
        &self.orders
    }

    pub fn session(&self) -> &SessionController<S> {
        &self.session
    }

    pub fn checkout(&self) -> &CheckoutController<S> {
        &self.checkout
    }

    pub fn admin(&self) -> &AdminController<S> {
        &self.admin
    }
}
