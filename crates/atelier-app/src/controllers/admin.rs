//! Admin product management.

use crate::error::AppError;
use crate::shared::{lock, Shared};
use atelier_auth::AuthStore;
use atelier_cache::KvStore;
use atelier_commerce::catalog::{Product, ProductStore};
use atelier_commerce::forms::ProductForm;
use atelier_commerce::ids::ProductId;
use atelier_data::ApiClient;

/// Product create/update/delete for admins.
///
/// On failure nothing local changes; callers show
/// [`AppError::user_message`].
#[derive(Debug)]
pub struct AdminController<S> {
    api: ApiClient,
    auth: Shared<AuthStore<S>>,
    products: Shared<ProductStore>,
}

impl<S: KvStore> AdminController<S> {
    pub(crate) fn new(
        api: ApiClient,
        auth: Shared<AuthStore<S>>,
        products: Shared<ProductStore>,
    ) -> Self {
        Self {
            api,
            auth,
            products,
        }
    }

    pub async fn create_product(&self, form: &ProductForm) -> Result<Product, AppError> {
        self.require_admin()?;
        let product = self.api.create_product(form).await?;
        tracing::info!(product = %product.id, "product created");

        let mut store = lock(&self.products);
        let mut products = store.products().to_vec();
        products.insert(0, product.clone());
        store.set_products(products);
        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: &ProductId,
        form: &ProductForm,
    ) -> Result<Product, AppError> {
        self.require_admin()?;
        let product = self.api.update_product(id, form).await?;
        tracing::info!(product = %id, "product updated");

        let mut store = lock(&self.products);
        let products = store
            .products()
            .iter()
            .map(|p| if &p.id == id { product.clone() } else { p.clone() })
            .collect();
        store.set_products(products);
        if store.selected().is_some_and(|p| &p.id == id) {
            store.set_selected(Some(product.clone()));
        }
        Ok(product)
    }

    pub async fn delete_product(&self, id: &ProductId) -> Result<(), AppError> {
        self.require_admin()?;
        self.api.delete_product(id).await?;
        tracing::info!(product = %id, "product deleted");

        let mut store = lock(&self.products);
        let products = store
            .products()
            .iter()
            .filter(|p| &p.id != id)
            .cloned()
            .collect();
        store.set_products(products);
        if store.selected().is_some_and(|p| &p.id == id) {
            store.set_selected(None);
        }
        Ok(())
    }

    fn require_admin(&self) -> Result<(), AppError> {
        let auth = lock(&self.auth);
        if !auth.is_authenticated() {
            return Err(AppError::NotAuthenticated);
        }
        if !auth.is_admin() {
            return Err(AppError::Forbidden);
        }
        Ok(())
    }
}
