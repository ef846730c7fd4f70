//! Product listing and detail pages.

use crate::error::LoadOutcome;
use crate::shared::{lock, Shared};
use crate::ticket::RequestTicket;
use atelier_commerce::catalog::{ProductQuery, ProductStore};
use atelier_commerce::ids::ProductId;
use atelier_data::ApiClient;

/// Loads catalog data into the shared [`ProductStore`].
///
/// List and detail loads each keep their own ticket, so a slow response
/// never overwrites a newer one.
#[derive(Debug)]
pub struct CatalogController {
    api: ApiClient,
    store: Shared<ProductStore>,
    list_ticket: RequestTicket,
    detail_ticket: RequestTicket,
    page_size: u32,
}

impl CatalogController {
    pub(crate) fn new(api: ApiClient, store: Shared<ProductStore>, page_size: u32) -> Self {
        Self {
            api,
            store,
            list_ticket: RequestTicket::new(),
            detail_ticket: RequestTicket::new(),
            page_size,
        }
    }

    /// A first-page query using the configured page size.
    pub fn query(&self) -> ProductQuery {
        ProductQuery::new().with_pagination(1, self.page_size)
    }

    /// Fetch a listing page.
    pub async fn load_products(&self, query: ProductQuery) -> LoadOutcome {
        let ticket = self.list_ticket.issue();
        {
            let mut store = lock(&self.store);
            store.set_loading(true);
            store.set_error(None);
        }

        let result = self.api.list_products(&query).await;
        if !self.list_ticket.is_current(ticket) {
            tracing::debug!(page = query.page, "dropping stale product listing");
            return LoadOutcome::Stale;
        }

        let mut store = lock(&self.store);
        store.set_loading(false);
        match result {
            Ok(page) => {
                store.set_products(page.data);
                store.set_pagination(Some(page.pagination));
                LoadOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load products");
                store.set_error(Some(e.user_message()));
                LoadOutcome::from_error(&e)
            }
        }
    }

    /// Fetch one product into the selected slot.
    pub async fn load_product(&self, id: &ProductId) -> LoadOutcome {
        let ticket = self.detail_ticket.issue();
        {
            let mut store = lock(&self.store);
            store.set_detail_loading(true);
            store.set_selected(None);
            store.set_error(None);
        }

        let result = self.api.get_product(id).await;
        if !self.detail_ticket.is_current(ticket) {
            tracing::debug!(product = %id, "dropping stale product detail");
            return LoadOutcome::Stale;
        }

        let mut store = lock(&self.store);
        store.set_detail_loading(false);
        match result {
            Ok(product) => {
                store.set_selected(Some(product));
                LoadOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(product = %id, error = %e, "failed to load product");
                store.set_error(Some(e.user_message()));
                LoadOutcome::from_error(&e)
            }
        }
    }

    /// Fetch the category list for the filter sidebar.
    pub async fn load_categories(&self) -> LoadOutcome {
        match self.api.categories().await {
            Ok(categories) => {
                lock(&self.store).set_categories(categories);
                LoadOutcome::Applied
            }
            Err(e) => {
                // Categories are optional chrome; keep the old list
                tracing::warn!(error = %e, "failed to load categories");
                LoadOutcome::from_error(&e)
            }
        }
    }

    /// Read the store.
    pub fn with_store<R>(&self, f: impl FnOnce(&ProductStore) -> R) -> R {
        f(&lock(&self.store))
    }
}
