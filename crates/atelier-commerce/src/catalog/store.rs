//! Product store shared by the listing and detail views.

use crate::catalog::{Pagination, Product};
use crate::ids::ProductId;

/// Currently-loaded products plus loading/error flags.
///
/// The listing and the detail slot load independently, so each has its
/// own loading flag.
///
/// Pure setters with no merge or validation logic: whatever the last
/// successful fetch returned replaces what was there.
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    products: Vec<Product>,
    selected: Option<Product>,
    pagination: Option<Pagination>,
    categories: Vec<String>,
    loading: bool,
    detail_loading: bool,
    error: Option<String>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    pub fn selected(&self) -> Option<&Product> {
        self.selected.as_ref()
    }

    pub fn set_selected(&mut self, product: Option<Product>) {
        self.selected = product;
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn set_pagination(&mut self, pagination: Option<Pagination>) {
        self.pagination = pagination;
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.categories = categories;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_detail_loading(&self) -> bool {
        self.detail_loading
    }

    pub fn set_detail_loading(&mut self, loading: bool) {
        self.detail_loading = loading;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Look up a product in the loaded list.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }
}
