//! Product catalog module.
//!
//! Contains product types, the listing query, pagination and the
//! product store.

mod pagination;
mod product;
mod query;
mod store;

pub use pagination::Pagination;
pub use product::Product;
pub use query::{ProductQuery, ProductSort, SortField, SortOrder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use store::ProductStore;
