//! REST client for the Atelier storefront backend.
//!
//! [`ApiClient`] owns the cross-cutting rules: the bearer token from
//! [`Credentials`], envelope decoding, and the 401 handling that clears
//! the token and names the login route to go to. Endpoints are plain
//! async methods on the client; the wire is behind [`Transport`] so tests
//! can run without a server.
//!
//! # Example
//!
//! ```rust,ignore
//! use atelier_data::{Anonymous, ApiClient, DEFAULT_API_URL};
//! use atelier_commerce::catalog::ProductQuery;
//! use std::sync::Arc;
//!
//! let client = ApiClient::http(DEFAULT_API_URL, Arc::new(Anonymous))?;
//! let page = client.list_products(&ProductQuery::new().with_search("linen")).await?;
//! for product in &page.data {
//!     println!("{} {}", product.title, product.price);
//! }
//! ```

mod auth;
mod client;
mod envelope;
mod error;
pub mod mock;
mod orders;
mod products;
mod request;
mod response;
mod transport;

pub use client::{
    login_path_for, Anonymous, ApiClient, Credentials, ADMIN_LOGIN_PATH, CUSTOMER_LOGIN_PATH,
    DEFAULT_API_URL,
};
pub use envelope::{ApiResponse, Paginated};
pub use error::{ApiError, SESSION_EXPIRED};
pub use request::{Body, Method, Request, RequestBuilder};
pub use response::Response;
pub use transport::{HttpTransport, Transport, DEFAULT_TIMEOUT};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiClient, ApiError, Credentials, Paginated, Transport};
}
