//! Storefront domain types and client-side state.
//!
//! - **Catalog**: products, listing queries, pagination, the product store
//! - **Cart**: variant-merging cart and its persisted store
//! - **Order**: orders, the order-list view-model, the status tracker
//! - **Forms**: typed checkout and admin product forms
//!
//! # Example
//!
//! ```rust
//! use atelier_cache::MemoryStore;
//! use atelier_commerce::prelude::*;
//!
//! let tee = Product::new("tee", "Linen Tee", Money::from_cents(2500));
//!
//! let mut cart = CartStore::hydrate(MemoryStore::new());
//! cart.add_to_cart(&tee, 2, Some("M"), None);
//! cart.add_to_cart(&tee, 1, Some("M"), None);
//!
//! assert_eq!(cart.item_count(), 3);
//! assert_eq!(cart.total().to_string(), "$75.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod forms;
pub mod order;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Pagination, Product, ProductQuery, ProductSort, ProductStore};

    // Cart
    pub use crate::cart::{Cart, CartItem, CartStore};

    // Orders
    pub use crate::order::{
        project, Order, OrderItem, OrderProjection, OrderSort, OrderStatus, ShippingAddress,
        StatusCounts, StatusFilter, StatusTrack, StepState, TrackerStep,
    };

    // Forms
    pub use crate::forms::{
        CheckoutForm, CheckoutUpdate, CreateOrderRequest, FieldError, FormPart, ProductForm,
        ProductUpdate,
    };
}
