//! Prelude for convenient imports.
//!
//! ```rust,ignore
//! use atelier_app::prelude::*;
//! ```

pub use crate::controllers::{
    AdminController, CatalogController, CheckoutController, OrdersController, SessionController,
};
pub use crate::{App, AppConfig, AppError, LoadOutcome};

pub use atelier_auth::{AuthStore, LoginForm, RegisterForm, Role, User};
pub use atelier_cache::{FileStore, KvStore, MemoryStore};
pub use atelier_commerce::prelude::*;
pub use atelier_data::{ApiClient, ApiError};
