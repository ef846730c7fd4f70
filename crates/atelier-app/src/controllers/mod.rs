//! Page controllers.
//!
//! Each controller owns one page's loading/error handling and pushes
//! results into the shared stores. Errors are caught here and turned
//! into store state or a returned [`crate::AppError`]; nothing is retried.

mod admin;
mod catalog;
mod checkout;
mod orders;
mod session;

pub use admin::AdminController;
pub use catalog::CatalogController;
pub use checkout::CheckoutController;
pub use orders::OrdersController;
pub use session::SessionController;
