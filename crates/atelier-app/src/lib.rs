//! Application root for the Atelier storefront and admin console.
//!
//! [`App`] owns the cart, auth and product stores as explicit
//! containers. Page controllers fetch through the API client, track
//! loading and error state, guard against duplicate submissions and drop
//! stale responses.

mod app;
mod config;
pub mod controllers;
mod error;
pub mod prelude;
mod shared;
mod ticket;

pub use app::App;
pub use config::AppConfig;
pub use error::{AppError, LoadOutcome};
pub use shared::Shared;
pub use ticket::{RequestTicket, Ticket};
