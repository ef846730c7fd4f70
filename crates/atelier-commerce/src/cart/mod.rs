//! Shopping cart module.
//!
//! [`Cart`] holds the merge-by-variant rules; [`CartStore`] pairs it with
//! durable storage.

mod cart;
mod store;

pub use cart::{Cart, CartItem};
pub use store::CartStore;
