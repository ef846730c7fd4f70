//! Commerce error types.

use crate::forms::FieldError;
use thiserror::Error;

/// Errors raised by domain parsing, selection checks and form validation.
///
/// The cart store itself never fails; these surface from the edges where
/// user input is turned into domain values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Unknown order status string.
    #[error("Invalid order status: {0}")]
    InvalidStatus(String),

    /// Unknown status filter string.
    #[error("Invalid status filter: {0}")]
    InvalidFilter(String),

    /// Unknown sort key.
    #[error("Invalid sort option: {0}")]
    InvalidSort(String),

    /// Price that does not parse as a decimal amount.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// A variant option must be chosen before adding to cart.
    #[error("Please select a {0}")]
    OptionRequired(&'static str),

    /// The chosen option is not offered by the product.
    #[error("{option} '{value}' is not available for this product")]
    InvalidOption { option: &'static str, value: String },

    /// Product has no stock left.
    #[error("{0} is out of stock")]
    OutOfStock(String),

    /// Checkout attempted with an empty cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Form failed validation.
    #[error("{}", summarize(.0))]
    Validation(Vec<FieldError>),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
