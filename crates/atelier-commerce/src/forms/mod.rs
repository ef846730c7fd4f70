//! Typed form models.
//!
//! Each form has one update variant per field; front-ends send a
//! `*Update` value to `apply` instead of poking fields by name.

mod checkout;
mod product;

pub use checkout::{CheckoutForm, CheckoutUpdate, CreateOrderRequest, OrderLine, PAYMENT_METHODS};
pub use product::{FormPart, ProductForm, ProductUpdate};

use serde::{Deserialize, Serialize};

/// A validation failure tied to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Push a "required" error when `value` is blank.
pub(crate) fn require(errors: &mut Vec<FieldError>, field: &str, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{} is required", label)));
    }
}
