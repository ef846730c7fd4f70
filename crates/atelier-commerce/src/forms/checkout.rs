//! Checkout form.

use crate::cart::Cart;
use crate::forms::{require, FieldError};
use crate::ids::ProductId;
use crate::order::ShippingAddress;
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Payment methods the store accepts.
pub const PAYMENT_METHODS: [&str; 2] = ["cod", "card"];

/// One field change on the checkout form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutUpdate {
    Name(String),
    Phone(String),
    Address(String),
    City(String),
    State(String),
    PostalCode(String),
    PaymentMethod(String),
    Notes(String),
}

/// Checkout form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutForm {
    pub shipping: ShippingAddress,
    pub payment_method: String,
    pub notes: String,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            shipping: ShippingAddress::default(),
            payment_method: PAYMENT_METHODS[0].to_string(),
            notes: String::new(),
        }
    }
}

impl CheckoutForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, update: CheckoutUpdate) {
        match update {
            CheckoutUpdate::Name(v) => self.shipping.name = v,
            CheckoutUpdate::Phone(v) => self.shipping.phone = v,
            CheckoutUpdate::Address(v) => self.shipping.address = v,
            CheckoutUpdate::City(v) => self.shipping.city = v,
            CheckoutUpdate::State(v) => self.shipping.state = v,
            CheckoutUpdate::PostalCode(v) => self.shipping.postal_code = v,
            CheckoutUpdate::PaymentMethod(v) => self.payment_method = v,
            CheckoutUpdate::Notes(v) => self.notes = v,
        }
    }

    /// Check required fields and the payment method.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut errors = Vec::new();
        let s = &self.shipping;
        require(&mut errors, "name", "Name", &s.name);
        require(&mut errors, "phone", "Phone", &s.phone);
        require(&mut errors, "address", "Address", &s.address);
        require(&mut errors, "city", "City", &s.city);
        require(&mut errors, "state", "State", &s.state);
        require(&mut errors, "postalCode", "Postal code", &s.postal_code);
        if !PAYMENT_METHODS.contains(&self.payment_method.as_str()) {
            errors.push(FieldError::new("paymentMethod", "Select a payment method"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::Validation(errors))
        }
    }

    /// Validate and build the order request for `cart`.
    pub fn build_request(&self, cart: &Cart) -> Result<CreateOrderRequest, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        self.validate()?;

        let trimmed = |v: &str| v.trim().to_string();
        let s = &self.shipping;
        let notes = self.notes.trim();
        Ok(CreateOrderRequest {
            items: cart
                .items()
                .iter()
                .map(|item| OrderLine {
                    product_id: item.product.id.clone(),
                    quantity: item.quantity,
                    size: item.selected_size.clone(),
                    color: item.selected_color.clone(),
                })
                .collect(),
            shipping_address: ShippingAddress {
                name: trimmed(&s.name),
                phone: trimmed(&s.phone),
                address: trimmed(&s.address),
                city: trimmed(&s.city),
                state: trimmed(&s.state),
                postal_code: trimmed(&s.postal_code),
            },
            payment_method: self.payment_method.clone(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }
}

/// One line of a new order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::money::Money;

    fn filled() -> CheckoutForm {
        let mut form = CheckoutForm::new();
        for update in [
            CheckoutUpdate::Name(" Ada Lovelace ".into()),
            CheckoutUpdate::Phone("555-0100".into()),
            CheckoutUpdate::Address("12 Elm St".into()),
            CheckoutUpdate::City("Austin".into()),
            CheckoutUpdate::State("TX".into()),
            CheckoutUpdate::PostalCode("73301".into()),
        ] {
            form.apply(update);
        }
        form
    }

    #[test]
    fn test_missing_fields_reported() {
        let mut form = CheckoutForm::new();
        form.apply(CheckoutUpdate::Name("Ada".into()));
        match form.validate() {
            Err(CommerceError::Validation(errors)) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["phone", "address", "city", "state", "postalCode"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_payment_method() {
        let mut form = filled();
        form.apply(CheckoutUpdate::PaymentMethod("barter".into()));
        assert!(matches!(form.validate(), Err(CommerceError::Validation(e)) if e[0].field == "paymentMethod"));
    }

    #[test]
    fn test_empty_cart_rejected() {
        assert_eq!(filled().build_request(&Cart::new()), Err(CommerceError::EmptyCart));
    }

    #[test]
    fn test_build_request() {
        let mut cart = Cart::new();
        let tee = Product::new("tee", "Tee", Money::from_cents(2000));
        cart.add(&tee, 2, Some("M"), None);

        let request = filled().build_request(&cart).unwrap();
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].quantity, 2);
        assert_eq!(request.shipping_address.name, "Ada Lovelace");
        assert_eq!(request.notes, None);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["items"][0]["productId"], "tee");
        assert_eq!(json["items"][0]["size"], "M");
        assert!(json["items"][0].get("color").is_none());
        assert_eq!(json["shippingAddress"]["postalCode"], "73301");
        assert_eq!(json["paymentMethod"], "cod");
    }
}
