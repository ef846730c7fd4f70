//! Shipping address.

use serde::{Deserialize, Serialize};

/// Where an order ships to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Recipient name.
    pub name: String,
    pub phone: String,
    /// Street address.
    pub address: String,
    pub city: String,
    /// State/province.
    pub state: String,
    pub postal_code: String,
}

impl ShippingAddress {
    /// Single-line form for summaries (e.g., "12 Elm St, Austin, TX 73301").
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address, self.city, self.state, self.postal_code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let json = r#"{"name":"Ada","phone":"555","address":"12 Elm St","city":"Austin","state":"TX","postalCode":"73301"}"#;
        let address: ShippingAddress = serde_json::from_str(json).unwrap();
        assert_eq!(address.postal_code, "73301");
        assert_eq!(address.one_line(), "12 Elm St, Austin, TX 73301");
    }
}
