//! Order types.

use crate::ids::{OrderId, ProductId};
use crate::money::Money;
use crate::order::ShippingAddress;
use crate::CommerceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order status, as assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, awaiting review.
    #[default]
    Pending,
    /// Accepted and being fulfilled.
    Accepted,
    /// Refused by the store.
    Rejected,
    /// Delivered.
    Completed,
    /// Cancelled by the customer.
    Cancelled,
}

impl OrderStatus {
    /// Every status, in display order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::Rejected,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if no further transition can happen.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Rejected | OrderStatus::Completed | OrderStatus::Cancelled
        )
    }

    /// Check if the customer may still cancel.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CommerceError::InvalidStatus(s.to_string()))
    }
}

/// Snapshot of a purchased line, frozen at order time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(alias = "product")]
    pub product_id: ProductId,
    pub title: String,
    /// Unit price at order time.
    pub price: Money,
    pub quantity: u32,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl OrderItem {
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

/// An order placed by a customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: OrderId,
    /// Human-readable order number.
    pub order_number: String,
    pub items: Vec<OrderItem>,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Sum of item quantities.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    pub fn can_cancel(&self) -> bool {
        self.status.can_cancel()
    }
}
