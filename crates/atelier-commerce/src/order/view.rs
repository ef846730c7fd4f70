//! Filtering, sorting and counting for the order history list.
//!
//! Everything here is pure: the list view re-derives its projection
//! whenever the orders, filter or sort change.

use crate::order::{Order, OrderStatus};
use crate::CommerceError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status filter for the order list: everything, or one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    /// The six filter keys, in tab order.
    pub const ALL: [StatusFilter; 6] = [
        StatusFilter::All,
        StatusFilter::Only(OrderStatus::Pending),
        StatusFilter::Only(OrderStatus::Accepted),
        StatusFilter::Only(OrderStatus::Rejected),
        StatusFilter::Only(OrderStatus::Completed),
        StatusFilter::Only(OrderStatus::Cancelled),
    ];

    pub fn matches(&self, order: &Order) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => order.status == *status,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StatusFilter::All => "All Orders",
            StatusFilter::Only(status) => status.display_name(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(StatusFilter::All);
        }
        s.parse::<OrderStatus>()
            .map(StatusFilter::Only)
            .map_err(|_| CommerceError::InvalidFilter(s.to_string()))
    }
}

/// Sort key for the order list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderSort {
    #[default]
    Newest,
    Oldest,
    AmountHigh,
    AmountLow,
}

impl OrderSort {
    pub const ALL: [OrderSort; 4] = [
        OrderSort::Newest,
        OrderSort::Oldest,
        OrderSort::AmountHigh,
        OrderSort::AmountLow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSort::Newest => "newest",
            OrderSort::Oldest => "oldest",
            OrderSort::AmountHigh => "amount-high",
            OrderSort::AmountLow => "amount-low",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderSort::Newest => "Newest First",
            OrderSort::Oldest => "Oldest First",
            OrderSort::AmountHigh => "Highest Amount",
            OrderSort::AmountLow => "Lowest Amount",
        }
    }
}

impl FromStr for OrderSort {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderSort::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| CommerceError::InvalidSort(s.to_string()))
    }
}

/// Order counts per filter key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub all: usize,
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    /// Count orders per status.
    pub fn tally(orders: &[Order]) -> Self {
        let mut counts = StatusCounts {
            all: orders.len(),
            ..Default::default()
        };
        for order in orders {
            match order.status {
                OrderStatus::Pending => counts.pending += 1,
                OrderStatus::Accepted => counts.accepted += 1,
                OrderStatus::Rejected => counts.rejected += 1,
                OrderStatus::Completed => counts.completed += 1,
                OrderStatus::Cancelled => counts.cancelled += 1,
            }
        }
        counts
    }

    pub fn get(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.all,
            StatusFilter::Only(OrderStatus::Pending) => self.pending,
            StatusFilter::Only(OrderStatus::Accepted) => self.accepted,
            StatusFilter::Only(OrderStatus::Rejected) => self.rejected,
            StatusFilter::Only(OrderStatus::Completed) => self.completed,
            StatusFilter::Only(OrderStatus::Cancelled) => self.cancelled,
        }
    }
}

/// The visible order list plus counts over the unfiltered list.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderProjection<'a> {
    pub orders: Vec<&'a Order>,
    pub counts: StatusCounts,
}

impl OrderProjection<'_> {
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Filter then sort `orders`.
///
/// Sorting is stable, so orders with equal keys keep their input order.
pub fn project(orders: &[Order], filter: StatusFilter, sort: OrderSort) -> OrderProjection<'_> {
    let mut visible: Vec<&Order> = orders.iter().filter(|o| filter.matches(o)).collect();
    match sort {
        OrderSort::Newest => visible.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        OrderSort::Oldest => visible.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        OrderSort::AmountHigh => visible.sort_by(|a, b| b.total_amount.cmp(&a.total_amount)),
        OrderSort::AmountLow => visible.sort_by(|a, b| a.total_amount.cmp(&b.total_amount)),
    }

    OrderProjection {
        orders: visible,
        counts: StatusCounts::tally(orders),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::order::ShippingAddress;
    use chrono::{TimeZone, Utc};

    fn order(id: &str, status: OrderStatus, cents: i64, day: u32) -> Order {
        let at = Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap();
        Order {
            id: id.into(),
            order_number: format!("ORD-{}", id),
            items: Vec::new(),
            total_amount: Money::from_cents(cents),
            status,
            shipping_address: ShippingAddress::default(),
            payment_method: "cod".to_string(),
            notes: None,
            created_at: at,
            updated_at: at,
        }
    }

    fn ids(projection: &OrderProjection<'_>) -> Vec<String> {
        projection.orders.iter().map(|o| o.id.to_string()).collect()
    }

    fn sample() -> Vec<Order> {
        vec![
            order("a", OrderStatus::Pending, 5000, 1),
            order("b", OrderStatus::Completed, 12000, 3),
            order("c", OrderStatus::Pending, 800, 2),
            order("d", OrderStatus::Cancelled, 5000, 4),
        ]
    }

    #[test]
    fn test_all_passes_everything() {
        let orders = sample();
        let projection = project(&orders, StatusFilter::All, OrderSort::Oldest);
        assert_eq!(ids(&projection), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_status_filter_keeps_exact_status() {
        let orders = sample();
        let projection = project(&orders, StatusFilter::Only(OrderStatus::Pending), OrderSort::Newest);
        assert_eq!(ids(&projection), vec!["c", "a"]);

        let projection = project(&orders, StatusFilter::Only(OrderStatus::Rejected), OrderSort::Newest);
        assert!(projection.is_empty());
    }

    #[test]
    fn test_amount_sort_is_stable() {
        let orders = sample();
        let high = project(&orders, StatusFilter::All, OrderSort::AmountHigh);
        assert_eq!(ids(&high), vec!["b", "a", "d", "c"]);

        let low = project(&orders, StatusFilter::All, OrderSort::AmountLow);
        assert_eq!(ids(&low), vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn test_counts_ignore_filter() {
        let orders = sample();
        let projection = project(&orders, StatusFilter::Only(OrderStatus::Completed), OrderSort::Newest);
        let counts = projection.counts;
        assert_eq!(counts.all, 4);
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.cancelled, 1);
        assert_eq!(counts.accepted + counts.rejected, 0);

        let sum: usize = StatusFilter::ALL[1..].iter().map(|f| counts.get(*f)).sum();
        assert_eq!(sum, counts.all);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let orders = sample();
        let first = project(&orders, StatusFilter::All, OrderSort::Newest);
        let second = project(&orders, StatusFilter::All, OrderSort::Newest);
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "accepted".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(OrderStatus::Accepted)
        );
        assert!("shipped".parse::<StatusFilter>().is_err());
        assert_eq!("amount-low".parse::<OrderSort>().unwrap(), OrderSort::AmountLow);
        assert!("cheapest".parse::<OrderSort>().is_err());
    }
}
