//! Cart and line item types.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A line in the cart.
///
/// Identity is `(product id, selected size, selected color)`: adding the
/// same triple again merges into this line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product snapshot taken when the line was created.
    pub product: Product,
    /// Quantity, at least 1 for any line the store keeps.
    pub quantity: u32,
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
}

impl CartItem {
    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.product.price * self.quantity
    }

    /// Check whether this line is the given product variant.
    ///
    /// Absent options only match absent options.
    pub fn is_variant(&self, product_id: &ProductId, size: Option<&str>, color: Option<&str>) -> bool {
        &self.product.id == product_id
            && self.selected_size.as_deref() == size
            && self.selected_color.as_deref() == color
    }

    /// Variant label for display (e.g., "M / Black").
    pub fn variant_label(&self) -> Option<String> {
        let parts: Vec<&str> = [self.selected_size.as_deref(), self.selected_color.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" / "))
        }
    }
}

/// The shopping cart.
///
/// Performs no validation and cannot fail: callers are responsible for
/// passing positive quantities to [`Cart::add`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product variant, merging into an existing line for the same
    /// `(product, size, color)` or appending a new line.
    pub fn add(&mut self, product: &Product, quantity: u32, size: Option<&str>, color: Option<&str>) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.is_variant(&product.id, size, color))
        {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return;
        }

        self.items.push(CartItem {
            product: product.clone(),
            quantity,
            selected_size: size.map(str::to_string),
            selected_color: color.map(str::to_string),
        });
    }

    /// Remove every line for a product, across all of its sizes and colors.
    ///
    /// Returns the number of lines removed.
    pub fn remove_product(&mut self, product_id: &ProductId) -> usize {
        let before = self.items.len();
        self.items.retain(|i| &i.product.id != product_id);
        before - self.items.len()
    }

    /// Set the quantity of every line for a product.
    ///
    /// A quantity of zero or less removes the product instead.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_product(product_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        for item in self.items.iter_mut().filter(|i| &i.product.id == product_id) {
            item.quantity = quantity;
        }
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of unit price times quantity over all lines.
    pub fn total(&self) -> Money {
        let total: Money = self.items.iter().map(CartItem::line_total).sum();
        // Prices are non-negative; clamp in case a malformed snapshot slipped in
        total.max(Money::zero())
    }

    /// Sum of quantities over all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check whether a product has any line in the cart.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|i| &i.product.id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_cents(cents))
    }

    #[test]
    fn test_same_variant_merges() {
        let mut cart = Cart::new();
        let tee = product("tee", 2000);
        cart.add(&tee, 1, Some("M"), Some("Black"));
        cart.add(&tee, 2, Some("M"), Some("Black"));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_absent_options_merge_with_absent_only() {
        let mut cart = Cart::new();
        let scarf = product("scarf", 900);
        cart.add(&scarf, 1, None, None);
        cart.add(&scarf, 1, None, None);
        cart.add(&scarf, 1, Some("One Size"), None);

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_different_color_is_distinct_line() {
        let mut cart = Cart::new();
        let tee = product("tee", 2000);
        cart.add(&tee, 1, Some("S"), Some("White"));
        cart.add(&tee, 1, Some("S"), Some("Navy"));

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        let mut cart = Cart::new();
        let tee = product("tee", 1000);
        let cap = product("cap", 500);
        cart.add(&tee, 2, None, None);
        cart.add(&cap, 1, None, None);

        cart.update_quantity(&tee.id, 0);
        assert!(!cart.contains(&tee.id));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total().cents(), 500);

        cart.update_quantity(&cap.id, -3);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_update_quantity_sets_every_variant_line() {
        let mut cart = Cart::new();
        let tee = product("tee", 1000);
        cart.add(&tee, 1, Some("S"), None);
        cart.add(&tee, 4, Some("L"), None);

        cart.update_quantity(&tee.id, 2);
        assert!(cart.items().iter().all(|i| i.quantity == 2));
    }

    #[test]
    fn test_remove_product_drops_all_variants() {
        // Removal is keyed by product id alone, so every size/color of the
        // product goes, not just one line.
        let mut cart = Cart::new();
        let tee = product("tee", 1000);
        let cap = product("cap", 500);
        cart.add(&tee, 1, Some("S"), Some("White"));
        cart.add(&tee, 1, Some("M"), Some("Black"));
        cart.add(&cap, 1, None, None);

        assert_eq!(cart.remove_product(&tee.id), 2);
        assert_eq!(cart.line_count(), 1);
        assert!(cart.contains(&cap.id));
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        assert_eq!(cart.total(), Money::zero());
        assert_eq!(cart.item_count(), 0);

        cart.add(&product("a", 1000), 2, None, None);
        cart.add(&product("b", 500), 3, None, None);
        assert_eq!(cart.total(), Money::from_cents(3500));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_variant_label() {
        let mut cart = Cart::new();
        cart.add(&product("a", 1000), 1, Some("M"), Some("Black"));
        cart.add(&product("b", 1000), 1, None, Some("Red"));
        cart.add(&product("c", 1000), 1, None, None);
        let labels: Vec<Option<String>> = cart.items().iter().map(CartItem::variant_label).collect();
        assert_eq!(
            labels,
            vec![Some("M / Black".to_string()), Some("Red".to_string()), None]
        );
    }
}
