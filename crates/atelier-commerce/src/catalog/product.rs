//! Product types.

use crate::ids::ProductId;
use crate::money::Money;
use crate::CommerceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Read-only from the storefront's point of view; the admin flow changes
/// products through the backend and re-fetches them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    #[serde(alias = "_id")]
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Units in stock.
    #[serde(default)]
    pub stock: u32,
    /// Category name.
    #[serde(default)]
    pub category: String,
    /// Offered sizes, in display order.
    #[serde(default)]
    pub size_options: Vec<String>,
    /// Offered colors, in display order.
    #[serde(default)]
    pub color_options: Vec<String>,
    /// Image URLs, first is the primary image.
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a product with no options, stock or images.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Money) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            price,
            stock: 0,
            category: String::new(),
            size_options: Vec::new(),
            color_options: Vec::new(),
            images: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.size_options = sizes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.color_options = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Check if at least one unit is available.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// The image shown in listings and cart lines.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Check a size/color selection against the offered options.
    ///
    /// A product that offers sizes (or colors) requires one to be chosen;
    /// a product without options accepts no selection for that option.
    pub fn validate_selection(
        &self,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Result<(), CommerceError> {
        check_option("size", &self.size_options, size)?;
        check_option("color", &self.color_options, color)?;
        if !self.is_in_stock() {
            return Err(CommerceError::OutOfStock(self.title.clone()));
        }
        Ok(())
    }
}

fn check_option(
    option: &'static str,
    offered: &[String],
    chosen: Option<&str>,
) -> Result<(), CommerceError> {
    match chosen {
        None if offered.is_empty() => Ok(()),
        None => Err(CommerceError::OptionRequired(option)),
        Some(value) if offered.iter().any(|o| o == value) => Ok(()),
        Some(value) => Err(CommerceError::InvalidOption {
            option,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tee() -> Product {
        Product::new("p1", "Linen Tee", Money::from_cents(2500))
            .with_stock(3)
            .with_sizes(["S", "M", "L"])
            .with_colors(["White"])
    }

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{
            "_id": "66a1",
            "title": "Wool Coat",
            "description": "Warm",
            "price": "189.00",
            "stock": 4,
            "category": "Outerwear",
            "sizeOptions": ["M", "L"],
            "colorOptions": [],
            "images": ["/uploads/coat.jpg"],
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-02T10:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "66a1");
        assert_eq!(product.price.cents(), 18900);
        assert_eq!(product.size_options, vec!["M", "L"]);
        assert_eq!(product.primary_image(), Some("/uploads/coat.jpg"));
    }

    #[test]
    fn test_selection_requires_offered_options() {
        let product = tee();
        assert!(product.validate_selection(Some("M"), Some("White")).is_ok());
        assert_eq!(
            product.validate_selection(None, Some("White")),
            Err(CommerceError::OptionRequired("size"))
        );
        assert!(matches!(
            product.validate_selection(Some("XXL"), Some("White")),
            Err(CommerceError::InvalidOption { option: "size", .. })
        ));
    }

    #[test]
    fn test_selection_without_options() {
        let product = Product::new("p2", "Scarf", Money::from_cents(900)).with_stock(1);
        assert!(product.validate_selection(None, None).is_ok());
        assert!(product.validate_selection(Some("M"), None).is_err());
    }

    #[test]
    fn test_out_of_stock() {
        let product = tee().with_stock(0);
        assert!(!product.is_in_stock());
        assert!(matches!(
            product.validate_selection(Some("S"), Some("White")),
            Err(CommerceError::OutOfStock(_))
        ));
    }
}
