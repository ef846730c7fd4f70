//! Product listing query builder.

use crate::money::Money;
use crate::CommerceError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default page size for product listings.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Maximum page size the backend accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Field the backend sorts product listings by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    Price,
    Title,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::Price => "price",
            SortField::Title => "title",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// The sort presets offered in the listing's sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductSort {
    #[default]
    Newest,
    Oldest,
    PriceLow,
    PriceHigh,
    Name,
}

impl ProductSort {
    /// Backend `(sortBy, sortOrder)` for this preset.
    pub fn to_params(&self) -> (SortField, SortOrder) {
        match self {
            ProductSort::Newest => (SortField::CreatedAt, SortOrder::Desc),
            ProductSort::Oldest => (SortField::CreatedAt, SortOrder::Asc),
            ProductSort::PriceLow => (SortField::Price, SortOrder::Asc),
            ProductSort::PriceHigh => (SortField::Price, SortOrder::Desc),
            ProductSort::Name => (SortField::Title, SortOrder::Asc),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductSort::Newest => "newest",
            ProductSort::Oldest => "oldest",
            ProductSort::PriceLow => "price-low",
            ProductSort::PriceHigh => "price-high",
            ProductSort::Name => "name",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProductSort::Newest => "Newest",
            ProductSort::Oldest => "Oldest",
            ProductSort::PriceLow => "Price: Low to High",
            ProductSort::PriceHigh => "Price: High to Low",
            ProductSort::Name => "Name: A-Z",
        }
    }
}

impl FromStr for ProductSort {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" => Ok(ProductSort::Newest),
            "oldest" => Ok(ProductSort::Oldest),
            "price-low" => Ok(ProductSort::PriceLow),
            "price-high" => Ok(ProductSort::PriceHigh),
            "name" => Ok(ProductSort::Name),
            _ => Err(CommerceError::InvalidSort(s.to_string())),
        }
    }
}

/// Query for the product listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub limit: u32,
    /// Free-text search.
    pub search: Option<String>,
    /// Category name.
    pub category: Option<String>,
    pub sort: ProductSort,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductQuery {
    /// Create a first-page query with default sorting.
    pub fn new() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
            category: None,
            sort: ProductSort::default(),
            min_price: None,
            max_price: None,
        }
    }

    /// Set the text query. Blank input clears it.
    pub fn with_search(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        self.search = if q.trim().is_empty() {
            None
        } else {
            Some(q.trim().to_string())
        };
        self
    }

    /// Filter by category. Blank input or "all" clears it.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.is_empty() || category.eq_ignore_ascii_case("all") {
            None
        } else {
            Some(category)
        };
        self
    }

    pub fn with_sort(mut self, sort: ProductSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Set pagination, clamped to what the backend accepts.
    pub fn with_pagination(mut self, page: u32, limit: u32) -> Self {
        self.page = page.max(1);
        self.limit = limit.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Build the query-string pairs, omitting unset filters.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let (sort_by, sort_order) = self.sort.to_params();
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        pairs.push(("sortBy", sort_by.as_str().to_string()));
        pairs.push(("sortOrder", sort_order.as_str().to_string()));
        if let Some(min) = self.min_price {
            pairs.push(("minPrice", min.display_amount()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", max.display_amount()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let query = ProductQuery::new()
            .with_search("  linen ")
            .with_category("Tops")
            .with_sort(ProductSort::PriceLow)
            .with_pagination(2, 500);

        assert_eq!(query.page, 2);
        assert_eq!(query.limit, MAX_PAGE_SIZE);
        assert_eq!(query.search.as_deref(), Some("linen"));
    }

    #[test]
    fn test_query_pairs() {
        let query = ProductQuery::new()
            .with_category("all")
            .with_price_range(Some(Money::from_cents(1000)), None);
        let pairs = query.to_query_pairs();

        assert!(pairs.contains(&("page", "1".to_string())));
        assert!(pairs.contains(&("sortBy", "createdAt".to_string())));
        assert!(pairs.contains(&("sortOrder", "desc".to_string())));
        assert!(pairs.contains(&("minPrice", "10.00".to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "category" || *k == "maxPrice"));
    }

    #[test]
    fn test_sort_preset_parse() {
        assert_eq!("price-high".parse::<ProductSort>().unwrap(), ProductSort::PriceHigh);
        assert!("cheapest".parse::<ProductSort>().is_err());
    }
}
