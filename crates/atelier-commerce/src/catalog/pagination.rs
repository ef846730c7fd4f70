//! Pagination info returned with product listings.

use serde::{Deserialize, Serialize};

/// Pagination block of a paginated backend response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub limit: u32,
    /// Total number of items.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
}

impl Pagination {
    /// Create pagination info, deriving the page count.
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let limit = limit.max(1);
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(u64::from(limit)) as u32
        };

        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: u32) -> Vec<u32> {
        let max_visible = max_visible.max(1);
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Get start item number (1-indexed), 0 when empty.
    pub fn start_item(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            u64::from(self.page - 1) * u64::from(self.limit) + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> u64 {
        (u64::from(self.page) * u64::from(self.limit)).min(self.total)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, super::DEFAULT_PAGE_SIZE, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_math() {
        let p = Pagination::new(2, 12, 30);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next());
        assert!(p.has_prev());
        assert_eq!(p.start_item(), 13);
        assert_eq!(p.end_item(), 24);
    }

    #[test]
    fn test_empty_listing() {
        let p = Pagination::new(1, 12, 0);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next());
        assert_eq!(p.start_item(), 0);
    }

    #[test]
    fn test_page_numbers_window() {
        let p = Pagination::new(9, 10, 100);
        assert_eq!(p.page_numbers(5), vec![6, 7, 8, 9, 10]);
        let p = Pagination::new(1, 10, 100);
        assert_eq!(p.page_numbers(5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_wire_names() {
        let p: Pagination =
            serde_json::from_str(r#"{"page":1,"limit":12,"total":40,"totalPages":4}"#).unwrap();
        assert_eq!(p.total_pages, 4);
    }
}
