//! Response envelopes.
//!
//! Every endpoint wraps its payload as
//! `{ success, message, data?, errors? }`; list endpoints put a
//! `pagination` object next to `data`.

use atelier_commerce::catalog::Pagination;
use atelier_commerce::forms::FieldError;
use serde::{Deserialize, Serialize};

/// The standard envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

/// A page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Error envelope fields, read from any failed response.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_field_errors() {
        let json = r#"{
            "success": false,
            "message": "Validation failed",
            "errors": [{"field": "email", "message": "Email is taken"}]
        }"#;
        let envelope: ApiResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors, vec![FieldError::new("email", "Email is taken")]);
    }

    #[test]
    fn test_paginated() {
        let json = r#"{
            "success": true,
            "message": "ok",
            "data": ["Tops", "Dresses"],
            "pagination": {"page": 1, "limit": 12, "total": 2, "totalPages": 1}
        }"#;
        let page: Paginated<String> = serde_json::from_str(json).unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.pagination.total_pages, 1);
        assert!(!page.pagination.has_next());
    }
}
