//! Product endpoints.

use crate::request::Method;
use crate::{ApiClient, ApiError, Paginated};
use atelier_commerce::catalog::{Product, ProductQuery};
use atelier_commerce::forms::ProductForm;
use atelier_commerce::ids::ProductId;

impl ApiClient {
    /// `GET /products`
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Paginated<Product>, ApiError> {
        self.page(self.request(Method::Get, "/products").query(query.to_query_pairs()))
            .await
    }

    /// `GET /products/{id}`
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.data(self.request(Method::Get, format!("/products/{}", id)))
            .await
    }

    /// `GET /products/categories`
    pub async fn categories(&self) -> Result<Vec<String>, ApiError> {
        self.data(self.request(Method::Get, "/products/categories"))
            .await
    }

    /// `POST /products` (multipart, admin only)
    pub async fn create_product(&self, form: &ProductForm) -> Result<Product, ApiError> {
        let parts = form.to_parts().map_err(invalid_form)?;
        self.data(self.request(Method::Post, "/products").multipart(parts))
            .await
    }

    /// `PUT /products/{id}` (multipart, admin only)
    pub async fn update_product(
        &self,
        id: &ProductId,
        form: &ProductForm,
    ) -> Result<Product, ApiError> {
        let parts = form.to_parts().map_err(invalid_form)?;
        self.data(
            self.request(Method::Put, format!("/products/{}", id))
                .multipart(parts),
        )
        .await
    }

    /// `DELETE /products/{id}` (admin only)
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        self.ack(self.request(Method::Delete, format!("/products/{}", id)))
            .await
            .map(|_| ())
    }
}

fn invalid_form(e: atelier_commerce::CommerceError) -> ApiError {
    match e {
        atelier_commerce::CommerceError::Validation(errors) => ApiError::Validation {
            message: "Please fix the highlighted fields".to_string(),
            errors,
        },
        other => ApiError::Request(other.to_string()),
    }
}
