//! Order endpoints.

use crate::request::Method;
use crate::{ApiClient, ApiError};
use atelier_commerce::forms::CreateOrderRequest;
use atelier_commerce::ids::OrderId;
use atelier_commerce::order::Order;

impl ApiClient {
    /// `GET /orders/my-orders`
    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.data(self.request(Method::Get, "/orders/my-orders"))
            .await
    }

    /// `GET /orders/{id}`
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.data(self.request(Method::Get, format!("/orders/{}", id)))
            .await
    }

    /// `PUT /orders/{id}/cancel`, returning the order as the backend now
    /// has it.
    pub async fn cancel_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.data(self.request(Method::Put, format!("/orders/{}/cancel", id)))
            .await
    }

    /// `POST /orders`
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ApiError> {
        self.data(self.request(Method::Post, "/orders").json(request)?)
            .await
    }
}
