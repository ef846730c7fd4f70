//! Auth endpoints.

use crate::request::Method;
use crate::{ApiClient, ApiError};
use atelier_auth::{AuthGrant, LoginRequest, RegisterRequest, User};

impl ApiClient {
    /// `POST /auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthGrant, ApiError> {
        self.data(self.request(Method::Post, "/auth/register").json(request)?)
            .await
    }

    /// `POST /auth/login`
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthGrant, ApiError> {
        self.data(self.request(Method::Post, "/auth/login").json(request)?)
            .await
    }

    /// `POST /admin/login`
    pub async fn admin_login(&self, request: &LoginRequest) -> Result<AuthGrant, ApiError> {
        self.data(self.request(Method::Post, "/admin/login").json(request)?)
            .await
    }

    /// `POST /auth/logout`
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.ack(self.request(Method::Post, "/auth/logout"))
            .await
            .map(|_| ())
    }

    /// `GET /auth/me`
    pub async fn me(&self) -> Result<User, ApiError> {
        self.data(self.request(Method::Get, "/auth/me")).await
    }
}
