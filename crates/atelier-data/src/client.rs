//! The API client: auth header, status handling and envelope decoding.

use crate::envelope::{ApiResponse, ErrorBody, Paginated};
use crate::request::{Method, RequestBuilder};
use crate::response::Response;
use crate::transport::{HttpTransport, Transport};
use crate::ApiError;
use atelier_auth::{AuthStore, AuthToken};
use atelier_cache::KvStore;
use atelier_commerce::forms::FieldError;
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Login route for the storefront.
pub const CUSTOMER_LOGIN_PATH: &str = "/login";

/// Login route for the admin console.
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";

/// Where the client reads its bearer token from.
pub trait Credentials: Send + Sync {
    /// Current token, if any.
    fn token(&self) -> Option<AuthToken>;

    /// Drop the stored token after the backend rejected it.
    fn clear_token(&self);
}

/// No credentials: requests go out without `Authorization`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl Credentials for Anonymous {
    fn token(&self) -> Option<AuthToken> {
        None
    }

    fn clear_token(&self) {}
}

impl<S: KvStore> Credentials for Mutex<AuthStore<S>> {
    fn token(&self) -> Option<AuthToken> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .token()
            .cloned()
    }

    fn clear_token(&self) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_token(None);
    }
}

/// Login route to send the user to after a 401 at `location`.
pub fn login_path_for(location: &str) -> &'static str {
    if location.starts_with("/admin") {
        ADMIN_LOGIN_PATH
    } else {
        CUSTOMER_LOGIN_PATH
    }
}

/// Client for the storefront REST API.
///
/// Cheap to clone; clones share the transport, credentials and location.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Box<dyn Transport>,
    credentials: Arc<dyn Credentials>,
    location: RwLock<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("location", &self.location())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(transport: impl Transport + 'static, credentials: Arc<dyn Credentials>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport: Box::new(transport),
                credentials,
                location: RwLock::new("/".to_string()),
            }),
        }
    }

    /// Client over HTTP for `base_url`.
    pub fn http(base_url: &str, credentials: Arc<dyn Credentials>) -> Result<Self, ApiError> {
        Ok(Self::new(HttpTransport::new(base_url)?, credentials))
    }

    /// Record the current route; it decides which login route a 401
    /// sends the user to.
    pub fn set_location(&self, path: impl Into<String>) {
        *self
            .inner
            .location
            .write()
            .unwrap_or_else(PoisonError::into_inner) = path.into();
    }

    pub fn location(&self) -> String {
        self.inner
            .location
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn request(&self, method: Method, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, path)
    }

    /// Send a request, attaching the bearer token when there is one.
    ///
    /// Non-2xx responses become errors. A 401 also clears the stored token.
    pub async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let builder = match self.inner.credentials.token() {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        };
        let request = builder.build();
        let (method, path) = (request.method, request.path.clone());
        tracing::debug!(method = method.as_str(), path = %path, "api request");

        let response = self.inner.transport.send(request).await.map_err(|e| {
            tracing::warn!(method = method.as_str(), path = %path, error = %e, "api request failed");
            e
        })?;

        if response.is_success() {
            return Ok(response);
        }
        Err(self.classify(&response))
    }

    /// Send and unwrap `data` from the standard envelope.
    pub async fn data<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let envelope: ApiResponse<T> = self.execute(builder).await?.json()?;
        if !envelope.success {
            return Err(rejected(envelope.message, envelope.errors));
        }
        envelope
            .data
            .ok_or_else(|| ApiError::Decode("response has no data".to_string()))
    }

    /// Send and decode a paginated envelope.
    pub async fn page<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Paginated<T>, ApiError> {
        let page: Paginated<T> = self.execute(builder).await?.json()?;
        if !page.success {
            return Err(rejected(page.message, Vec::new()));
        }
        Ok(page)
    }

    /// Send and only check the envelope's `success` flag.
    pub async fn ack(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let response = self.execute(builder).await?;
        if response.body.is_empty() {
            return Ok(String::new());
        }
        let envelope: ApiResponse<serde_json::Value> = response.json()?;
        if !envelope.success {
            return Err(rejected(envelope.message, envelope.errors));
        }
        Ok(envelope.message)
    }

    fn classify(&self, response: &Response) -> ApiError {
        let body: ErrorBody = response.json().unwrap_or_default();
        let message = if body.message.is_empty() {
            default_message(response.status).to_string()
        } else {
            body.message.clone()
        };

        match response.status {
            401 => {
                self.inner.credentials.clear_token();
                let login_path = login_path_for(&self.location()).to_string();
                tracing::warn!(login_path = %login_path, "session rejected, token cleared");
                ApiError::Unauthorized {
                    login_path,
                    message: body.message,
                }
            }
            404 => ApiError::NotFound(message),
            400 | 422 => ApiError::Validation {
                message,
                errors: body.errors,
            },
            status => {
                if status >= 500 {
                    tracing::error!(status, message = %message, "server error");
                }
                ApiError::Server { status, message }
            }
        }
    }
}

/// A 2xx response whose envelope says `success: false`.
fn rejected(message: String, errors: Vec<FieldError>) -> ApiError {
    ApiError::Validation {
        message: if message.is_empty() {
            "Request failed".to_string()
        } else {
            message
        },
        errors,
    }
}

fn default_message(status: u16) -> &'static str {
    match status {
        400 | 422 => "Invalid request",
        403 => "You do not have permission to do that",
        404 => "Resource not found",
        409 => "Conflict",
        500..=599 => "Server error, please try again later",
        _ => "Request failed",
    }
}
