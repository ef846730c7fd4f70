//! HTTP request builder.

use crate::ApiError;
use atelier_commerce::forms::FormPart;
use serde::Serialize;
use std::collections::HashMap;

/// HTTP methods the backend uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Body {
    #[default]
    Empty,
    /// Serialized JSON.
    Json(Vec<u8>),
    /// Multipart form; file parts are read by the transport.
    Multipart(Vec<FormPart>),
}

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// Path under the base URL, starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HashMap<String, String>,
    pub body: Body,
}

impl Request {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Query value by name.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A builder for constructing requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            request: Request {
                method,
                path: path.into(),
                query: Vec::new(),
                headers: HashMap::new(),
                body: Body::Empty,
            },
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.insert(key.into(), value.into());
        self
    }

    /// Append query parameters.
    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.request
            .query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, ApiError> {
        let json = serde_json::to_vec(value).map_err(|e| ApiError::Request(e.to_string()))?;
        self.request
            .headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.request.body = Body::Json(json);
        Ok(self)
    }

    /// Set the request body as a multipart form.
    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.request.body = Body::Multipart(parts);
        self
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    pub fn build(self) -> Request {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let request = RequestBuilder::new(Method::Get, "/products")
            .query([("page", "2"), ("limit", "12")])
            .bearer_auth("tok")
            .build();
        assert_eq!(request.query_param("page"), Some("2"));
        assert_eq!(request.header("authorization"), Some("Bearer tok"));
        assert_eq!(request.body, Body::Empty);
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let request = RequestBuilder::new(Method::Post, "/auth/login")
            .json(&serde_json::json!({"email": "a@b.co"}))
            .unwrap()
            .build();
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.body, Body::Json(br#"{"email":"a@b.co"}"#.to_vec()));
    }
}
