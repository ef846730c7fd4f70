//! Transports: how a [`Request`] becomes a [`Response`].

use crate::request::{Body, Method, Request};
use crate::response::Response;
use crate::ApiError;
use async_trait::async_trait;
use atelier_commerce::forms::FormPart;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends requests to the backend.
///
/// Implementations only move bytes. Status handling, auth and envelope
/// decoding live in [`crate::ApiClient`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, ApiError>;
}

/// Transport over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `base_url` (e.g., `http://localhost:5000/api`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn multipart(parts: Vec<FormPart>) -> Result<reqwest::multipart::Form, ApiError> {
        let mut form = reqwest::multipart::Form::new();
        for part in parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File { name, path } => {
                    let bytes = tokio::fs::read(&path).await.map_err(|e| {
                        ApiError::Request(format!("cannot read {}: {}", path.display(), e))
                    })?;
                    let file_name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "upload".to_string());
                    let file = reqwest::multipart::Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(image_mime(&path))
                        .map_err(|e| ApiError::Request(e.to_string()))?;
                    form.part(name, file)
                }
            };
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(bytes) => builder.body(bytes),
            Body::Multipart(parts) => builder.multipart(Self::multipart(parts).await?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?
            .to_vec();

        Ok(Response::new(status, headers, body))
    }
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let transport = HttpTransport::new("http://localhost:5000/api/").unwrap();
        assert_eq!(transport.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime(Path::new("a/front.JPG")), "image/jpeg");
        assert_eq!(image_mime(Path::new("b.webp")), "image/webp");
        assert_eq!(image_mime(Path::new("notes")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_missing_upload_is_request_error() {
        let parts = vec![FormPart::File {
            name: "images",
            path: "/definitely/not/here.jpg".into(),
        }];
        let result = HttpTransport::multipart(parts).await;
        assert!(matches!(result, Err(ApiError::Request(_))));
    }
}
