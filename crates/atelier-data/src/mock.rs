//! In-memory transport for tests.
//!
//! Responses are queued per `(method, path)` and handed out in order.
//! Every request is recorded. A queued response can be gated so the
//! request stays in flight until the test releases it.

use crate::request::{Method, Request};
use crate::response::Response;
use crate::transport::Transport;
use crate::ApiError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Notify;

struct Queued {
    method: Method,
    path: String,
    response: Response,
    gate: Option<Arc<Notify>>,
}

#[derive(Default)]
struct MockState {
    queue: Vec<Queued>,
    requests: Vec<Request>,
}

/// A scripted [`Transport`]. Clones share the same script.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON response for the next `method path` request.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.enqueue(method, path, Response::json_body(status, &body), None);
    }

    /// Like [`MockTransport::respond`], but the response is held back
    /// until the returned gate is notified.
    pub fn respond_gated(
        &self,
        method: Method,
        path: &str,
        status: u16,
        body: serde_json::Value,
    ) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.enqueue(
            method,
            path,
            Response::json_body(status, &body),
            Some(Arc::clone(&gate)),
        );
        gate
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<Request> {
        self.lock().requests.last().cloned()
    }

    /// Number of queued responses not yet consumed.
    pub fn pending(&self) -> usize {
        self.lock().queue.len()
    }

    fn enqueue(&self, method: Method, path: &str, response: Response, gate: Option<Arc<Notify>>) {
        self.lock().queue.push(Queued {
            method,
            path: path.to_string(),
            response,
            gate,
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, ApiError> {
        let next = {
            let mut state = self.lock();
            state.requests.push(request.clone());
            let position = state
                .queue
                .iter()
                .position(|q| q.method == request.method && q.path == request.path);
            position.map(|i| state.queue.remove(i))
        };

        let Some(queued) = next else {
            return Err(ApiError::Network(format!(
                "no response scripted for {} {}",
                request.method.as_str(),
                request.path
            )));
        };
        if let Some(gate) = queued.gate {
            gate.notified().await;
        }
        Ok(queued.response)
    }
}
