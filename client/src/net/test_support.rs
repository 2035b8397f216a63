//! Recording transport and client builders shared by unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::http::ApiClient;
use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::error::ApiError;
use crate::util::storage::MemorySessionStore;

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, status: u16, body: serde_json::Value) {
        self.responses.lock().unwrap().push_back(HttpResponse { status, body: body.to_string() });
    }

    pub fn push_raw(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(HttpResponse { status, body: body.to_owned() });
    }

    /// Queue a `{"data": ...}` GraphQL success.
    pub fn push_data(&self, data: serde_json::Value) {
        self.push(200, serde_json::json!({ "data": data }));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request was sent")
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ApiError::Network("no queued response".to_owned()))
    }
}

/// Client wired to a mock transport, an in-memory session and a counter of
/// unauthorized-hook invocations.
pub struct TestClient {
    pub client: ApiClient,
    pub transport: Arc<MockTransport>,
    pub session: Arc<MemorySessionStore>,
    pub redirects: Arc<AtomicUsize>,
}

impl TestClient {
    pub fn redirect_count(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

pub fn test_client() -> TestClient {
    let transport = MockTransport::new();
    let session = Arc::new(MemorySessionStore::new());
    let redirects = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&redirects);
    let client = ApiClient::new("http://api.test/", transport.clone(), session.clone())
        .with_unauthorized_handler(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
    TestClient { client, transport, session, redirects }
}
