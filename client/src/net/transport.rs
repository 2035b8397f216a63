//! Raw HTTP transport behind an async trait.
//!
//! DESIGN
//! ======
//! `ApiClient` builds fully-resolved requests and hands them to a
//! `Transport`. In the browser build that is `gloo-net`; during SSR every
//! call fails with `ApiError::Unavailable`; tests substitute a recording
//! mock. Futures are `?Send` because browser fetch futures are not `Send`.

use async_trait::async_trait;

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

/// A fully-resolved outgoing request.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL (`{base}{path}`).
    pub url: String,
    /// Path relative to the API base, kept for 401 routing decisions.
    pub path: String,
    /// Bearer token attached as `Authorization: Bearer ...`.
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// Status and raw body of a completed exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    /// Perform one HTTP exchange. Non-2xx statuses are returned as `Ok`;
    /// only transport-level failures are errors.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Browser `fetch` transport via `gloo-net`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;

            let mut builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Patch => Request::patch(&request.url),
            }
            .header("Content-Type", "application/json");
            if let Some(token) = request.bearer.as_deref() {
                builder = builder.header("Authorization", &format!("Bearer {token}"));
            }
            let outgoing = match request.body.as_ref() {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Network(e.to_string()))?;

            let resp = outgoing.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
            Ok(HttpResponse { status, body })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::Unavailable)
        }
    }
}
