//! Authenticated REST client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page talks to the backend through one `ApiClient` provided via
//! Leptos context. The client reads the bearer token from session storage
//! on each request, so login/logout take effect without rebuilding it.
//!
//! ERROR HANDLING
//! ==============
//! A 401 on any call except login means the session is gone: the client
//! clears `auth_token`/`auth_user`, fires the unauthorized hook (the app
//! redirects to `/login`), and returns `ApiError::Unauthorized`. A 401 from
//! login is an ordinary credential failure and is returned as a status error.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use super::types::ApiErrorBody;
use crate::error::ApiError;
use crate::state::auth::{TOKEN_KEY, clear_session};
use crate::util::storage::SessionStore;

pub const LOGIN_PATH: &str = "/api/auth/login";

type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    session: Arc<dyn SessionStore>,
    on_unauthorized: UnauthorizedHook,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            transport,
            session,
            on_unauthorized: Arc::new(|| {}),
        }
    }

    /// Install the callback run after an expired session has been cleared.
    #[must_use]
    pub fn with_unauthorized_handler<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_unauthorized = Arc::new(hook);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request and map non-2xx statuses to errors.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for an expired session, `Status` for any other
    /// non-2xx response, or the transport's own error.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, ApiError> {
        let request = HttpRequest {
            method,
            url: self.url(path),
            path: path.to_owned(),
            bearer: self.session.get(TOKEN_KEY),
            body,
        };
        let resp = self.transport.send(request).await?;
        if resp.is_success() {
            return Ok(resp);
        }
        if resp.status == 401 && !is_login_path(path) {
            self.expire_session();
            return Err(ApiError::Unauthorized);
        }
        log::debug!("{path} failed with status {}", resp.status);
        Err(ApiError::Status { status: resp.status, message: server_message(&resp.body) })
    }

    /// Clear the stored session and notify the app.
    pub fn expire_session(&self) {
        log::warn!("session rejected by server; signing out");
        clear_session(self.session.as_ref());
        (self.on_unauthorized)();
    }

    /// `GET` and decode a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; also fails if the body does not decode.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.send(Method::Get, path, None).await?;
        Ok(serde_json::from_str(&resp.body)?)
    }

    /// `POST` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; also fails if either body cannot be encoded/decoded.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let resp = self.send(Method::Post, path, Some(serde_json::to_value(body)?)).await?;
        Ok(serde_json::from_str(&resp.body)?)
    }

    /// `PATCH` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; also fails if either body cannot be encoded/decoded.
    pub async fn patch_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let resp = self.send(Method::Patch, path, Some(serde_json::to_value(body)?)).await?;
        Ok(serde_json::from_str(&resp.body)?)
    }
}

fn is_login_path(path: &str) -> bool {
    path.starts_with(LOGIN_PATH)
}

fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body).ok().and_then(|b| b.message)
}
