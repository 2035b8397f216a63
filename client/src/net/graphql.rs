//! GraphQL envelope over the authenticated client.
//!
//! DESIGN
//! ======
//! Queries go out as `POST /graphql` with `{query, variables?, operationName?}`
//! and come back as `{data?, errors?}`. The HTTP status is usually 200 even
//! when the resolver failed, so the error list is the signal.
//!
//! ERROR HANDLING
//! ==============
//! An error message mentioning "unauthorized" or "401" expires the session
//! exactly like an HTTP 401. Any other error list becomes
//! `ApiError::GraphQl`; callers check [`ApiError::is_forbidden`] to turn
//! permission failures into an empty state.

#[cfg(test)]
#[path = "graphql_test.rs"]
mod graphql_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::http::ApiClient;
use super::transport::Method;
use crate::error::{ApiError, FORBIDDEN_ERROR_TYPE};

pub const GRAPHQL_PATH: &str = "/graphql";

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct GraphQlErrorExtensions {
    #[serde(default, rename = "errorType")]
    pub error_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub extensions: Option<GraphQlErrorExtensions>,
}

impl GraphQlError {
    pub fn is_forbidden(&self) -> bool {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.error_type.as_deref())
            .is_some_and(|kind| kind == FORBIDDEN_ERROR_TYPE)
    }

    fn is_unauthorized(&self) -> bool {
        let lower = self.message.to_ascii_lowercase();
        lower.contains("unauthorized") || lower.contains("401")
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    operation_name: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

impl ApiClient {
    /// Run a GraphQL operation and decode `data` into `T`.
    ///
    /// # Errors
    ///
    /// HTTP failures as in [`ApiClient::send`]; `GraphQl` when the response
    /// carries errors; `MissingData` when neither data nor errors arrive.
    pub async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
        operation_name: Option<&str>,
    ) -> Result<T, ApiError> {
        let envelope = GraphQlRequest { query, variables, operation_name };
        let resp = self.send(Method::Post, GRAPHQL_PATH, Some(serde_json::to_value(&envelope)?)).await?;
        let parsed: GraphQlResponse<T> = serde_json::from_str(&resp.body)?;

        if !parsed.errors.is_empty() {
            if parsed.errors.iter().any(GraphQlError::is_unauthorized) {
                self.expire_session();
                return Err(ApiError::Unauthorized);
            }
            if let Some(op) = operation_name {
                log::debug!("{op} returned {} error(s)", parsed.errors.len());
            }
            return Err(ApiError::GraphQl(parsed.errors));
        }
        parsed.data.ok_or(ApiError::MissingData)
    }
}
