//! Client-side API error type.
//!
//! ERROR HANDLING
//! ==============
//! Every network call returns `Result<_, ApiError>`. Pages never surface the
//! raw error; they call [`ApiError::user_message`] with a page-specific
//! fallback so banners read like product copy rather than transport noise.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::net::graphql::GraphQlError;

pub const FORBIDDEN_ERROR_TYPE: &str = "FORBIDDEN";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network request failed: {0}")]
    Network(String),
    #[error("session expired")]
    Unauthorized,
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("graphql request failed: {}", first_message(.0))]
    GraphQl(Vec<GraphQlError>),
    #[error("response did not include data")]
    MissingData,
    #[error("invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("not available on server")]
    Unavailable,
}

fn first_message(errors: &[GraphQlError]) -> &str {
    errors.first().map_or("unknown error", |e| e.message.as_str())
}

impl ApiError {
    /// HTTP status code for status errors; `401` for expired sessions.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            _ => None,
        }
    }

    /// True when a GraphQL error carries `extensions.errorType == "FORBIDDEN"`.
    pub fn is_forbidden(&self) -> bool {
        match self {
            Self::GraphQl(errors) => errors.iter().any(GraphQlError::is_forbidden),
            _ => false,
        }
    }

    /// Message suitable for a banner: the server's own message when it sent
    /// one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status { message: Some(message), .. } if !message.trim().is_empty() => message.clone(),
            Self::GraphQl(errors) => errors
                .first()
                .map(|e| e.message.clone())
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_owned()),
            _ => fallback.to_owned(),
        }
    }
}
