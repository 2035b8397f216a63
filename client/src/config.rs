//! Build-time client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle has no process environment at runtime, so the API base URL
//! and feature flags are baked in with `option_env!` when the crate is built.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_SWITCH_USER_FLAG: &str = "true";

/// Client configuration shared through Leptos context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, without a trailing slash (e.g. `http://localhost:8080`).
    pub api_base_url: String,
    /// Whether the demo "Switch User" dialog is offered on the home page.
    pub switch_user_enabled: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            switch_user_enabled: parse_flag(Some(DEFAULT_SWITCH_USER_FLAG)),
        }
    }
}

impl ClientConfig {
    /// Build config from variables captured at compile time.
    ///
    /// - `PEOPLEDESK_API_BASE_URL`: default `http://localhost:8080`
    /// - `PEOPLEDESK_ENABLE_SWITCH_USER`: default `true`
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("PEOPLEDESK_API_BASE_URL"),
            option_env!("PEOPLEDESK_ENABLE_SWITCH_USER"),
        )
    }

    pub fn from_values(api_base_url: Option<&str>, switch_user: Option<&str>) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url),
            switch_user_enabled: parse_flag(switch_user.or(Some(DEFAULT_SWITCH_USER_FLAG))),
        }
    }
}

/// Only a case-insensitive `"true"` enables a flag.
pub fn parse_flag(raw: Option<&str>) -> bool {
    raw.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

fn normalize_base_url(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(v) if !v.is_empty() => v.trim_end_matches('/').to_owned(),
        _ => DEFAULT_API_BASE_URL.to_owned(),
    }
}
