//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes apply identical unauthenticated redirect behavior, and
//! the HTTP client needs a hard redirect to `/login` when the server rejects
//! the session mid-request.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

pub const LOGIN_ROUTE: &str = "/login";

pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && !state.is_authenticated()
}

/// Redirect to `/login` whenever auth has loaded and no session is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate(LOGIN_ROUTE, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Full-page navigation to `/login`, used after the server expires the
/// session. Reloading also drops any in-memory state from the old session.
pub fn redirect_to_login() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let on_login = window.location().pathname().is_ok_and(|p| p == LOGIN_ROUTE);
            if !on_login {
                let _ = window.location().set_href(LOGIN_ROUTE);
            }
        }
    }
}

/// Reload the current page (error boundary "Refresh").
pub fn reload_page() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }
}
