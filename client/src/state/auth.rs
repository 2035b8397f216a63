//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Held in an `RwSignal<AuthState>` provided at the app root. Route guards
//! read it, the login page and switch-user dialog replace it, and the HTTP
//! client clears the backing session storage on a 401.
//!
//! DESIGN
//! ======
//! The session survives reloads through `sessionStorage` (`auth_token` plus
//! the JSON `auth_user`). `loading` stays true until the first restore runs
//! so guards do not bounce a signed-in user to `/login` during hydration.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::error::ApiError;
use crate::net::api;
use crate::net::http::ApiClient;
use crate::net::types::{AuthResponse, Role, User};
use crate::util::storage::{SessionStore, load_json, save_json};
use crate::util::validation::is_valid_email;

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "auth_user";

/// Quick-pick accounts offered by the switch-user dialog.
pub const DEMO_USERS: [(&str, &str); 3] = [
    ("Manager", "manager@company.com"),
    ("Employee 1", "emp1@company.com"),
    ("Employee 2", "emp2@company.com"),
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
}

impl AuthState {
    /// Initial state before session storage has been read.
    pub fn pending() -> Self {
        Self { user: None, token: None, loading: true }
    }

    /// Rebuild the session from storage. Both keys must be present and the
    /// user blob must parse; anything else is a signed-out session.
    pub fn restore(store: &dyn SessionStore) -> Self {
        let token = store.get(TOKEN_KEY);
        let user = token.as_ref().and_then(|_| load_json::<User>(store, USER_KEY));
        match (token, user) {
            (Some(token), Some(user)) => {
                log::debug!("restored session for {}", user.email);
                Self { user: Some(user), token: Some(token), loading: false }
            }
            (Some(_), None) => {
                log::warn!("discarding unreadable stored session");
                clear_session(store);
                Self::default()
            }
            _ => Self::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn is_manager(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role == Role::Manager)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.user_id.as_str())
    }
}

pub fn persist_session(store: &dyn SessionStore, token: &str, user: &User) {
    store.set(TOKEN_KEY, token);
    save_json(store, USER_KEY, user);
}

pub fn clear_session(store: &dyn SessionStore) {
    store.remove(TOKEN_KEY);
    store.remove(USER_KEY);
}

fn establish(store: &dyn SessionStore, resp: AuthResponse) -> AuthState {
    let (token, user) = resp.into_session();
    persist_session(store, &token, &user);
    log::debug!("signed in as {} ({})", user.email, user.role.as_str());
    AuthState { user: Some(user), token: Some(token), loading: false }
}

/// Exchange credentials for a session and persist it.
///
/// # Errors
///
/// The API error from the login call; storage is untouched on failure.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<AuthState, ApiError> {
    let resp = api::login(client, email, password).await?;
    Ok(establish(client.session(), resp))
}

/// Replace the current session with another user's (demo accounts).
///
/// # Errors
///
/// The API error from the switch call; the current session is kept on failure.
pub async fn switch_user(client: &ApiClient, email: &str) -> Result<AuthState, ApiError> {
    let resp = api::switch_user(client, email).await?;
    Ok(establish(client.session(), resp))
}

pub fn logout(store: &dyn SessionStore) -> AuthState {
    clear_session(store);
    AuthState::default()
}

/// Trimmed email and raw password, or the message to show.
pub fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Email and password are required.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

pub fn login_error_message(err: &ApiError) -> String {
    if err.status() == Some(401) {
        return "Invalid email or password.".to_owned();
    }
    err.user_message("Login failed. Please try again.")
}

pub fn validate_switch_email(email: &str) -> Result<String, &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required");
    }
    if !is_valid_email(email) {
        return Err("Please enter a valid email address");
    }
    Ok(email.to_owned())
}

pub fn switch_user_error_message(err: &ApiError) -> &'static str {
    if err.status() == Some(404) {
        "User not found with this email"
    } else {
        "An error occurred. Please try again."
    }
}
