use super::*;
use crate::net::types::{Role, User};

fn user() -> User {
    User {
        user_id: "u1".to_owned(),
        email: "emp1@company.com".to_owned(),
        employee_id: "E-1".to_owned(),
        role: Role::Employee,
        manager_id: None,
    }
}

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    let state = AuthState { user: None, token: None, loading: false };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    assert!(!should_redirect_unauth(&AuthState::pending()));
}

#[test]
fn should_not_redirect_when_session_exists() {
    let state = AuthState { user: Some(user()), token: Some("jwt".to_owned()), loading: false };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn user_without_token_is_unauthenticated() {
    let state = AuthState { user: Some(user()), token: None, loading: false };
    assert!(should_redirect_unauth(&state));
}
