use super::*;
use crate::net::test_support::test_client;
use crate::util::storage::MemorySessionStore;

fn sample_user() -> User {
    User {
        user_id: "u-1".to_owned(),
        email: "manager@company.com".to_owned(),
        employee_id: "E-001".to_owned(),
        role: Role::Manager,
        manager_id: None,
    }
}

fn auth_body(email: &str, role: &str) -> serde_json::Value {
    serde_json::json!({
        "token": "jwt-new", "userId": "u-9", "email": email,
        "employeeId": "E-009", "role": role, "managerId": "u-1"
    })
}

// =============================================================
// Restore
// =============================================================

#[test]
fn pending_state_is_loading() {
    let state = AuthState::pending();
    assert!(state.loading);
    assert!(!state.is_authenticated());
}

#[test]
fn restore_requires_token_and_user() {
    let store = MemorySessionStore::new();
    assert_eq!(AuthState::restore(&store), AuthState::default());

    store.set(TOKEN_KEY, "jwt");
    persist_session(&store, "jwt", &sample_user());
    let state = AuthState::restore(&store);
    assert!(state.is_authenticated());
    assert!(state.is_manager());
    assert!(!state.loading);
    assert_eq!(state.user_id(), Some("u-1"));
}

#[test]
fn restore_with_user_but_no_token_is_signed_out() {
    let store = MemorySessionStore::new();
    save_json(&store, USER_KEY, &sample_user());
    assert!(!AuthState::restore(&store).is_authenticated());
}

#[test]
fn restore_discards_corrupt_user_blob() {
    let store = MemorySessionStore::new();
    store.set(TOKEN_KEY, "jwt");
    store.set(USER_KEY, "{broken");
    let state = AuthState::restore(&store);
    assert!(!state.is_authenticated());
    assert!(store.is_empty());
}

#[test]
fn logout_clears_both_keys() {
    let store = MemorySessionStore::new();
    persist_session(&store, "jwt", &sample_user());
    assert_eq!(store.len(), 2);
    let state = logout(&store);
    assert!(store.is_empty());
    assert!(!state.is_authenticated());
}

// =============================================================
// Login / switch
// =============================================================

#[tokio::test]
async fn login_persists_session() {
    let t = test_client();
    t.transport.push(200, auth_body("emp1@company.com", "EMPLOYEE"));

    let state = login(&t.client, "emp1@company.com", "pw").await.unwrap();

    assert!(state.is_authenticated());
    assert!(!state.is_manager());
    assert_eq!(t.session.get(TOKEN_KEY).as_deref(), Some("jwt-new"));
    let stored: User = load_json(t.session.as_ref(), USER_KEY).unwrap();
    assert_eq!(stored.email, "emp1@company.com");
    assert_eq!(stored.manager_id.as_deref(), Some("u-1"));
}

#[tokio::test]
async fn failed_login_leaves_storage_alone() {
    let t = test_client();
    t.transport.push(401, serde_json::json!({ "message": "Bad credentials" }));
    let err = login(&t.client, "emp1@company.com", "nope").await.unwrap_err();
    assert_eq!(login_error_message(&err), "Invalid email or password.");
    assert!(t.session.is_empty());
    assert_eq!(t.redirect_count(), 0);
}

#[tokio::test]
async fn switch_user_replaces_session() {
    let t = test_client();
    persist_session(t.session.as_ref(), "jwt-old", &sample_user());
    t.transport.push(200, auth_body("emp2@company.com", "EMPLOYEE"));

    let state = switch_user(&t.client, "emp2@company.com").await.unwrap();

    assert_eq!(state.user.unwrap().email, "emp2@company.com");
    assert_eq!(t.session.get(TOKEN_KEY).as_deref(), Some("jwt-new"));
    assert_eq!(t.transport.last_request().bearer.as_deref(), Some("jwt-old"));
}

#[tokio::test]
async fn switch_user_not_found_message() {
    let t = test_client();
    t.transport.push(404, serde_json::json!({ "message": "missing" }));
    let err = switch_user(&t.client, "ghost@company.com").await.unwrap_err();
    assert_eq!(switch_user_error_message(&err), "User not found with this email");
    let other = ApiError::Network("down".to_owned());
    assert_eq!(switch_user_error_message(&other), "An error occurred. Please try again.");
}

// =============================================================
// Input checks
// =============================================================

#[test]
fn login_input_requires_both_fields() {
    assert_eq!(
        validate_login_input(" a@b.co ", "pw"),
        Ok(("a@b.co".to_owned(), "pw".to_owned()))
    );
    assert_eq!(validate_login_input("", "pw"), Err("Email and password are required."));
    assert_eq!(validate_login_input("a@b.co", ""), Err("Email and password are required."));
}

#[test]
fn login_error_prefers_server_message_for_other_statuses() {
    let err = ApiError::Status { status: 423, message: Some("Account locked".to_owned()) };
    assert_eq!(login_error_message(&err), "Account locked");
    assert_eq!(login_error_message(&ApiError::Network("x".to_owned())), "Login failed. Please try again.");
}

#[test]
fn switch_email_is_required_and_well_formed() {
    assert_eq!(validate_switch_email(""), Err("Email is required"));
    assert_eq!(validate_switch_email("nope"), Err("Please enter a valid email address"));
    assert_eq!(validate_switch_email(" emp1@company.com "), Ok("emp1@company.com".to_owned()));
}

#[test]
fn demo_users_cover_each_role() {
    let emails: Vec<_> = DEMO_USERS.iter().map(|(_, e)| *e).collect();
    assert_eq!(emails, ["manager@company.com", "emp1@company.com", "emp2@company.com"]);
}
