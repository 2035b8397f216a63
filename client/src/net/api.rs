//! One async function per backend endpoint.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages and state workflows call these instead of touching URLs or GraphQL
//! documents directly. REST covers auth, profile reads/writes, feedback
//! writes and absence writes; GraphQL covers the list views.
//!
//! ERROR HANDLING
//! ==============
//! Everything returns `Result<_, ApiError>`; the page decides which fallback
//! copy to show via [`ApiError::user_message`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Deserialize;

use super::http::{ApiClient, LOGIN_PATH};
use super::queries;
use super::types::{
    AbsenceRequest, AuthResponse, Coworker, CreateAbsenceRequest, CreateFeedbackRequest, CreatedFeedback,
    DirectoryFilters, FeedbackListItem, FeedbackParticipant, LoginRequest, PolishFeedbackRequest,
    PolishFeedbackResponse, ProfileDto, ProfileUpdate, SwitchUserRequest, UpdateAbsenceStatus,
};
use crate::error::ApiError;

pub const SWITCH_USER_PATH: &str = "/api/auth/switch-user";
pub const FEEDBACK_PATH: &str = "/api/feedback";
pub const POLISH_PATH: &str = "/api/feedback/polish";
pub const ABSENCE_PATH: &str = "/api/absence";

fn profile_endpoint(user_id: &str) -> String {
    format!("/api/profiles/{user_id}")
}

fn absence_endpoint(id: &str) -> String {
    format!("{ABSENCE_PATH}/{id}")
}

/// Variables for `GetCoworkerDirectory`: only non-empty trimmed values, and
/// no variables object at all when nothing is set.
fn directory_variables(filters: &DirectoryFilters) -> Option<serde_json::Value> {
    let mut vars = serde_json::Map::new();
    if let Some(search) = filters.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        vars.insert("search".to_owned(), search.into());
    }
    if let Some(dept) = filters.department.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        vars.insert("department".to_owned(), dept.into());
    }
    if filters.direct_reports_only {
        vars.insert("directReportsOnly".to_owned(), true.into());
    }
    (!vars.is_empty()).then_some(serde_json::Value::Object(vars))
}

// =============================================================================
// AUTH
// =============================================================================

/// `POST /api/auth/login`.
///
/// # Errors
///
/// `Status { status: 401, .. }` for bad credentials; transport errors otherwise.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
    client.post_json(LOGIN_PATH, &LoginRequest { email, password }).await
}

/// `POST /api/auth/switch-user`.
///
/// # Errors
///
/// `Status { status: 404, .. }` when no user has that email.
pub async fn switch_user(client: &ApiClient, email: &str) -> Result<AuthResponse, ApiError> {
    client.post_json(SWITCH_USER_PATH, &SwitchUserRequest { email }).await
}

// =============================================================================
// PROFILE
// =============================================================================

/// `GET /api/profiles/{userId}`, filtered server-side for the viewer.
///
/// # Errors
///
/// `Status` 403/404 when the profile is hidden or missing.
pub async fn fetch_profile(client: &ApiClient, user_id: &str) -> Result<ProfileDto, ApiError> {
    client.get_json(&profile_endpoint(user_id)).await
}

#[derive(Deserialize)]
struct ProfileData {
    profile: Option<ProfileDto>,
}

/// `GetProfile` over GraphQL.
///
/// # Errors
///
/// `GraphQl` errors from the resolver; `MissingData` when the profile is null.
pub async fn query_profile(client: &ApiClient, user_id: &str) -> Result<ProfileDto, ApiError> {
    let vars = serde_json::json!({ "userId": user_id });
    let data: ProfileData = client.graphql(queries::GET_PROFILE, Some(vars), Some("GetProfile")).await?;
    data.profile.ok_or(ApiError::MissingData)
}

/// `PATCH /api/profiles/{userId}` with only the edited keys.
///
/// # Errors
///
/// `Status` with the server's validation message on rejection.
pub async fn update_profile(client: &ApiClient, user_id: &str, updates: &ProfileUpdate) -> Result<ProfileDto, ApiError> {
    client.patch_json(&profile_endpoint(user_id), updates).await
}

// =============================================================================
// FEEDBACK
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GqlProfileNames {
    #[serde(default)]
    preferred_name: Option<String>,
    #[serde(default)]
    legal_first_name: Option<String>,
    #[serde(default)]
    legal_last_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GqlFeedbackUser {
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    employee_id: Option<String>,
    #[serde(default)]
    profile: Option<GqlProfileNames>,
}

impl GqlFeedbackUser {
    fn into_participant(self) -> FeedbackParticipant {
        let names = self.profile.unwrap_or_default();
        let preferred = names.preferred_name.filter(|n| !n.trim().is_empty()).or_else(|| {
            let joined = [names.legal_first_name.as_deref(), names.legal_last_name.as_deref()]
                .into_iter()
                .flatten()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            let joined = joined.trim();
            (!joined.is_empty()).then(|| joined.to_owned())
        });
        FeedbackParticipant {
            id: self.id,
            email: self.email,
            employee_id: self.employee_id,
            preferred_name: preferred,
            legal_first_name: names.legal_first_name,
            legal_last_name: names.legal_last_name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GqlFeedbackNode {
    id: String,
    text: String,
    #[serde(default)]
    ai_polished: bool,
    created_at: String,
    #[serde(default)]
    author: Option<GqlFeedbackUser>,
    #[serde(default)]
    recipient: Option<GqlFeedbackUser>,
}

impl GqlFeedbackNode {
    fn into_list_item(self) -> FeedbackListItem {
        FeedbackListItem {
            id: self.id,
            text: self.text,
            ai_polished: self.ai_polished,
            created_at: self.created_at,
            author: self.author.map(GqlFeedbackUser::into_participant).unwrap_or_default(),
            recipient: self.recipient.map(GqlFeedbackUser::into_participant).unwrap_or_default(),
        }
    }
}

fn map_feedback(nodes: Vec<GqlFeedbackNode>) -> Vec<FeedbackListItem> {
    nodes.into_iter().map(GqlFeedbackNode::into_list_item).collect()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackForUserData {
    feedback_for_user: Vec<GqlFeedbackNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthoredFeedbackData {
    my_authored_feedback: Vec<GqlFeedbackNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceivedFeedbackData {
    my_received_feedback: Vec<GqlFeedbackNode>,
}

/// `GetFeedbackForUser`.
///
/// # Errors
///
/// A forbidden `GraphQl` error when the viewer may not read this feedback.
pub async fn feedback_for_user(client: &ApiClient, user_id: &str) -> Result<Vec<FeedbackListItem>, ApiError> {
    let vars = serde_json::json!({ "userId": user_id });
    let data: FeedbackForUserData =
        client.graphql(queries::GET_FEEDBACK_FOR_USER, Some(vars), Some("GetFeedbackForUser")).await?;
    Ok(map_feedback(data.feedback_for_user))
}

/// `GetMyAuthoredFeedback`.
///
/// # Errors
///
/// GraphQL or transport failures.
pub async fn my_authored_feedback(client: &ApiClient) -> Result<Vec<FeedbackListItem>, ApiError> {
    let data: AuthoredFeedbackData =
        client.graphql(queries::GET_MY_AUTHORED_FEEDBACK, None, Some("GetMyAuthoredFeedback")).await?;
    Ok(map_feedback(data.my_authored_feedback))
}

/// `GetMyReceivedFeedback`.
///
/// # Errors
///
/// GraphQL or transport failures.
pub async fn my_received_feedback(client: &ApiClient) -> Result<Vec<FeedbackListItem>, ApiError> {
    let data: ReceivedFeedbackData =
        client.graphql(queries::GET_MY_RECEIVED_FEEDBACK, None, Some("GetMyReceivedFeedback")).await?;
    Ok(map_feedback(data.my_received_feedback))
}

/// `POST /api/feedback`, mapped to a list item for optimistic display.
///
/// # Errors
///
/// `Status` with the server's message when the feedback is rejected.
pub async fn create_feedback(client: &ApiClient, body: &CreateFeedbackRequest) -> Result<FeedbackListItem, ApiError> {
    let created: CreatedFeedback = client.post_json(FEEDBACK_PATH, body).await?;
    Ok(created.into_list_item())
}

/// `POST /api/feedback/polish`.
///
/// # Errors
///
/// `Status` when the polishing service is unavailable.
pub async fn polish_feedback(client: &ApiClient, text: &str) -> Result<PolishFeedbackResponse, ApiError> {
    client.post_json(POLISH_PATH, &PolishFeedbackRequest { text }).await
}

// =============================================================================
// ABSENCE
// =============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyAbsenceData {
    my_absence_requests: Vec<AbsenceRequest>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PendingAbsenceData {
    pending_absence_requests: Vec<AbsenceRequest>,
}

/// `GetMyAbsenceRequests`.
///
/// # Errors
///
/// GraphQL or transport failures.
pub async fn my_absence_requests(client: &ApiClient) -> Result<Vec<AbsenceRequest>, ApiError> {
    let data: MyAbsenceData =
        client.graphql(&queries::my_absence_requests(), None, Some("GetMyAbsenceRequests")).await?;
    Ok(data.my_absence_requests)
}

/// `GetPendingAbsenceRequests` (manager's team queue).
///
/// # Errors
///
/// GraphQL or transport failures.
pub async fn pending_absence_requests(client: &ApiClient) -> Result<Vec<AbsenceRequest>, ApiError> {
    let data: PendingAbsenceData =
        client.graphql(&queries::pending_absence_requests(), None, Some("GetPendingAbsenceRequests")).await?;
    Ok(data.pending_absence_requests)
}

/// `POST /api/absence`.
///
/// # Errors
///
/// `Status` with the server's validation message on rejection.
pub async fn submit_absence_request(
    client: &ApiClient,
    body: &CreateAbsenceRequest,
) -> Result<AbsenceRequest, ApiError> {
    client.post_json(ABSENCE_PATH, body).await
}

/// `PATCH /api/absence/{id}`.
///
/// # Errors
///
/// `Status` when the request is no longer pending or not the caller's to decide.
pub async fn update_absence_status(
    client: &ApiClient,
    id: &str,
    body: &UpdateAbsenceStatus,
) -> Result<AbsenceRequest, ApiError> {
    client.patch_json(&absence_endpoint(id), body).await
}

// =============================================================================
// DIRECTORY
// =============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DirectoryData {
    coworker_directory: Vec<Coworker>,
}

/// `GetCoworkerDirectory`.
///
/// # Errors
///
/// GraphQL or transport failures.
pub async fn coworker_directory(client: &ApiClient, filters: &DirectoryFilters) -> Result<Vec<Coworker>, ApiError> {
    let data: DirectoryData = client
        .graphql(queries::GET_COWORKER_DIRECTORY, directory_variables(filters), Some("GetCoworkerDirectory"))
        .await?;
    Ok(data.coworker_directory)
}
