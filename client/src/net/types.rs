//! Wire DTOs mirrored from the backend REST and GraphQL payloads.
//!
//! DESIGN
//! ======
//! Field names follow the backend's camelCase JSON. Dates stay as ISO
//! strings on the wire; `util::format` parses them where the UI needs real
//! dates. Enum fields carry an `Unknown` catch-all where the backend may grow
//! new values so an unexpected string never fails a whole page load.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// AUTH
// =============================================================================

/// Account role carried in the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Employee,
    Manager,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "EMPLOYEE" => Self::Employee,
            "MANAGER" => Self::Manager,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "EMPLOYEE",
            Self::Manager => "MANAGER",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// The signed-in user, persisted as JSON under `auth_user`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub employee_id: String,
    pub role: Role,
    #[serde(default)]
    pub manager_id: Option<String>,
}

/// Response body of `POST /api/auth/login` and `POST /api/auth/switch-user`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: String,
    pub email: String,
    pub employee_id: String,
    pub role: String,
    #[serde(default)]
    pub manager_id: Option<String>,
}

impl AuthResponse {
    /// Split the response into the bearer token and the session user.
    pub fn into_session(self) -> (String, User) {
        let user = User {
            user_id: self.user_id,
            email: self.email,
            employee_id: self.employee_id,
            role: Role::parse(&self.role),
            manager_id: self.manager_id,
        };
        (self.token, user)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub struct SwitchUserRequest<'a> {
    pub email: &'a str,
}

/// Error body returned by REST endpoints (`{status, message, timestamp}`).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// PROFILE
// =============================================================================

/// Visibility tier of a profile field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldTier {
    SystemManaged,
    NonSensitive,
    Sensitive,
    #[serde(other)]
    Unknown,
}

/// How the viewer relates to the profile owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relationship {
    #[serde(rename = "SELF")]
    Owner,
    Manager,
    Coworker,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentStatus {
    Active,
    OnLeave,
    Terminated,
    #[serde(other)]
    Unknown,
}

impl EmploymentStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::OnLeave, Self::Terminated];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::OnLeave => "ON_LEAVE",
            Self::Terminated => "TERMINATED",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str().eq_ignore_ascii_case(raw.trim()))
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::OnLeave => "On Leave",
            Self::Terminated => "Terminated",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkLocationType {
    Office,
    Remote,
    Hybrid,
}

impl WorkLocationType {
    pub const ALL: [Self; 3] = [Self::Office, Self::Remote, Self::Hybrid];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Office => "OFFICE",
            Self::Remote => "REMOTE",
            Self::Hybrid => "HYBRID",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Office => "Office",
            Self::Remote => "Remote",
            Self::Hybrid => "Hybrid",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Viewer-specific metadata attached to a profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetadata {
    pub relationship: Relationship,
    #[serde(default)]
    pub visible_fields: Vec<FieldTier>,
    #[serde(default)]
    pub editable_fields: Vec<FieldTier>,
}

impl ProfileMetadata {
    pub fn can_view(&self, tier: FieldTier) -> bool {
        self.visible_fields.contains(&tier)
    }

    pub fn can_edit(&self, tier: FieldTier) -> bool {
        self.editable_fields.contains(&tier)
    }
}

/// Employee profile. Fields the viewer may not see arrive as `null`/absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    #[serde(default)]
    pub id: Option<String>,
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,

    // System-managed
    #[serde(default)]
    pub legal_first_name: Option<String>,
    #[serde(default)]
    pub legal_last_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub job_code: Option<String>,
    #[serde(default)]
    pub job_family: Option<String>,
    #[serde(default)]
    pub job_level: Option<String>,
    #[serde(default)]
    pub employment_status: Option<EmploymentStatus>,
    #[serde(default)]
    pub hire_date: Option<String>,
    #[serde(default)]
    pub termination_date: Option<String>,
    #[serde(default)]
    pub fte: Option<f64>,

    // Non-sensitive
    #[serde(default)]
    pub preferred_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub office_location: Option<String>,
    #[serde(default)]
    pub work_phone: Option<String>,
    #[serde(default)]
    pub work_location_type: Option<WorkLocationType>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub profile_photo_url: Option<String>,

    // Sensitive
    #[serde(default)]
    pub personal_email: Option<String>,
    #[serde(default)]
    pub personal_phone: Option<String>,
    #[serde(default)]
    pub home_address: Option<String>,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_phone: Option<String>,
    #[serde(default)]
    pub emergency_contact_relationship: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub visa_work_permit: Option<String>,
    #[serde(default)]
    pub absence_balance_days: Option<f64>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub performance_rating: Option<String>,

    #[serde(default)]
    pub metadata: Option<ProfileMetadata>,
}

impl ProfileDto {
    /// "Preferred-or-first Last" as shown in headers and dialogs.
    pub fn display_name(&self) -> String {
        let first = self
            .preferred_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.legal_first_name.as_deref())
            .unwrap_or_default();
        let last = self.legal_last_name.as_deref().unwrap_or_default();
        format!("{first} {last}").trim().to_owned()
    }
}

/// Profile field keys. Serialized in the backend's camelCase form so a
/// `BTreeMap<ProfileField, String>` becomes a partial-update JSON object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    LegalFirstName,
    LegalLastName,
    Department,
    JobCode,
    JobFamily,
    JobLevel,
    EmploymentStatus,
    HireDate,
    TerminationDate,
    Fte,
    PreferredName,
    JobTitle,
    OfficeLocation,
    WorkPhone,
    WorkLocationType,
    Bio,
    Skills,
    ProfilePhotoUrl,
    PersonalEmail,
    PersonalPhone,
    HomeAddress,
    EmergencyContactName,
    EmergencyContactPhone,
    EmergencyContactRelationship,
    DateOfBirth,
    VisaWorkPermit,
    AbsenceBalanceDays,
    Salary,
    PerformanceRating,
}

/// Partial profile update (`PATCH /api/profiles/{userId}` body).
pub type ProfileUpdate = BTreeMap<ProfileField, String>;

// =============================================================================
// ABSENCE
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AbsenceType {
    #[default]
    Vacation,
    Sick,
    Personal,
}

impl AbsenceType {
    pub const ALL: [Self; 3] = [Self::Vacation, Self::Sick, Self::Personal];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vacation => "VACATION",
            Self::Sick => "SICK",
            Self::Personal => "PERSONAL",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Vacation => "Vacation",
            Self::Sick => "Sick",
            Self::Personal => "Personal",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AbsenceStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
    #[serde(other)]
    Unknown,
}

impl AbsenceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Completed => "COMPLETED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceRequest {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub manager_id: Option<String>,
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "type")]
    pub kind: AbsenceType,
    pub status: AbsenceStatus,
    #[serde(default)]
    pub note: Option<String>,
}

/// `POST /api/absence` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAbsenceRequest {
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "type")]
    pub kind: AbsenceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AbsenceDecision {
    Approve,
    Reject,
}

/// `PATCH /api/absence/{id}` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UpdateAbsenceStatus {
    pub action: AbsenceDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// =============================================================================
// FEEDBACK
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackParticipant {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub preferred_name: Option<String>,
    #[serde(default)]
    pub legal_first_name: Option<String>,
    #[serde(default)]
    pub legal_last_name: Option<String>,
}

impl FeedbackParticipant {
    /// Preferred name, then joined legal names, then email.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.preferred_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_owned();
        }
        let legal = join_names(self.legal_first_name.as_deref(), self.legal_last_name.as_deref());
        if legal.is_empty() { self.email.clone() } else { legal }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackListItem {
    pub id: String,
    pub text: String,
    pub ai_polished: bool,
    pub created_at: String,
    pub author: FeedbackParticipant,
    pub recipient: FeedbackParticipant,
}

/// `POST /api/feedback` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    pub recipient_id: String,
    pub text: String,
    pub ai_polished: bool,
}

/// `POST /api/feedback` response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedFeedback {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub ai_polished: bool,
    pub created_at: String,
    pub author_id: String,
    #[serde(default)]
    pub author_name: Option<String>,
    pub recipient_id: String,
    #[serde(default)]
    pub recipient_name: Option<String>,
}

impl CreatedFeedback {
    pub fn into_list_item(self) -> FeedbackListItem {
        let author = participant_from_display(self.author_id, self.author_name.as_deref().unwrap_or("Author"));
        let recipient =
            participant_from_display(self.recipient_id, self.recipient_name.as_deref().unwrap_or("Recipient"));
        FeedbackListItem {
            id: self.id,
            text: self.text,
            ai_polished: self.ai_polished,
            created_at: self.created_at,
            author,
            recipient,
        }
    }
}

fn participant_from_display(id: String, display_name: &str) -> FeedbackParticipant {
    let mut parts = display_name.splitn(2, ' ');
    let first = parts.next().filter(|s| !s.is_empty()).map(str::to_owned);
    let rest = parts.next().map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned);
    FeedbackParticipant {
        id,
        email: String::new(),
        employee_id: None,
        preferred_name: Some(display_name.to_owned()),
        legal_first_name: first,
        legal_last_name: rest,
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PolishFeedbackRequest<'a> {
    pub text: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolishFeedbackResponse {
    pub original_text: String,
    pub polished_text: String,
}

// =============================================================================
// DIRECTORY
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coworker {
    pub user_id: String,
    pub employee_id: String,
    #[serde(default)]
    pub preferred_name: Option<String>,
    #[serde(default)]
    pub legal_first_name: String,
    #[serde(default)]
    pub legal_last_name: String,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub work_location_type: Option<String>,
    #[serde(default)]
    pub profile_photo_url: Option<String>,
    #[serde(default)]
    pub relationship: Option<String>,
    #[serde(default)]
    pub direct_report: bool,
    #[serde(default)]
    pub pending_absence_count: Option<u32>,
}

impl Coworker {
    /// Card title: preferred name, then legal first name, then "Employee".
    pub fn card_name(&self) -> String {
        self.preferred_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(Some(self.legal_first_name.as_str()).filter(|n| !n.trim().is_empty()))
            .unwrap_or("Employee")
            .to_owned()
    }

    /// Full name: preferred-or-first name followed by the legal last name.
    pub fn full_name(&self) -> String {
        let first = self
            .preferred_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(self.legal_first_name.as_str());
        join_names(Some(first), Some(self.legal_last_name.as_str()))
    }
}

/// Optional directory query filters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectoryFilters {
    pub search: Option<String>,
    pub department: Option<String>,
    pub direct_reports_only: bool,
}

fn join_names(first: Option<&str>, last: Option<&str>) -> String {
    [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
