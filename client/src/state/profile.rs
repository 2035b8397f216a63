//! Profile field catalog, visibility gating, and the edit/save workflow.
//!
//! SYSTEM CONTEXT
//! ==============
//! The profile page renders three sections from a static field catalog. The
//! backend attaches `metadata` naming which tiers the viewer may see and
//! edit; this module turns catalog + metadata + current values into the list
//! of fields a section actually shows.
//!
//! DESIGN
//! ======
//! Gating is a pure filter so it can be tested without a DOM. The editor is
//! a plain struct held in one signal: the page calls `begin_save`, fires the
//! PATCH, then hands the outcome to `finish_save`.
//!
//! TRADE-OFFS
//! ==========
//! Saves are optimistic. The displayed profile updates before the server
//! answers and is rolled back on failure, which can briefly show values the
//! server later rejects.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use std::collections::BTreeMap;

use time::Date;

use crate::error::ApiError;
use crate::net::types::{
    EmploymentStatus, FieldTier, ProfileDto, ProfileField, ProfileMetadata, ProfileUpdate, WorkLocationType,
};
use crate::util::format::parse_iso_date;
use crate::util::validation::{char_len, has_min_phone_digits, is_http_url, is_valid_email};

pub const MAX_LONG_TEXT: usize = 1000;
pub const FIX_FIELDS_MESSAGE: &str = "Please fix the highlighted fields.";

// =============================================================================
// FIELD CATALOG
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Textarea,
    Select,
    Date,
    Number,
    Email,
    Tel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: ProfileField,
    pub label: &'static str,
    pub tier: FieldTier,
    pub kind: InputKind,
    /// Editability before viewer permissions are applied.
    pub editable: bool,
    pub placeholder: Option<&'static str>,
}

const fn field(
    key: ProfileField,
    label: &'static str,
    tier: FieldTier,
    kind: InputKind,
    editable: bool,
    placeholder: Option<&'static str>,
) -> FieldSpec {
    FieldSpec { key, label, tier, kind, editable, placeholder }
}

use FieldTier::{NonSensitive, Sensitive, SystemManaged};
use InputKind::{Date as DateInput, Email, Number, Select, Tel, Text, Textarea};

pub const SYSTEM_MANAGED_FIELDS: &[FieldSpec] = &[
    field(ProfileField::LegalFirstName, "Legal First Name", SystemManaged, Text, false, None),
    field(ProfileField::LegalLastName, "Legal Last Name", SystemManaged, Text, false, None),
    field(ProfileField::Department, "Department", SystemManaged, Text, false, None),
    field(ProfileField::JobCode, "Job Code", SystemManaged, Text, false, None),
    field(ProfileField::JobFamily, "Job Family", SystemManaged, Text, false, None),
    field(ProfileField::JobLevel, "Job Level", SystemManaged, Text, false, None),
    field(ProfileField::EmploymentStatus, "Employment Status", SystemManaged, Select, false, None),
    field(ProfileField::HireDate, "Hire Date", SystemManaged, DateInput, false, None),
    field(ProfileField::TerminationDate, "Termination Date", SystemManaged, DateInput, false, None),
    field(ProfileField::Fte, "FTE", SystemManaged, Number, false, None),
];

pub const NON_SENSITIVE_FIELDS: &[FieldSpec] = &[
    field(ProfileField::PreferredName, "Preferred Name", NonSensitive, Text, true, Some("Enter preferred name")),
    field(ProfileField::JobTitle, "Job Title", NonSensitive, Text, true, Some("Enter job title")),
    field(ProfileField::OfficeLocation, "Office Location", NonSensitive, Text, true, Some("Enter office location")),
    field(ProfileField::WorkPhone, "Work Phone", NonSensitive, Tel, true, Some("+1-555-0100")),
    field(ProfileField::WorkLocationType, "Work Location Type", NonSensitive, Select, true, None),
    field(ProfileField::Bio, "Bio", NonSensitive, Textarea, true, Some("Tell us about yourself")),
    field(ProfileField::Skills, "Skills", NonSensitive, Textarea, true, Some("List your skills")),
    field(ProfileField::ProfilePhotoUrl, "Profile Photo URL", NonSensitive, Text, true, Some("https://...")),
];

pub const SENSITIVE_FIELDS: &[FieldSpec] = &[
    field(ProfileField::PersonalEmail, "Personal Email", Sensitive, Email, true, Some("personal@email.com")),
    field(ProfileField::PersonalPhone, "Personal Phone", Sensitive, Tel, true, Some("+1-555-9999")),
    field(ProfileField::HomeAddress, "Home Address", Sensitive, Textarea, true, Some("Enter home address")),
    field(ProfileField::EmergencyContactName, "Emergency Contact Name", Sensitive, Text, true, Some("Contact name")),
    field(ProfileField::EmergencyContactPhone, "Emergency Contact Phone", Sensitive, Tel, true, Some("+1-555-0000")),
    field(
        ProfileField::EmergencyContactRelationship,
        "Emergency Contact Relationship",
        Sensitive,
        Text,
        true,
        Some("Relationship"),
    ),
    field(ProfileField::DateOfBirth, "Date of Birth", Sensitive, DateInput, true, None),
    field(ProfileField::VisaWorkPermit, "Visa/Work Permit", Sensitive, Text, true, Some("Visa details")),
    field(ProfileField::AbsenceBalanceDays, "Absence Balance (Days)", Sensitive, Number, false, None),
    field(ProfileField::Salary, "Salary", Sensitive, Number, false, None),
    field(ProfileField::PerformanceRating, "Performance Rating", Sensitive, Text, false, None),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionSpec {
    pub title: &'static str,
    pub tier: FieldTier,
    pub fields: &'static [FieldSpec],
}

pub const SECTIONS: [SectionSpec; 3] = [
    SectionSpec { title: "Basic Information", tier: SystemManaged, fields: SYSTEM_MANAGED_FIELDS },
    SectionSpec { title: "Work Details", tier: NonSensitive, fields: NON_SENSITIVE_FIELDS },
    SectionSpec { title: "Personal & Confidential", tier: Sensitive, fields: SENSITIVE_FIELDS },
];

// =============================================================================
// VALUES
// =============================================================================

fn number_text(value: Option<f64>) -> Option<String> {
    value.map(|v| v.to_string())
}

/// Wire-form string value of a profile field, `None` when absent.
pub fn field_value(profile: &ProfileDto, key: ProfileField) -> Option<String> {
    use ProfileField as F;
    match key {
        F::LegalFirstName => profile.legal_first_name.clone(),
        F::LegalLastName => profile.legal_last_name.clone(),
        F::Department => profile.department.clone(),
        F::JobCode => profile.job_code.clone(),
        F::JobFamily => profile.job_family.clone(),
        F::JobLevel => profile.job_level.clone(),
        F::EmploymentStatus => profile.employment_status.map(|s| s.as_str().to_owned()),
        F::HireDate => profile.hire_date.clone(),
        F::TerminationDate => profile.termination_date.clone(),
        F::Fte => number_text(profile.fte),
        F::PreferredName => profile.preferred_name.clone(),
        F::JobTitle => profile.job_title.clone(),
        F::OfficeLocation => profile.office_location.clone(),
        F::WorkPhone => profile.work_phone.clone(),
        F::WorkLocationType => profile.work_location_type.map(|w| w.as_str().to_owned()),
        F::Bio => profile.bio.clone(),
        F::Skills => profile.skills.clone(),
        F::ProfilePhotoUrl => profile.profile_photo_url.clone(),
        F::PersonalEmail => profile.personal_email.clone(),
        F::PersonalPhone => profile.personal_phone.clone(),
        F::HomeAddress => profile.home_address.clone(),
        F::EmergencyContactName => profile.emergency_contact_name.clone(),
        F::EmergencyContactPhone => profile.emergency_contact_phone.clone(),
        F::EmergencyContactRelationship => profile.emergency_contact_relationship.clone(),
        F::DateOfBirth => profile.date_of_birth.clone(),
        F::VisaWorkPermit => profile.visa_work_permit.clone(),
        F::AbsenceBalanceDays => number_text(profile.absence_balance_days),
        F::Salary => number_text(profile.salary),
        F::PerformanceRating => profile.performance_rating.clone(),
    }
}

/// Write an edited string into the profile for optimistic display.
pub fn apply_value(profile: &mut ProfileDto, key: ProfileField, value: &str) {
    use ProfileField as F;
    let text = Some(value.to_owned());
    let number = value.trim().parse::<f64>().ok();
    match key {
        F::LegalFirstName => profile.legal_first_name = text,
        F::LegalLastName => profile.legal_last_name = text,
        F::Department => profile.department = text,
        F::JobCode => profile.job_code = text,
        F::JobFamily => profile.job_family = text,
        F::JobLevel => profile.job_level = text,
        F::EmploymentStatus => profile.employment_status = EmploymentStatus::parse(value),
        F::HireDate => profile.hire_date = text,
        F::TerminationDate => profile.termination_date = text,
        F::Fte => profile.fte = number,
        F::PreferredName => profile.preferred_name = text,
        F::JobTitle => profile.job_title = text,
        F::OfficeLocation => profile.office_location = text,
        F::WorkPhone => profile.work_phone = text,
        F::WorkLocationType => profile.work_location_type = WorkLocationType::parse(value),
        F::Bio => profile.bio = text,
        F::Skills => profile.skills = text,
        F::ProfilePhotoUrl => profile.profile_photo_url = text,
        F::PersonalEmail => profile.personal_email = text,
        F::PersonalPhone => profile.personal_phone = text,
        F::HomeAddress => profile.home_address = text,
        F::EmergencyContactName => profile.emergency_contact_name = text,
        F::EmergencyContactPhone => profile.emergency_contact_phone = text,
        F::EmergencyContactRelationship => profile.emergency_contact_relationship = text,
        F::DateOfBirth => profile.date_of_birth = text,
        F::VisaWorkPermit => profile.visa_work_permit = text,
        F::AbsenceBalanceDays => profile.absence_balance_days = number,
        F::Salary => profile.salary = number,
        F::PerformanceRating => profile.performance_rating = text,
    }
}

/// Profile with pending edits merged over it.
pub fn merged(profile: &ProfileDto, edits: &ProfileUpdate) -> ProfileDto {
    let mut out = profile.clone();
    for (key, value) in edits {
        apply_value(&mut out, *key, value);
    }
    out
}

// =============================================================================
// GATING
// =============================================================================

/// A field as a section renders it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleField {
    pub spec: FieldSpec,
    pub value: Option<String>,
    pub editable: bool,
}

pub fn tier_visible(metadata: Option<&ProfileMetadata>, tier: FieldTier) -> bool {
    metadata.is_none_or(|m| m.can_view(tier))
}

pub fn field_editable(metadata: Option<&ProfileMetadata>, spec: &FieldSpec) -> bool {
    spec.editable && metadata.is_none_or(|m| m.can_edit(spec.tier))
}

/// Fields of `fields` the viewer should see: tier visible, and either a
/// value is present or the field is editable right now.
pub fn visible_fields(
    fields: &[FieldSpec],
    profile: &ProfileDto,
    metadata: Option<&ProfileMetadata>,
    edit_mode: bool,
) -> Vec<VisibleField> {
    fields
        .iter()
        .filter(|spec| tier_visible(metadata, spec.tier))
        .filter_map(|spec| {
            let editable = field_editable(metadata, spec);
            let value = field_value(profile, spec.key);
            (value.is_some() || (edit_mode && editable)).then(|| VisibleField { spec: *spec, value, editable })
        })
        .collect()
}

// =============================================================================
// VALIDATION
// =============================================================================

pub type FieldErrors = BTreeMap<ProfileField, String>;

const PHONE_FIELDS: [ProfileField; 3] =
    [ProfileField::WorkPhone, ProfileField::PersonalPhone, ProfileField::EmergencyContactPhone];

/// Per-field checks on edited values. Empty values are not checked.
pub fn validate_profile_updates(updates: &ProfileUpdate, today: Date) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let filled = |key: ProfileField| updates.get(&key).map(String::as_str).filter(|v| !v.is_empty());

    if let Some(name) = filled(ProfileField::PreferredName)
        && char_len(name.trim()) < 2
    {
        errors.insert(ProfileField::PreferredName, "Preferred name must be at least 2 characters.".to_owned());
    }
    if let Some(email) = filled(ProfileField::PersonalEmail)
        && !is_valid_email(email)
    {
        errors.insert(ProfileField::PersonalEmail, "Enter a valid email address.".to_owned());
    }
    if let Some(url) = filled(ProfileField::ProfilePhotoUrl)
        && !is_http_url(url)
    {
        errors.insert(ProfileField::ProfilePhotoUrl, "Enter a valid URL starting with http or https.".to_owned());
    }
    for key in PHONE_FIELDS {
        if let Some(phone) = filled(key)
            && !has_min_phone_digits(phone)
        {
            errors.insert(key, "Enter at least 7 digits.".to_owned());
        }
    }
    if let Some(dob) = filled(ProfileField::DateOfBirth)
        && parse_iso_date(dob).is_none_or(|d| d > today)
    {
        errors.insert(ProfileField::DateOfBirth, "Date of birth must be in the past.".to_owned());
    }
    if let Some(bio) = filled(ProfileField::Bio)
        && char_len(bio) > MAX_LONG_TEXT
    {
        errors.insert(ProfileField::Bio, "Bio must be 1000 characters or fewer.".to_owned());
    }
    if let Some(skills) = filled(ProfileField::Skills)
        && char_len(skills) > MAX_LONG_TEXT
    {
        errors.insert(ProfileField::Skills, "Skills must be 1000 characters or fewer.".to_owned());
    }
    errors
}

// =============================================================================
// EDITOR
// =============================================================================

/// Banner text for a failed profile request.
pub fn profile_error_message(err: &ApiError, fallback: &str) -> String {
    if err.status() == Some(404) {
        return err.user_message("Profile not found");
    }
    err.user_message(fallback)
}

pub fn is_profile_id(raw: &str) -> bool {
    uuid::Uuid::parse_str(raw).is_ok()
}

/// Snapshot taken when a save is submitted, used to roll back on failure.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSave {
    pub updates: ProfileUpdate,
    user_id: Option<String>,
    previous: Option<ProfileDto>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SaveStep {
    /// Nothing was edited; edit mode has been left.
    NoChanges,
    /// Validation failed; `field_errors` and the banner are set.
    Invalid,
    Submit(PendingSave),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileEditor {
    pub profile: Option<ProfileDto>,
    pub edits: ProfileUpdate,
    pub edit_mode: bool,
    pub saving: bool,
    pub error: Option<String>,
    pub field_errors: FieldErrors,
}

impl ProfileEditor {
    pub fn loaded(profile: ProfileDto) -> Self {
        Self { profile: Some(profile), ..Self::default() }
    }

    pub fn metadata(&self) -> Option<&ProfileMetadata> {
        self.profile.as_ref().and_then(|p| p.metadata.as_ref())
    }

    /// With metadata, any editable tier allows editing; without it only the
    /// owner may edit.
    pub fn can_edit(&self, viewer_id: Option<&str>) -> bool {
        let Some(profile) = self.profile.as_ref() else {
            return false;
        };
        match profile.metadata.as_ref() {
            Some(meta) => !meta.editable_fields.is_empty(),
            None => viewer_id.is_some_and(|id| id == profile.user_id),
        }
    }

    pub fn begin_edit(&mut self, viewer_id: Option<&str>) -> bool {
        if !self.can_edit(viewer_id) {
            return false;
        }
        self.edit_mode = true;
        self.edits.clear();
        self.field_errors.clear();
        true
    }

    pub fn cancel(&mut self) {
        self.edit_mode = false;
        self.edits.clear();
        self.field_errors.clear();
    }

    pub fn set_field(&mut self, key: ProfileField, value: String) {
        self.edits.insert(key, value);
        self.field_errors.remove(&key);
    }

    /// Profile as currently displayed (edits merged in).
    pub fn display_profile(&self) -> Option<ProfileDto> {
        self.profile.as_ref().map(|p| merged(p, &self.edits))
    }

    /// Pending edit for `key`, else the loaded value.
    pub fn current_value(&self, key: ProfileField) -> Option<String> {
        self.edits
            .get(&key)
            .cloned()
            .or_else(|| self.profile.as_ref().and_then(|p| field_value(p, key)))
    }

    pub fn field_error(&self, key: ProfileField) -> Option<String> {
        self.field_errors.get(&key).cloned()
    }

    pub fn begin_save(&mut self, today: Date) -> SaveStep {
        if self.edits.is_empty() {
            self.edit_mode = false;
            self.field_errors.clear();
            return SaveStep::NoChanges;
        }
        let errors = validate_profile_updates(&self.edits, today);
        if !errors.is_empty() {
            self.field_errors = errors;
            self.error = Some(FIX_FIELDS_MESSAGE.to_owned());
            return SaveStep::Invalid;
        }

        let updates = std::mem::take(&mut self.edits);
        let previous = self.profile.clone();
        let user_id = previous.as_ref().map(|p| p.user_id.clone());
        if let Some(profile) = self.profile.as_mut() {
            *profile = merged(profile, &updates);
        }
        self.saving = true;
        self.error = None;
        self.field_errors.clear();
        self.edit_mode = false;
        SaveStep::Submit(PendingSave { updates, user_id, previous })
    }

    /// Apply a save result. A result for a profile other than the one now
    /// shown is dropped.
    pub fn finish_save(&mut self, pending: PendingSave, result: Result<ProfileDto, ApiError>) {
        if self.profile.as_ref().map(|p| &p.user_id) != pending.user_id.as_ref() {
            log::debug!("ignoring save result for a profile no longer shown");
            return;
        }
        self.saving = false;
        match result {
            Ok(updated) => self.profile = Some(updated),
            Err(err) => {
                log::warn!("profile save failed: {err}");
                if pending.previous.is_some() {
                    self.profile = pending.previous;
                }
                self.edits = pending.updates;
                self.edit_mode = true;
                self.error = Some(profile_error_message(&err, "Failed to save changes"));
            }
        }
    }
}

pub fn header_subtitle(profile: &ProfileDto) -> String {
    profile
        .job_title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or("Employee")
        .to_owned()
}
