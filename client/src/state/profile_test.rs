use super::*;
use crate::net::api;
use crate::net::test_support::test_client;
use crate::net::types::Relationship;
use time::macros::date;

const TODAY: Date = date!(2030 - 06 - 15);

fn metadata(relationship: Relationship, visible: &[FieldTier], editable: &[FieldTier]) -> ProfileMetadata {
    ProfileMetadata { relationship, visible_fields: visible.to_vec(), editable_fields: editable.to_vec() }
}

fn own_profile() -> ProfileDto {
    ProfileDto {
        user_id: "u-1".to_owned(),
        legal_first_name: Some("Ada".to_owned()),
        legal_last_name: Some("Lovelace".to_owned()),
        preferred_name: Some("Ada".to_owned()),
        job_title: Some("Engineer".to_owned()),
        personal_email: Some("ada@home.net".to_owned()),
        salary: Some(120_000.0),
        metadata: Some(metadata(
            Relationship::Owner,
            &[FieldTier::SystemManaged, FieldTier::NonSensitive, FieldTier::Sensitive],
            &[FieldTier::NonSensitive, FieldTier::Sensitive],
        )),
        ..ProfileDto::default()
    }
}

fn keys(fields: &[VisibleField]) -> Vec<ProfileField> {
    fields.iter().map(|f| f.spec.key).collect()
}

// =============================================================
// Catalog
// =============================================================

#[test]
fn catalog_covers_every_field_once() {
    let total: usize = SECTIONS.iter().map(|s| s.fields.len()).sum();
    assert_eq!(total, 29);
    for section in SECTIONS {
        assert!(section.fields.iter().all(|f| f.tier == section.tier));
    }
    let find = |key: ProfileField| SECTIONS.iter().flat_map(|s| s.fields.iter()).copied().find(|f| f.key == key);
    assert_eq!(find(ProfileField::Salary).map(|s| s.editable), Some(false));
    assert_eq!(find(ProfileField::WorkPhone).map(|s| s.kind), Some(InputKind::Tel));
}

#[test]
fn section_titles() {
    let titles: Vec<_> = SECTIONS.iter().map(|s| s.title).collect();
    assert_eq!(titles, ["Basic Information", "Work Details", "Personal & Confidential"]);
}

// =============================================================
// Gating
// =============================================================

#[test]
fn hidden_tier_is_never_rendered() {
    let mut profile = own_profile();
    profile.metadata = Some(metadata(Relationship::Coworker, &[FieldTier::NonSensitive], &[]));
    let fields = visible_fields(SENSITIVE_FIELDS, &profile, profile.metadata.as_ref(), true);
    assert!(fields.is_empty());
}

#[test]
fn empty_fields_hidden_outside_edit_mode() {
    let profile = own_profile();
    let fields = visible_fields(NON_SENSITIVE_FIELDS, &profile, profile.metadata.as_ref(), false);
    assert_eq!(keys(&fields), [ProfileField::PreferredName, ProfileField::JobTitle]);
}

#[test]
fn edit_mode_reveals_empty_editable_fields_only() {
    let profile = own_profile();
    let fields = visible_fields(SENSITIVE_FIELDS, &profile, profile.metadata.as_ref(), true);
    let shown = keys(&fields);
    assert!(shown.contains(&ProfileField::HomeAddress));
    assert!(shown.contains(&ProfileField::Salary));
    assert!(!shown.contains(&ProfileField::PerformanceRating));
    let salary = fields.iter().find(|f| f.spec.key == ProfileField::Salary).unwrap();
    assert!(!salary.editable);
    assert_eq!(salary.value.as_deref(), Some("120000"));
}

#[test]
fn editability_needs_descriptor_and_tier() {
    let profile = ProfileDto {
        user_id: "u-2".to_owned(),
        job_title: Some("Analyst".to_owned()),
        metadata: Some(metadata(
            Relationship::Manager,
            &[FieldTier::SystemManaged, FieldTier::NonSensitive, FieldTier::Sensitive],
            &[FieldTier::SystemManaged],
        )),
        ..ProfileDto::default()
    };
    let fields = visible_fields(NON_SENSITIVE_FIELDS, &profile, profile.metadata.as_ref(), true);
    assert_eq!(keys(&fields), [ProfileField::JobTitle]);
    assert!(!fields[0].editable);
}

#[test]
fn without_metadata_all_tiers_visible_and_descriptor_decides() {
    let mut profile = own_profile();
    profile.metadata = None;
    let fields = visible_fields(SENSITIVE_FIELDS, &profile, None, false);
    assert_eq!(keys(&fields), [ProfileField::PersonalEmail, ProfileField::Salary]);
    assert!(fields[0].editable);
    assert!(!fields[1].editable);
}

#[test]
fn select_values_use_wire_form() {
    let profile = ProfileDto {
        user_id: "u".to_owned(),
        employment_status: Some(EmploymentStatus::OnLeave),
        work_location_type: Some(WorkLocationType::Remote),
        ..ProfileDto::default()
    };
    assert_eq!(field_value(&profile, ProfileField::EmploymentStatus).as_deref(), Some("ON_LEAVE"));
    assert_eq!(field_value(&profile, ProfileField::WorkLocationType).as_deref(), Some("REMOTE"));
}

#[test]
fn merged_applies_typed_values() {
    let mut edits = ProfileUpdate::new();
    edits.insert(ProfileField::WorkLocationType, "HYBRID".to_owned());
    edits.insert(ProfileField::Bio, "Hello".to_owned());
    let out = merged(&own_profile(), &edits);
    assert_eq!(out.work_location_type, Some(WorkLocationType::Hybrid));
    assert_eq!(out.bio.as_deref(), Some("Hello"));
    assert_eq!(out.legal_last_name.as_deref(), Some("Lovelace"));
}

// =============================================================
// Validation
// =============================================================

fn updates(pairs: &[(ProfileField, &str)]) -> ProfileUpdate {
    pairs.iter().map(|(k, v)| (*k, (*v).to_owned())).collect()
}

#[test]
fn valid_updates_pass() {
    let ok = updates(&[
        (ProfileField::PreferredName, "Al"),
        (ProfileField::PersonalEmail, "al@example.com"),
        (ProfileField::ProfilePhotoUrl, "https://img.example.com/al.png"),
        (ProfileField::WorkPhone, "+1 555 010 0100"),
        (ProfileField::DateOfBirth, "1990-04-01"),
    ]);
    assert!(validate_profile_updates(&ok, TODAY).is_empty());
}

#[test]
fn invalid_updates_reported_per_field() {
    let long = "x".repeat(1001);
    let bad = updates(&[
        (ProfileField::PreferredName, " A "),
        (ProfileField::PersonalEmail, "not-an-email"),
        (ProfileField::ProfilePhotoUrl, "ftp://files"),
        (ProfileField::PersonalPhone, "12-34"),
        (ProfileField::EmergencyContactPhone, "call me"),
        (ProfileField::DateOfBirth, "2031-01-01"),
        (ProfileField::Bio, long.as_str()),
        (ProfileField::Skills, long.as_str()),
    ]);
    let errors = validate_profile_updates(&bad, TODAY);
    assert_eq!(errors.len(), 8);
    assert_eq!(errors[&ProfileField::PersonalEmail], "Enter a valid email address.");
    assert_eq!(errors[&ProfileField::PersonalPhone], "Enter at least 7 digits.");
    assert_eq!(errors[&ProfileField::DateOfBirth], "Date of birth must be in the past.");
}

#[test]
fn unparseable_birth_date_rejected_and_empty_values_skipped() {
    let errors = validate_profile_updates(
        &updates(&[(ProfileField::DateOfBirth, "tomorrow"), (ProfileField::WorkPhone, "")]),
        TODAY,
    );
    assert_eq!(errors.keys().copied().collect::<Vec<_>>(), [ProfileField::DateOfBirth]);
}

// =============================================================
// Editor
// =============================================================

#[test]
fn can_edit_uses_metadata_then_ownership() {
    let editor = ProfileEditor::loaded(own_profile());
    assert!(editor.can_edit(Some("someone-else")));

    let mut read_only = own_profile();
    read_only.metadata = Some(metadata(Relationship::Coworker, &[FieldTier::NonSensitive], &[]));
    assert!(!ProfileEditor::loaded(read_only).can_edit(Some("u-1")));

    let mut bare = own_profile();
    bare.metadata = None;
    let editor = ProfileEditor::loaded(bare);
    assert!(editor.can_edit(Some("u-1")));
    assert!(!editor.can_edit(Some("u-2")));
    assert!(!editor.can_edit(None));
}

#[test]
fn edit_cancel_and_field_error_clearing() {
    let mut editor = ProfileEditor::loaded(own_profile());
    assert!(editor.begin_edit(Some("u-1")));
    editor.set_field(ProfileField::PersonalEmail, "bad".to_owned());
    assert_eq!(editor.begin_save(TODAY), SaveStep::Invalid);
    assert_eq!(editor.error.as_deref(), Some(FIX_FIELDS_MESSAGE));
    assert!(editor.field_errors.contains_key(&ProfileField::PersonalEmail));
    assert!(editor.edit_mode);

    editor.set_field(ProfileField::PersonalEmail, "good@mail.com".to_owned());
    assert!(editor.field_errors.is_empty());

    editor.cancel();
    assert!(!editor.edit_mode);
    assert!(editor.edits.is_empty());
}

#[test]
fn current_value_prefers_pending_edit() {
    let mut editor = ProfileEditor::loaded(own_profile());
    assert_eq!(editor.current_value(ProfileField::JobTitle).as_deref(), Some("Engineer"));
    editor.begin_edit(Some("u-1"));
    editor.set_field(ProfileField::JobTitle, "Lead".to_owned());
    assert_eq!(editor.current_value(ProfileField::JobTitle).as_deref(), Some("Lead"));
    assert!(editor.current_value(ProfileField::Bio).is_none());
    assert!(editor.field_error(ProfileField::JobTitle).is_none());
}

#[test]
fn save_without_edits_leaves_edit_mode() {
    let mut editor = ProfileEditor::loaded(own_profile());
    editor.begin_edit(Some("u-1"));
    assert_eq!(editor.begin_save(TODAY), SaveStep::NoChanges);
    assert!(!editor.edit_mode);
}

#[tokio::test]
async fn successful_save_replaces_profile_with_response() {
    let t = test_client();
    let mut editor = ProfileEditor::loaded(own_profile());
    editor.begin_edit(Some("u-1"));
    editor.set_field(ProfileField::JobTitle, "Staff Engineer".to_owned());

    let SaveStep::Submit(pending) = editor.begin_save(TODAY) else {
        panic!("expected submit");
    };
    assert_eq!(editor.profile.as_ref().unwrap().job_title.as_deref(), Some("Staff Engineer"));
    assert!(!editor.edit_mode);
    assert!(editor.saving);

    t.transport.push(200, serde_json::json!({ "userId": "u-1", "jobTitle": "Staff Engineer (server)" }));
    let result = api::update_profile(&t.client, "u-1", &pending.updates).await;
    editor.finish_save(pending, result);

    assert!(!editor.saving);
    assert_eq!(editor.profile.unwrap().job_title.as_deref(), Some("Staff Engineer (server)"));
}

#[tokio::test]
async fn failed_save_rolls_back_and_restores_edits() {
    let t = test_client();
    let original = own_profile();
    let mut editor = ProfileEditor::loaded(original.clone());
    editor.begin_edit(Some("u-1"));
    editor.set_field(ProfileField::Bio, "New bio".to_owned());

    let SaveStep::Submit(pending) = editor.begin_save(TODAY) else {
        panic!("expected submit");
    };
    t.transport.push(400, serde_json::json!({ "message": "Bio contains banned words" }));
    let result = api::update_profile(&t.client, "u-1", &pending.updates).await;
    editor.finish_save(pending, result);

    assert_eq!(editor.profile.as_ref(), Some(&original));
    assert!(editor.edit_mode);
    assert_eq!(editor.edits.get(&ProfileField::Bio).map(String::as_str), Some("New bio"));
    assert_eq!(editor.error.as_deref(), Some("Bio contains banned words"));
}

#[test]
fn failed_save_without_message_uses_fallback() {
    let mut editor = ProfileEditor::loaded(own_profile());
    editor.begin_edit(Some("u-1"));
    editor.set_field(ProfileField::Skills, "Rust".to_owned());
    let SaveStep::Submit(pending) = editor.begin_save(TODAY) else {
        panic!("expected submit");
    };
    editor.finish_save(pending, Err(ApiError::Network("offline".to_owned())));
    assert_eq!(editor.error.as_deref(), Some("Failed to save changes"));
}

#[test]
fn save_result_for_another_profile_is_dropped() {
    let mut editor = ProfileEditor::loaded(own_profile());
    editor.begin_edit(Some("u-1"));
    editor.set_field(ProfileField::Bio, "Mine".to_owned());
    let SaveStep::Submit(pending) = editor.begin_save(TODAY) else {
        panic!("expected submit");
    };

    let other = ProfileDto { user_id: "u-2".to_owned(), ..ProfileDto::default() };
    editor = ProfileEditor::loaded(other.clone());
    editor.finish_save(pending, Err(ApiError::Network("offline".to_owned())));

    assert_eq!(editor.profile.as_ref(), Some(&other));
    assert!(!editor.edit_mode);
    assert!(editor.edits.is_empty());
    assert!(editor.error.is_none());
}

// =============================================================
// Messages
// =============================================================

#[test]
fn load_error_messages() {
    let not_found = ApiError::Status { status: 404, message: None };
    assert_eq!(profile_error_message(&not_found, "Failed to load profile"), "Profile not found");
    let server = ApiError::Status { status: 403, message: Some("Access denied".to_owned()) };
    assert_eq!(profile_error_message(&server, "Failed to load profile"), "Access denied");
    let other = ApiError::Status { status: 500, message: None };
    assert_eq!(profile_error_message(&other, "Failed to load profile"), "Failed to load profile");
}

#[test]
fn profile_ids_must_be_uuids() {
    assert!(is_profile_id("1b4e28ba-2fa1-11d2-883f-0016d3cca427"));
    assert!(!is_profile_id("me"));
}

#[test]
fn subtitle_defaults_to_employee() {
    let mut profile = own_profile();
    assert_eq!(header_subtitle(&profile), "Engineer");
    profile.job_title = None;
    assert_eq!(header_subtitle(&profile), "Employee");
}
