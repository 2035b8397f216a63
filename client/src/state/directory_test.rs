use super::*;
use crate::net::test_support::test_client;

fn person(user_id: &str, first: &str, department: Option<&str>) -> Coworker {
    Coworker {
        user_id: user_id.to_owned(),
        employee_id: format!("E-{user_id}"),
        preferred_name: None,
        legal_first_name: first.to_owned(),
        legal_last_name: "Smith".to_owned(),
        job_title: None,
        department: department.map(str::to_owned),
        work_location_type: Some("HYBRID".to_owned()),
        profile_photo_url: None,
        relationship: None,
        direct_report: false,
        pending_absence_count: None,
    }
}

// =============================================================
// Filters
// =============================================================

#[test]
fn typing_does_not_change_applied_filters() {
    let mut state = DirectoryFilterState::default();
    state.form.search = "ana".to_owned();
    assert_eq!(state.applied, FilterForm::default());
    let filters = state.apply();
    assert_eq!(filters.search.as_deref(), Some("ana"));
    assert_eq!(state.applied.search, "ana");
}

#[test]
fn reset_clears_form_and_applied() {
    let mut state = DirectoryFilterState::default();
    state.form.search = "ana".to_owned();
    state.form.department = "Sales".to_owned();
    state.apply();
    let filters = state.reset();
    assert_eq!(state, DirectoryFilterState::default());
    assert_eq!(filters, DirectoryFilters::default());
}

#[tokio::test]
async fn applying_search_and_department_issues_one_query() {
    let t = test_client();
    t.transport.push_data(serde_json::json!({ "coworkerDirectory": [] }));
    let mut state = DirectoryFilterState::default();
    state.form.search = " ana ".to_owned();
    state.form.department = "Engineering".to_owned();

    let filters = state.apply();
    load_directory(&t.client, &filters).await.unwrap();

    let requests = t.transport.requests();
    assert_eq!(requests.len(), 1);
    let body = requests[0].body.clone().unwrap();
    assert_eq!(body["variables"], serde_json::json!({ "search": "ana", "department": "Engineering" }));
}

#[tokio::test]
async fn load_failure_becomes_message() {
    let t = test_client();
    t.transport.push(500, serde_json::json!({}));
    let err = load_directory(&t.client, &DirectoryFilters::default()).await.unwrap_err();
    assert_eq!(err, LOAD_DIRECTORY_FAILED);
}

// =============================================================
// Card helpers
// =============================================================

#[test]
fn departments_are_unique_and_sorted() {
    let people = vec![
        person("1", "A", Some("Sales")),
        person("2", "B", Some("Engineering")),
        person("3", "C", Some("Sales")),
        person("4", "D", None),
    ];
    assert_eq!(departments(&people), ["Engineering", "Sales"]);
}

#[test]
fn initials_take_two_words() {
    assert_eq!(initials("mary jane watson"), "MJ");
    assert_eq!(initials("Employee"), "E");
    assert_eq!(initials(""), "");
}

#[test]
fn card_title_uses_first_name_only() {
    let mut p = person("1", "Ana", None);
    assert_eq!(card_title(&p), ("Ana".to_owned(), "A".to_owned()));
    p.preferred_name = Some("Annie Mae".to_owned());
    assert_eq!(card_title(&p), ("Annie Mae".to_owned(), "AM".to_owned()));
    p.preferred_name = None;
    p.legal_first_name = String::new();
    assert_eq!(card_title(&p), ("Employee".to_owned(), "E".to_owned()));
}

#[test]
fn card_defaults() {
    let p = person("1", "Ana", None);
    assert_eq!(job_line(&p), "Team member · N/A");
    assert_eq!(location_label(&p).as_deref(), Some("hybrid"));
    assert_eq!(recipient_name(&p), "Ana Smith");
}
