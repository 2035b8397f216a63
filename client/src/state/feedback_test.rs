use super::*;
use crate::net::graphql::{GraphQlError, GraphQlErrorExtensions};
use crate::net::test_support::test_client;
use crate::net::types::FeedbackParticipant;

fn item(id: &str) -> FeedbackListItem {
    FeedbackListItem {
        id: id.to_owned(),
        text: "Thanks for the review".to_owned(),
        ai_polished: false,
        created_at: "2030-01-01T10:00:00Z".to_owned(),
        author: FeedbackParticipant::default(),
        recipient: FeedbackParticipant::default(),
    }
}

fn draft(text: &str) -> FeedbackDraft {
    FeedbackDraft { text: text.to_owned(), ..FeedbackDraft::default() }
}

// =============================================================
// Draft
// =============================================================

#[test]
fn short_text_blocks_submit_and_polish() {
    let mut d = draft("  too short  ");
    assert!(!d.can_submit());
    assert!(d.begin_submit("u-2").is_none());
    assert_eq!(d.error.as_deref(), Some("Feedback must be at least 10 characters."));
    assert!(d.begin_polish().is_none());
    assert_eq!(d.error.as_deref(), Some("Enter at least 10 characters before polishing."));
    assert!(!d.submitting && !d.polishing);
}

#[test]
fn hint_counts_trimmed_characters() {
    assert_eq!(draft("  abc  ").hint(), "3/10 characters");
}

#[test]
fn editing_clears_error() {
    let mut d = draft("short");
    d.begin_submit("u-2");
    d.set_text("short but longer".to_owned());
    assert!(d.error.is_none());
}

#[test]
fn submit_body_is_trimmed_and_carries_polish_flag() {
    let mut d = draft("  Really helpful pairing session  ");
    d.used_polish = true;
    let body = d.begin_submit("u-2").unwrap();
    assert_eq!(body.text, "Really helpful pairing session");
    assert!(body.ai_polished);
    assert_eq!(body.recipient_id, "u-2");
    assert!(d.submitting);
}

#[test]
fn polish_apply_replaces_text_and_marks_polished() {
    let mut d = draft("gr8 job on teh launch");
    let text = d.begin_polish().unwrap();
    assert_eq!(text, "gr8 job on teh launch");
    d.finish_polish(Ok(PolishFeedbackResponse {
        original_text: text,
        polished_text: "Great job on the launch.".to_owned(),
    }));
    assert!(d.suggestion.is_some());
    d.apply_polished();
    assert_eq!(d.text, "Great job on the launch.");
    assert!(d.used_polish);
    assert!(d.suggestion.is_none());
}

#[test]
fn keep_original_discards_suggestion_and_clears_flag() {
    let mut d = draft("gr8 job on teh launch");
    d.used_polish = true;
    d.suggestion = Some(PolishFeedbackResponse { original_text: String::new(), polished_text: "x".to_owned() });
    d.keep_original();
    assert!(d.suggestion.is_none());
    assert!(!d.used_polish);
    assert_eq!(d.text, "gr8 job on teh launch");
}

#[test]
fn polish_failure_sets_error() {
    let mut d = draft("long enough text");
    d.begin_polish();
    d.finish_polish(Err(ApiError::Status { status: 503, message: None }));
    assert_eq!(d.error.as_deref(), Some("Failed to polish feedback."));
    assert!(!d.polishing);
}

#[tokio::test]
async fn successful_submit_resets_draft() {
    let t = test_client();
    t.transport.push(
        201,
        serde_json::json!({
            "id": "f-1", "text": "Really helpful pairing session", "aiPolished": false,
            "createdAt": "2030-01-01T10:00:00Z", "authorId": "u-1", "authorName": "Ada Lovelace",
            "recipientId": "u-2", "recipientName": "Alan Turing"
        }),
    );
    let mut d = draft("Really helpful pairing session");
    let body = d.begin_submit("u-2").unwrap();
    let result = api::create_feedback(&t.client, &body).await;
    let created = d.finish_submit(result).unwrap();
    assert_eq!(created.id, "f-1");
    assert_eq!(d, FeedbackDraft::default());
}

#[test]
fn failed_submit_keeps_text() {
    let mut d = draft("Really helpful pairing session");
    d.begin_submit("u-2");
    assert!(d.finish_submit(Err(ApiError::Network("offline".to_owned()))).is_none());
    assert_eq!(d.error.as_deref(), Some("Failed to submit feedback."));
    assert_eq!(d.text, "Really helpful pairing session");
}

// =============================================================
// Panel
// =============================================================

#[test]
fn forbidden_is_silent() {
    let err = ApiError::GraphQl(vec![GraphQlError {
        message: "Access denied".to_owned(),
        extensions: Some(GraphQlErrorExtensions { error_type: Some("FORBIDDEN".to_owned()) }),
    }]);
    assert_eq!(FeedbackPanel::from_result(Err(err)), FeedbackPanel::Forbidden);
}

#[test]
fn other_failures_offer_message() {
    let panel = FeedbackPanel::from_result(Err(ApiError::Network("down".to_owned())));
    assert_eq!(panel, FeedbackPanel::Failed(LOAD_FEEDBACK_FAILED.to_owned()));
}

#[test]
fn prepend_only_affects_loaded_lists() {
    let mut panel = FeedbackPanel::Loaded(vec![item("old")]);
    panel.prepend(item("new"));
    let FeedbackPanel::Loaded(items) = &panel else {
        panic!("expected loaded");
    };
    assert_eq!(items.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(), ["new", "old"]);

    let mut forbidden = FeedbackPanel::Forbidden;
    forbidden.prepend(item("x"));
    assert_eq!(forbidden, FeedbackPanel::Forbidden);
}

#[tokio::test]
async fn load_feedback_for_maps_forbidden_response() {
    let t = test_client();
    t.transport.push(
        200,
        serde_json::json!({ "errors": [{ "message": "Forbidden", "extensions": { "errorType": "FORBIDDEN" } }] }),
    );
    assert_eq!(load_feedback_for(&t.client, "u-2").await, FeedbackPanel::Forbidden);
    assert_eq!(t.redirect_count(), 0);
}

#[tokio::test]
async fn load_received_and_authored() {
    let t = test_client();
    t.transport.push_data(serde_json::json!({ "myReceivedFeedback": [] }));
    t.transport.push_data(serde_json::json!({ "myAuthoredFeedback": [] }));
    assert_eq!(load_received(&t.client).await, FeedbackPanel::Loaded(vec![]));
    assert_eq!(load_authored(&t.client).await, FeedbackPanel::Loaded(vec![]));
}
