//! Feedback draft (with optional AI polish) and feedback list panels.
//!
//! DESIGN
//! ======
//! `FeedbackDraft` carries everything the modal needs between renders. The
//! `begin_*`/`finish_*` pairs keep the async call itself in the component
//! while the state transitions stay testable here.
//!
//! ERROR HANDLING
//! ==============
//! A forbidden GraphQL error while listing feedback is an expected outcome
//! for coworkers, so the panel goes quiet (`Forbidden`) instead of showing a
//! banner. Every other failure offers a retry.

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

use crate::error::ApiError;
use crate::net::api;
use crate::net::http::ApiClient;
use crate::net::types::{CreateFeedbackRequest, FeedbackListItem, PolishFeedbackResponse};
use crate::util::validation::char_len;

pub const MIN_FEEDBACK_LEN: usize = 10;
pub const LOAD_FEEDBACK_FAILED: &str = "Failed to load feedback";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedbackDraft {
    pub text: String,
    pub suggestion: Option<PolishFeedbackResponse>,
    pub used_polish: bool,
    pub error: Option<String>,
    pub submitting: bool,
    pub polishing: bool,
}

impl FeedbackDraft {
    pub fn trimmed_len(&self) -> usize {
        char_len(self.text.trim())
    }

    pub fn long_enough(&self) -> bool {
        self.trimmed_len() >= MIN_FEEDBACK_LEN
    }

    pub fn can_submit(&self) -> bool {
        self.long_enough() && !self.submitting
    }

    /// "7/10 characters".
    pub fn hint(&self) -> String {
        format!("{}/{MIN_FEEDBACK_LEN} characters", self.trimmed_len())
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
        self.error = None;
    }

    pub fn begin_submit(&mut self, recipient_id: &str) -> Option<CreateFeedbackRequest> {
        if !self.long_enough() {
            self.error = Some(format!("Feedback must be at least {MIN_FEEDBACK_LEN} characters."));
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some(CreateFeedbackRequest {
            recipient_id: recipient_id.to_owned(),
            text: self.text.trim().to_owned(),
            ai_polished: self.used_polish,
        })
    }

    /// On success the draft resets and the created item is handed back.
    pub fn finish_submit(&mut self, result: Result<FeedbackListItem, ApiError>) -> Option<FeedbackListItem> {
        self.submitting = false;
        match result {
            Ok(item) => {
                *self = Self::default();
                Some(item)
            }
            Err(err) => {
                self.error = Some(err.user_message("Failed to submit feedback."));
                None
            }
        }
    }

    /// Trimmed text to polish, or `None` with an error set.
    pub fn begin_polish(&mut self) -> Option<String> {
        if !self.long_enough() {
            self.error = Some(format!("Enter at least {MIN_FEEDBACK_LEN} characters before polishing."));
            return None;
        }
        self.polishing = true;
        self.error = None;
        Some(self.text.trim().to_owned())
    }

    pub fn finish_polish(&mut self, result: Result<PolishFeedbackResponse, ApiError>) {
        self.polishing = false;
        match result {
            Ok(resp) => self.suggestion = Some(resp),
            Err(err) => {
                self.error = Some(err.user_message("Failed to polish feedback."));
                self.suggestion = None;
            }
        }
    }

    pub fn apply_polished(&mut self) {
        if let Some(suggestion) = self.suggestion.take() {
            self.text = suggestion.polished_text;
            self.used_polish = true;
        }
    }

    pub fn keep_original(&mut self) {
        self.suggestion = None;
        self.used_polish = false;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FeedbackPanel {
    #[default]
    Loading,
    Loaded(Vec<FeedbackListItem>),
    /// The viewer may not read this feedback; render nothing.
    Forbidden,
    Failed(String),
}

impl FeedbackPanel {
    pub fn from_result(result: Result<Vec<FeedbackListItem>, ApiError>) -> Self {
        match result {
            Ok(items) => Self::Loaded(items),
            Err(err) if err.is_forbidden() => Self::Forbidden,
            Err(err) => {
                log::warn!("feedback load failed: {err}");
                Self::Failed(err.user_message(LOAD_FEEDBACK_FAILED))
            }
        }
    }

    /// Show a freshly created item at the top of a loaded list.
    pub fn prepend(&mut self, item: FeedbackListItem) {
        if let Self::Loaded(items) = self {
            items.insert(0, item);
        }
    }
}

pub async fn load_feedback_for(client: &ApiClient, user_id: &str) -> FeedbackPanel {
    FeedbackPanel::from_result(api::feedback_for_user(client, user_id).await)
}

pub async fn load_received(client: &ApiClient) -> FeedbackPanel {
    FeedbackPanel::from_result(api::my_received_feedback(client).await)
}

pub async fn load_authored(client: &ApiClient) -> FeedbackPanel {
    FeedbackPanel::from_result(api::my_authored_feedback(client).await)
}
