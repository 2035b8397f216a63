//! Absence request form, list ordering, and submit/decide workflows.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the absence page (own requests plus a manager's pending queue)
//! and by the "Request time off" card on one's own profile, which caps the
//! duration at 30 days.
//!
//! DESIGN
//! ======
//! Workflows are free async functions over `&ApiClient` returning plain
//! results; the page owns the signals and decides what to display. After a
//! mutation both lists reload concurrently.
//!
//! TRADE-OFFS
//! ==========
//! No conflict handling: two managers deciding the same request race, and
//! the loser sees the server's error on the next reload.

#[cfg(test)]
#[path = "absence_test.rs"]
mod absence_test;

use std::collections::{BTreeMap, HashMap};

use futures::future::join;
use time::Date;

use crate::error::ApiError;
use crate::net::api;
use crate::net::http::ApiClient;
use crate::net::types::{
    AbsenceDecision, AbsenceRequest, AbsenceStatus, AbsenceType, Coworker, CreateAbsenceRequest, DirectoryFilters,
    UpdateAbsenceStatus,
};
use crate::util::format::{inclusive_days, parse_iso_date};
use crate::util::validation::char_len;

pub const MAX_NOTE_CHARS: usize = 200;
/// Duration cap applied by the profile page's time-off card.
pub const PROFILE_MAX_DAYS: i64 = 30;

pub const LOAD_MINE_FAILED: &str = "Failed to load your absence requests";
pub const LOAD_PENDING_FAILED: &str = "Failed to load pending requests";
pub const SUBMIT_FAILED: &str = "Failed to submit request";
pub const DECISION_FAILED: &str = "Failed to update request";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    StartDate,
    EndDate,
    Note,
}

pub type FormErrors = BTreeMap<FormField, String>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AbsenceForm {
    pub start_date: String,
    pub end_date: String,
    pub kind: AbsenceType,
    pub note: String,
}

impl AbsenceForm {
    pub fn to_request(&self) -> CreateAbsenceRequest {
        let note = self.note.trim();
        CreateAbsenceRequest {
            start_date: self.start_date.trim().to_owned(),
            end_date: self.end_date.trim().to_owned(),
            kind: self.kind,
            note: (!note.is_empty()).then(|| note.to_owned()),
        }
    }

    /// Clear dates and note after a successful submit. The type is kept.
    pub fn reset_after_submit(&mut self) {
        self.start_date.clear();
        self.end_date.clear();
        self.note.clear();
    }
}

fn parse_field(raw: &str, field: FormField, errors: &mut FormErrors, required: &str) -> Option<Date> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.insert(field, required.to_owned());
        return None;
    }
    let parsed = parse_iso_date(raw);
    if parsed.is_none() {
        errors.insert(field, "Enter a valid date".to_owned());
    }
    parsed
}

/// Check a request before submission. `max_days` caps the inclusive
/// duration when set.
pub fn validate_absence(form: &AbsenceForm, today: Date, max_days: Option<i64>) -> FormErrors {
    let mut errors = FormErrors::new();
    let start = parse_field(&form.start_date, FormField::StartDate, &mut errors, "Start date is required");
    let end = parse_field(&form.end_date, FormField::EndDate, &mut errors, "End date is required");

    if let (Some(start), Some(end)) = (start, end) {
        let backdating_allowed = form.kind == AbsenceType::Sick;
        if !backdating_allowed && start < today {
            errors.insert(FormField::StartDate, "Start date must be today or later".to_owned());
        }
        if !backdating_allowed && end < today {
            errors.insert(FormField::EndDate, "End date must be today or later".to_owned());
        }
        if end < start {
            errors.insert(FormField::EndDate, "End date cannot be before start date".to_owned());
        } else if let Some(max) = max_days
            && inclusive_days(start, end) > max
        {
            errors.insert(FormField::EndDate, format!("Absence cannot exceed {max} days"));
        }
    }
    if char_len(&form.note) > MAX_NOTE_CHARS {
        errors.insert(FormField::Note, "Note must be 200 characters or less".to_owned());
    }
    errors
}

/// Newest start first.
pub fn sort_my_requests(mut items: Vec<AbsenceRequest>) -> Vec<AbsenceRequest> {
    items.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    items
}

/// Oldest start first, so the most urgent decision is on top.
pub fn sort_pending(mut items: Vec<AbsenceRequest>) -> Vec<AbsenceRequest> {
    items.sort_by(|a, b| a.start_date.cmp(&b.start_date));
    items
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonRef {
    pub name: String,
    pub employee_id: String,
}

pub type PersonLookup = HashMap<String, PersonRef>;

pub fn person_lookup(people: &[Coworker]) -> PersonLookup {
    people
        .iter()
        .map(|p| (p.user_id.clone(), PersonRef { name: p.full_name(), employee_id: p.employee_id.clone() }))
        .collect()
}

/// "Name · E-123" for a known requester, the raw user id otherwise.
pub fn requester_label(lookup: &PersonLookup, user_id: &str) -> String {
    match lookup.get(user_id) {
        Some(person) if person.employee_id.is_empty() => person.name.clone(),
        Some(person) => format!("{} · {}", person.name, person.employee_id),
        None => user_id.to_owned(),
    }
}

/// Reject notes are optional; a blank prompt answer sends none.
pub fn decision_body(decision: AbsenceDecision, note: Option<String>) -> UpdateAbsenceStatus {
    let note = match decision {
        AbsenceDecision::Approve => None,
        AbsenceDecision::Reject => note.map(|n| n.trim().to_owned()).filter(|n| !n.is_empty()),
    };
    UpdateAbsenceStatus { action: decision, note }
}

/// Outcome of reloading both lists.
#[derive(Debug)]
pub struct Reloaded {
    pub mine: Result<Vec<AbsenceRequest>, ApiError>,
    /// `None` when the viewer has no approval queue.
    pub pending: Option<Result<Vec<AbsenceRequest>, ApiError>>,
}

pub async fn reload_lists(client: &ApiClient, include_pending: bool) -> Reloaded {
    let mine = async { api::my_absence_requests(client).await.map(sort_my_requests) };
    let pending = async {
        if include_pending {
            Some(api::pending_absence_requests(client).await.map(sort_pending))
        } else {
            None
        }
    };
    let (mine, pending) = join(mine, pending).await;
    Reloaded { mine, pending }
}

/// Requester names for the pending queue. Lookup failures yield an empty map.
pub async fn load_person_lookup(client: &ApiClient) -> PersonLookup {
    match api::coworker_directory(client, &DirectoryFilters::default()).await {
        Ok(people) => person_lookup(&people),
        Err(err) => {
            log::debug!("directory lookup for absence names failed: {err}");
            PersonLookup::new()
        }
    }
}

/// Submit a request and reload.
///
/// # Errors
///
/// The submit error; nothing is reloaded in that case.
pub async fn submit_and_reload(
    client: &ApiClient,
    request: &CreateAbsenceRequest,
    include_pending: bool,
) -> Result<Reloaded, ApiError> {
    api::submit_absence_request(client, request).await?;
    Ok(reload_lists(client, include_pending).await)
}

/// Approve or reject a pending request, then reload both lists.
///
/// # Errors
///
/// The status-update error; nothing is reloaded in that case.
pub async fn decide_and_reload(
    client: &ApiClient,
    id: &str,
    decision: AbsenceDecision,
    note: Option<String>,
) -> Result<Reloaded, ApiError> {
    api::update_absence_status(client, id, &decision_body(decision, note)).await?;
    Ok(reload_lists(client, true).await)
}

/// List state shown on the absence page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AbsenceLists {
    pub mine: Vec<AbsenceRequest>,
    pub mine_error: Option<String>,
    pub pending: Vec<AbsenceRequest>,
    pub pending_error: Option<String>,
}

impl AbsenceLists {
    /// Adopt a reload. A failed list keeps its previous items and gains an
    /// error; a skipped pending reload leaves the queue untouched.
    pub fn apply(&mut self, reloaded: Reloaded) {
        match reloaded.mine {
            Ok(items) => {
                self.mine = items;
                self.mine_error = None;
            }
            Err(err) => {
                log::warn!("absence list load failed: {err}");
                self.mine_error = Some(err.user_message(LOAD_MINE_FAILED));
            }
        }
        match reloaded.pending {
            Some(Ok(items)) => {
                self.pending = items;
                self.pending_error = None;
            }
            Some(Err(err)) => {
                log::warn!("pending absence load failed: {err}");
                self.pending_error = Some(err.user_message(LOAD_PENDING_FAILED));
            }
            None => {}
        }
    }
}

pub fn status_class(status: AbsenceStatus) -> String {
    format!("status-badge status-{}", status.as_str().to_ascii_lowercase())
}
