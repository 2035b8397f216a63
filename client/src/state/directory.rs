//! Coworker directory filters and card helpers.
//!
//! DESIGN
//! ======
//! The filter form and the applied filters are separate values. Typing only
//! touches the form; submitting copies it into `applied`, and the page
//! reloads whenever `applied` changes. That keeps one query per submit.

#[cfg(test)]
#[path = "directory_test.rs"]
mod directory_test;

use std::collections::BTreeSet;

use crate::error::ApiError;
use crate::net::api;
use crate::net::http::ApiClient;
use crate::net::types::{Coworker, DirectoryFilters};

pub const LOAD_DIRECTORY_FAILED: &str = "Failed to load coworkers";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterForm {
    pub search: String,
    pub department: String,
}

impl FilterForm {
    pub fn to_filters(&self) -> DirectoryFilters {
        let non_empty = |s: &str| Some(s.trim().to_owned()).filter(|s| !s.is_empty());
        DirectoryFilters {
            search: non_empty(&self.search),
            department: non_empty(&self.department),
            direct_reports_only: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectoryFilterState {
    pub form: FilterForm,
    pub applied: FilterForm,
}

impl DirectoryFilterState {
    /// Copy the form into the applied filters and return the query filters.
    pub fn apply(&mut self) -> DirectoryFilters {
        self.applied = self.form.clone();
        self.applied.to_filters()
    }

    pub fn reset(&mut self) -> DirectoryFilters {
        *self = Self::default();
        self.applied.to_filters()
    }
}

/// Distinct non-empty departments, sorted.
pub fn departments(people: &[Coworker]) -> Vec<String> {
    people
        .iter()
        .filter_map(|p| p.department.as_deref())
        .filter(|d| !d.is_empty())
        .map(str::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// First letter of each word, at most two, upper-cased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Card title and the initials shown when there is no photo.
pub fn card_title(person: &Coworker) -> (String, String) {
    let name = person.card_name();
    let letters = initials(&name);
    (name, letters)
}

/// "Job title · Department" with directory defaults.
pub fn job_line(person: &Coworker) -> String {
    format!(
        "{} · {}",
        person.job_title.as_deref().unwrap_or("Team member"),
        person.department.as_deref().unwrap_or("N/A")
    )
}

pub fn location_label(person: &Coworker) -> Option<String> {
    person
        .work_location_type
        .as_deref()
        .filter(|l| !l.is_empty())
        .map(str::to_ascii_lowercase)
}

/// Name shown in the feedback modal for a directory card.
pub fn recipient_name(person: &Coworker) -> String {
    person
        .preferred_name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("{} {}", person.legal_first_name, person.legal_last_name).trim().to_owned())
}

/// Run the directory query; failures become a banner message.
pub async fn load_directory(client: &ApiClient, filters: &DirectoryFilters) -> Result<Vec<Coworker>, String> {
    api::coworker_directory(client, filters).await.map_err(|err: ApiError| {
        log::warn!("directory load failed: {err}");
        err.user_message(LOAD_DIRECTORY_FAILED)
    })
}
