//! Small input checks shared by forms.
//!
//! These mirror what the backend enforces closely enough to catch typos
//! before a round trip. The server remains the authority.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

pub const MIN_PHONE_DIGITS: usize = 7;

/// `^[^\s@]+@[^\s@]+\.[^\s@]+$`: one `@`, a non-empty local part, and a
/// domain with at least one interior dot.
pub fn is_valid_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .rfind('.')
        .is_some_and(|dot| dot > 0 && dot + 1 < domain.len())
}

/// Absolute `http`/`https` URL with a host.
pub fn is_http_url(raw: &str) -> bool {
    url::Url::parse(raw.trim())
        .is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some_and(|h| !h.is_empty()))
}

/// At least [`MIN_PHONE_DIGITS`] digits, ignoring punctuation and spaces.
pub fn has_min_phone_digits(raw: &str) -> bool {
    raw.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

/// Length in characters, not bytes.
pub fn char_len(raw: &str) -> usize {
    raw.chars().count()
}
