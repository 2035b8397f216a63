//! Date parsing and display formatting.
//!
//! DESIGN
//! ======
//! Dates travel as ISO strings. Parsing happens only where the UI compares
//! or formats them, and "today" is injected into validation so tests can pin
//! the calendar. In the browser, today is the user's local date.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// Parse `YYYY-MM-DD`, tolerating a trailing time component.
pub fn parse_iso_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    let day = raw.get(..10).unwrap_or(raw);
    Date::parse(day, format_description!("[year]-[month]-[day]")).ok()
}

/// The viewer's current calendar date.
pub fn today() -> Date {
    #[cfg(feature = "hydrate")]
    {
        let now = js_sys::Date::new_0();
        let month = time::Month::try_from(u8::try_from(now.get_month() + 1).unwrap_or(1)).unwrap_or(time::Month::January);
        let year = i32::try_from(now.get_full_year()).unwrap_or(1970);
        let day = u8::try_from(now.get_date()).unwrap_or(1);
        Date::from_calendar_date(year, month, day).unwrap_or_else(|_| OffsetDateTime::now_utc().date())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        OffsetDateTime::now_utc().date()
    }
}

/// "Jan 2, 2030" for an ISO date; unparseable input is returned unchanged.
pub fn format_date(raw: &str) -> String {
    parse_iso_date(raw).map_or_else(
        || raw.to_owned(),
        |d| {
            d.format(format_description!("[month repr:short] [day padding:none], [year]"))
                .unwrap_or_else(|_| raw.to_owned())
        },
    )
}

/// "Jan 2, 2030, 3:04 PM" for an RFC 3339 or naive timestamp.
pub fn format_timestamp(raw: &str) -> String {
    let parsed = OffsetDateTime::parse(raw.trim(), &Rfc3339)
        .map(|dt| PrimitiveDateTime::new(dt.date(), dt.time()))
        .or_else(|_| {
            PrimitiveDateTime::parse(
                raw.trim(),
                format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"),
            )
        });
    let Ok(dt) = parsed else {
        return raw.to_owned();
    };
    dt.format(format_description!(
        "[month repr:short] [day padding:none], [year], [hour repr:12 padding:none]:[minute] [period]"
    ))
    .unwrap_or_else(|_| raw.to_owned())
}

/// Inclusive day count between two dates (`start == end` is one day).
pub fn inclusive_days(start: Date, end: Date) -> i64 {
    (end - start).whole_days() + 1
}
