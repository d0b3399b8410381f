//! Best-effort calendar date parsing shared by forms, CSV import and row mapping.

use chrono::{DateTime, NaiveDate};

const ISO_FORMAT: &str = "%Y-%m-%d";
const SLASH_FORMAT: &str = "%m/%d/%Y";

/// Parses `YYYY-MM-DD`, an RFC 3339 timestamp (date part kept) or
/// `M/D/YYYY` / `MM/DD/YYYY`. Returns `None` for anything else.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, ISO_FORMAT) {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    NaiveDate::parse_from_str(raw, SLASH_FORMAT).ok()
}

/// Storage form of a date: `YYYY-MM-DD`.
pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Export form of a date: `M/D/YYYY`, which `parse_flexible_date` reads back.
pub fn format_us(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}
