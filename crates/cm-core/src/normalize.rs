//! Field normalizers deriving canonical sub-values from raw source fields
//!
//! Every function here is total: bad input degrades to an empty or
//! passthrough result, never an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::customer::is_present;

/// Referral answers that mention a friend (checked case-sensitively)
const FRIEND_MARKER: &str = "amigo";
/// Referral answers naming the fulanito campaign (checked case-sensitively)
const FULANITO_MARKER: &str = "fulanito";
/// Referral answers that mention Instagram (checked case-insensitively)
const INSTAGRAM_MARKER: &str = "por instagram";

/// Date-only formats accepted from source exports, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];
/// Datetime formats accepted from source exports, tried in order
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

/// City and country derived from a free-text address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub city: String,
    pub country: String,
}

/// Derive city and country from a single free-text address field.
///
/// The field is split on whitespace runs; the first token is the city and
/// the last the country. Middle tokens are dropped, a lossy heuristic kept
/// from the original export tooling.
pub fn parse_address(text: &str) -> Address {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.as_slice() {
        [] => Address::default(),
        [only] => Address {
            city: (*only).to_string(),
            country: String::new(),
        },
        [first, .., last] => Address {
            city: (*first).to_string(),
            country: (*last).to_string(),
        },
    }
}

/// Strip quote characters and blank segments from a comma-separated tag
/// list. First-occurrence order is preserved and duplicates survive; the
/// set union happens at merge time.
pub fn clean_tags(text: &str) -> String {
    text.replace('"', "")
        .split(',')
        .map(str::trim)
        .filter(|tag| is_present(tag))
        .collect::<Vec<_>>()
        .join(",")
}

/// Collapse a free-text referral answer onto a canonical token.
///
/// Marker precedence: friend, then fulanito, then Instagram. Anything else
/// passes through lower-cased.
pub fn map_referral_source(text: &str) -> String {
    if !is_present(text) {
        return String::new();
    }
    if text.contains(FRIEND_MARKER) {
        return "friend".to_string();
    }
    if text.contains(FULANITO_MARKER) {
        return "fulanito".to_string();
    }
    if mentions_instagram(text) {
        return "instagram".to_string();
    }
    text.to_lowercase()
}

/// Whether a referral answer mentions Instagram, case-insensitively
pub fn mentions_instagram(text: &str) -> bool {
    text.to_lowercase().contains(INSTAGRAM_MARKER)
}

/// Normalize a birth date to ISO `YYYY-MM-DD`, best effort.
///
/// Unparseable input passes through unchanged rather than erroring or going
/// blank.
pub fn format_birth_date(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.format("%Y-%m-%d").to_string();
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return datetime.date().format("%Y-%m-%d").to_string();
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return datetime.date_naive().format("%Y-%m-%d").to_string();
    }

    text.to_string()
}
