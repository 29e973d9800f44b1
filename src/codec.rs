use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Canonical stored form: zero-padded YYYY-MM-DD, nothing else.
static STORED_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid STORED_DATE_RE regex"));

/// A persisted due-date string that is not canonical `YYYY-MM-DD`.
///
/// This signals corruption in the stored data, not bad user input; the
/// resolver never produces such a string.
#[derive(Debug, Error, PartialEq)]
#[error("invalid stored due date '{0}': expected YYYY-MM-DD")]
pub struct DecodeError(pub String);

/// Encode a calendar date into its canonical stored form.
///
/// Uses the date's own calendar fields; no timezone conversion happens here.
pub fn encode(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Decode a canonical stored string back into a calendar date
pub fn decode(s: &str) -> Result<NaiveDate, DecodeError> {
    if !STORED_DATE_RE.is_match(s) {
        return Err(DecodeError(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| DecodeError(s.to_string()))
}

/// Decode a stored due-date cell, treating corruption as "no due date".
///
/// An empty cell is the normal absent case. Anything else that fails to
/// decode is logged and dropped rather than crashing a listing.
pub fn decode_stored(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    match decode(s) {
        Ok(date) => Some(date),
        Err(err) => {
            tracing::warn!("{err}; treating task as having no due date");
            None
        }
    }
}
