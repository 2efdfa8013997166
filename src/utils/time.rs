//! Time utilities: timestamp parsing/formatting and the `--at` clock override.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime};

/// Storage format for every timestamp in the database.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

pub fn now() -> NaiveDateTime {
    // drop sub-second precision, timestamps are stored to the second
    let n = Local::now().naive_local();
    parse_timestamp(&format_timestamp(&n)).unwrap_or(n)
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()
}

/// Parse a user supplied timestamp (`YYYY-MM-DD HH:MM[:SS]`, `T` separator allowed).
pub fn parse_user_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| AppError::InvalidTime(s.to_string()))
}

/// Resolve the `--at` override, falling back to the current local time.
pub fn resolve_at(at: Option<&String>) -> AppResult<NaiveDateTime> {
    match at {
        Some(s) => parse_user_timestamp(s),
        None => Ok(now()),
    }
}
