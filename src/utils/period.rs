//! Period filters (`--period` / `--range`).
//!
//! Supported shapes:
//! - YYYY
//! - YYYY-MM
//! - YYYY-MM-DD
//! - YYYY:YYYY
//! - YYYY-MM:YYYY-MM
//! - YYYY-MM-DD:YYYY-MM-DD

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Inclusive date bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn parse(raw: &str) -> AppResult<Self> {
        let raw = raw.trim();

        if let Some((start_raw, end_raw)) = raw.split_once(':') {
            let (start, end) = (start_raw.trim(), end_raw.trim());
            if start.len() != end.len() {
                return Err(AppError::InvalidPeriod(format!(
                    "{raw}: start and end must have same format"
                )));
            }
            let (d1, _) = bounds_of(start)?;
            let (_, d2) = bounds_of(end)?;
            if d2 < d1 {
                return Err(AppError::InvalidPeriod(format!("{raw}: end before start")));
            }
            return Ok(Self { start: d1, end: d2 });
        }

        let (start, end) = bounds_of(raw)?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        let d = ts.date();
        d >= self.start && d <= self.end
    }

    /// Human description used in listing and PDF titles.
    pub fn describe(raw: &str) -> String {
        let raw = raw.trim();
        if let Some((a, b)) = raw.split_once(':') {
            return format!("from {} to {}", a.trim(), b.trim());
        }
        match raw.len() {
            4 => format!("for year {raw}"),
            7 => match bounds_of(raw) {
                Ok((d, _)) => format!("for {} {}", month_name(d.month()), d.year()),
                Err(_) => raw.to_string(),
            },
            _ => format!("for date {raw}"),
        }
    }
}

fn bounds_of(s: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidPeriod(s.to_string());

    match s.len() {
        // YYYY
        4 => {
            let y: i32 = s.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
                .map_err(|_| invalid())?;
            let next = if d1.month() == 12 {
                NaiveDate::from_ymd_opt(d1.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(d1.year(), d1.month() + 1, 1)
            };
            let d2 = next.and_then(|n| n.pred_opt()).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

fn month_name(m: u32) -> &'static str {
    match m {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}
