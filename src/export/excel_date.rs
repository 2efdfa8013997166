// src/export/excel_date.rs

use chrono::{NaiveDate, NaiveDateTime};

/// Interpret a cell string as a timestamp or an `H:MM:SS` duration,
/// returning the Excel serial value and its number format.
pub(crate) fn parse_to_excel_value(s: &str) -> Option<(&'static str, f64)> {
    let dt_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

    for fmt in dt_formats.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(("yyyy-mm-dd hh:mm:ss", naive_datetime_to_excel_serial(&dt)));
        }
    }

    parse_clock_seconds(s).map(|secs| ("[h]:mm:ss", secs as f64 / 86400.0))
}

/// `H:MM:SS` with unbounded hours.
fn parse_clock_seconds(s: &str) -> Option<i64> {
    let mut parts = s.split(':');
    let (h, m, sec) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || m.len() != 2 || sec.len() != 2 {
        return None;
    }
    let h: i64 = h.parse().ok()?;
    let m: i64 = m.parse().ok()?;
    let sec: i64 = sec.parse().ok()?;
    if h < 0 || m >= 60 || sec >= 60 {
        return None;
    }
    Some(h * 3600 + m * 60 + sec)
}

fn naive_datetime_to_excel_serial(dt: &NaiveDateTime) -> f64 {
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();

    let duration = *dt - excel_epoch;

    let days = duration.num_days() as f64;
    let secs = (duration.num_seconds() - duration.num_days() * 86400) as f64;

    days + secs / 86400.0
}
