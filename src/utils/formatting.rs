//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Seconds as `HH:MM:SS`, hours are not wrapped at 24.
pub fn secs2clock(secs: i64) -> String {
    let s = secs.max(0);
    format!("{:02}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
}

/// Seconds as `HHh MMm SSs`, used for totals.
pub fn secs2readable(secs: i64) -> String {
    let s = secs.max(0);
    format!("{:02}h {:02}m {:02}s", s / 3600, (s % 3600) / 60, s % 60)
}

/// Optional seconds as `HH:MM:SS`, or `N/A` when unset.
pub fn optional_clock(secs: Option<i64>) -> String {
    secs.map(secs2clock).unwrap_or_else(|| "N/A".to_string())
}
