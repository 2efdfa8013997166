use chrono::NaiveDateTime;
use serde::Serialize;

/// One start/stop interval of a project.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimeLogEntry {
    pub id: i64,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>, // None while tracking
    pub duration: Option<i64>,      // seconds, set on close
    pub cumulative: Option<i64>,    // seconds, running project total, set on close
}

impl TimeLogEntry {
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Seconds elapsed from start to `now` (or to the recorded end).
    pub fn elapsed_secs(&self, now: NaiveDateTime) -> i64 {
        let end = self.end.unwrap_or(now);
        (end - self.start).num_seconds().max(0)
    }
}
