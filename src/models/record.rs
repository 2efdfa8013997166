//! Flat "All Records" row: a log entry joined with its project.

use super::project::Project;
use super::time_entry::TimeLogEntry;
use crate::utils::formatting::optional_clock;
use crate::utils::time::format_timestamp;

#[derive(Debug, Clone)]
pub struct LogRecord {
    pub project_id: i64,
    pub title: String,
    pub details: String,
    /// None for a project without entries (placeholder row).
    pub entry: Option<TimeLogEntry>,
}

impl LogRecord {
    pub fn new(project: &Project, entry: Option<TimeLogEntry>) -> Self {
        Self {
            project_id: project.id,
            title: project.title.clone(),
            details: project.details.clone(),
            entry,
        }
    }

    pub fn entry_id(&self) -> Option<i64> {
        self.entry.as_ref().map(|e| e.id)
    }

    pub fn duration_secs(&self) -> i64 {
        self.entry.as_ref().and_then(|e| e.duration).unwrap_or(0)
    }

    pub fn start_str(&self) -> String {
        match &self.entry {
            Some(e) => format_timestamp(&e.start),
            None => "N/A".to_string(),
        }
    }

    pub fn end_str(&self) -> String {
        match &self.entry {
            Some(e) => match &e.end {
                Some(end) => format_timestamp(end),
                None => "In Progress".to_string(),
            },
            None => "N/A".to_string(),
        }
    }

    pub fn duration_str(&self) -> String {
        optional_clock(self.entry.as_ref().and_then(|e| e.duration))
    }

    pub fn cumulative_str(&self) -> String {
        optional_clock(self.entry.as_ref().and_then(|e| e.cumulative))
    }
}
