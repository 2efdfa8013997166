use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Project {
    pub id: i64,
    pub title: String,      // ⇔ projects.title (UNIQUE)
    pub details: String,    // ⇔ projects.details (TEXT, default '')
    pub created_at: NaiveDateTime,
    pub active: bool,       // ⇔ projects.active (0/1, at most one row = 1)
    pub log_table: String,  // ⇔ projects.log_table ("project_log_<id>")
}

impl Project {
    pub fn status_label(&self) -> &'static str {
        if self.active { "running" } else { "idle" }
    }
}

/// Project plus the total of its closed entries, for the projects listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub project: Project,
    pub entries: i64,
    pub total_secs: i64,
}
