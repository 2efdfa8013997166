use crate::db::pool::DbPool;
use crate::db::queries::{checked_log_table, find_project_by_title, list_projects, load_entries};
use crate::errors::{AppError, AppResult};
use crate::models::record::LogRecord;
use crate::utils::period::Period;

/// Which log rows to load.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Restrict to one project title.
    pub project: Option<String>,
    /// Restrict to entries started inside the period.
    pub period: Option<Period>,
    /// Restrict to these entry ids (needs `project`).
    pub entries: Option<Vec<i64>>,
    /// Emit a placeholder row for projects with no matching entry.
    pub include_empty_projects: bool,
}

pub struct RecordsLogic;

impl RecordsLogic {
    /// Load the "All Records" rows, projects in id order, entries oldest first.
    pub fn load(pool: &DbPool, filter: &RecordFilter) -> AppResult<Vec<LogRecord>> {
        if filter.entries.is_some() && filter.project.is_none() {
            return Err(AppError::InvalidArgument(
                "--entries requires --project".to_string(),
            ));
        }

        let projects = match &filter.project {
            Some(title) => vec![
                find_project_by_title(&pool.conn, title.trim())?
                    .ok_or_else(|| AppError::ProjectNotFound(title.to_string()))?,
            ],
            None => {
                let mut all = list_projects(&pool.conn)?;
                all.sort_by_key(|p| p.id);
                all
            }
        };

        // placeholders only make sense when nothing narrows the entries
        let placeholders = filter.include_empty_projects
            && filter.period.is_none()
            && filter.entries.is_none();

        let mut out = Vec::new();
        for project in &projects {
            let table = checked_log_table(&pool.conn, project)?;
            let entries: Vec<_> = load_entries(&pool.conn, table)?
                .into_iter()
                .filter(|e| filter.period.is_none_or(|p| p.contains(&e.start)))
                .filter(|e| {
                    filter
                        .entries
                        .as_ref()
                        .is_none_or(|ids| ids.contains(&e.id))
                })
                .collect();

            if entries.is_empty() {
                if placeholders {
                    out.push(LogRecord::new(project, None));
                }
                continue;
            }

            out.extend(entries.into_iter().map(|e| LogRecord::new(project, Some(e))));
        }

        Ok(out)
    }

    /// Sum of closed durations over the rows.
    pub fn total_secs(records: &[LogRecord]) -> i64 {
        records.iter().map(LogRecord::duration_secs).sum()
    }
}
