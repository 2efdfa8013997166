use crate::core::tracking::TrackLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{checked_log_table, entry_totals, find_project_by_title, insert_project, list_projects};
use crate::errors::{AppError, AppResult};
use crate::models::project::{Project, ProjectSummary};
use crate::models::time_entry::TimeLogEntry;
use chrono::NaiveDateTime;
use rusqlite::Connection;

/// High-level business logic for project records.
pub struct ProjectLogic;

impl ProjectLogic {
    /// Create a project and its (empty) log table.
    pub fn create(
        pool: &mut DbPool,
        title: &str,
        details: &str,
        now: NaiveDateTime,
    ) -> AppResult<Project> {
        let tx = pool.conn.transaction()?;
        let project = Self::create_in(&tx, title, details, now)?;
        tx.commit()?;
        Ok(project)
    }

    /// Create a project and start tracking it. Nothing is stored unless
    /// both steps succeed.
    pub fn create_and_start(
        pool: &mut DbPool,
        title: &str,
        details: &str,
        now: NaiveDateTime,
    ) -> AppResult<(Project, TimeLogEntry)> {
        let tx = pool.conn.transaction()?;
        let mut project = Self::create_in(&tx, title, details, now)?;
        let entry = TrackLogic::start_in(&tx, &project.title, now)?;
        tx.commit()?;

        project.active = true;
        Ok((project, entry))
    }

    fn create_in(
        conn: &Connection,
        title: &str,
        details: &str,
        now: NaiveDateTime,
    ) -> AppResult<Project> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidTitle("title must not be empty".into()));
        }

        if find_project_by_title(conn, title)?.is_some() {
            return Err(AppError::DuplicateProject(title.to_string()));
        }

        let project = insert_project(conn, title, details.trim(), &now)?;
        ttlog(
            conn,
            "new",
            &project.title,
            &format!("Created project with log table {}", project.log_table),
        )?;

        Ok(project)
    }

    #[cfg(test)]
    pub fn get(pool: &DbPool, title: &str) -> AppResult<Project> {
        find_project_by_title(&pool.conn, title.trim())?
            .ok_or_else(|| AppError::ProjectNotFound(title.to_string()))
    }

    /// Projects ordered by title with their totals.
    /// `available_only` keeps the projects that are not currently tracked.
    pub fn list(pool: &DbPool, available_only: bool) -> AppResult<Vec<ProjectSummary>> {
        let mut out = Vec::new();

        for project in list_projects(&pool.conn)? {
            if available_only && project.active {
                continue;
            }
            let table = checked_log_table(&pool.conn, &project)?;
            let (entries, total_secs) = entry_totals(&pool.conn, table)?;
            out.push(ProjectSummary {
                project,
                entries,
                total_secs,
            });
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::table_exists;
    use crate::utils::time::parse_user_timestamp;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    fn at(s: &str) -> NaiveDateTime {
        parse_user_timestamp(s).unwrap()
    }

    #[test]
    fn create_adds_one_row_and_one_empty_table() {
        let mut pool = pool();

        let p = ProjectLogic::create(&mut pool, "  Website  ", "redesign", at("2025-01-01 09:00"))
            .unwrap();
        assert_eq!(p.title, "Website");
        assert_eq!(p.details, "redesign");
        assert!(table_exists(&pool.conn, &p.log_table).unwrap());

        let rows: i64 = pool
            .conn
            .query_row("SELECT COUNT(*) FROM projects", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);

        let log_tables: i64 = pool
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name LIKE 'project_log_%'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(log_tables, 1);

        let listed = ProjectLogic::list(&pool, false).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].project.title, "Website");
        assert_eq!(listed[0].entries, 0);
    }

    #[test]
    fn duplicate_and_empty_titles_are_rejected() {
        let mut pool = pool();
        ProjectLogic::create(&mut pool, "Website", "", at("2025-01-01 09:00")).unwrap();

        let dup = ProjectLogic::create(&mut pool, "Website", "", at("2025-01-01 09:00"));
        assert!(matches!(dup, Err(AppError::DuplicateProject(_))));

        let empty = ProjectLogic::create(&mut pool, "   ", "", at("2025-01-01 09:00"));
        assert!(matches!(empty, Err(AppError::InvalidTitle(_))));

        assert_eq!(ProjectLogic::list(&pool, false).unwrap().len(), 1);
    }

    #[test]
    fn create_and_start_is_all_or_nothing() {
        let mut pool = pool();
        let (p, entry) =
            ProjectLogic::create_and_start(&mut pool, "Alpha", "", at("2025-01-01 09:00")).unwrap();
        assert!(p.active);
        assert!(entry.is_open());

        let err = ProjectLogic::create_and_start(&mut pool, "Beta", "", at("2025-01-01 09:30"))
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyTracking(t) if t == "Alpha"));

        assert!(matches!(ProjectLogic::get(&pool, "Beta"), Err(AppError::ProjectNotFound(_))));
        let log_tables: i64 = pool
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name LIKE 'project_log_%'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(log_tables, 1);
    }

    #[test]
    fn titles_with_quotes_are_stored_verbatim() {
        let mut pool = pool();
        let title = r#"Client "X"; DROP TABLE projects; --"#;

        let p = ProjectLogic::create(&mut pool, title, "", at("2025-01-01 09:00")).unwrap();
        assert_eq!(ProjectLogic::get(&pool, title).unwrap().id, p.id);
    }

    #[test]
    fn list_is_sorted_by_title() {
        let mut pool = pool();
        for t in ["beta", "Alpha", "gamma"] {
            ProjectLogic::create(&mut pool, t, "", at("2025-01-01 09:00")).unwrap();
        }

        let titles: Vec<String> = ProjectLogic::list(&pool, false)
            .unwrap()
            .into_iter()
            .map(|s| s.project.title)
            .collect();
        assert_eq!(titles, vec!["Alpha", "beta", "gamma"]);
    }
}
