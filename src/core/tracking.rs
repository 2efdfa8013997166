use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    active_project, checked_log_table, close_entry, closed_seconds_before, count_open_entries,
    find_project_by_title, insert_open_entry, open_entry, set_active,
};
use crate::errors::{AppError, AppResult};
use crate::models::project::Project;
use crate::models::time_entry::TimeLogEntry;
use crate::ui::messages::warning;
use crate::utils::formatting::secs2clock;
use crate::utils::time::format_timestamp;
use chrono::NaiveDateTime;
use rusqlite::Connection;

/// The project currently being tracked.
#[derive(Debug, Clone)]
pub struct RunningStatus {
    pub project: Project,
    pub entry: TimeLogEntry,
    pub elapsed_secs: i64,
}

/// What `status` found.
#[derive(Debug, Clone)]
pub enum TrackStatus {
    Idle,
    Running(RunningStatus),
    /// Active flag set but no open log entry.
    Stale(Project),
}

/// Start / stop logic. At most one project is active at any time.
pub struct TrackLogic;

impl TrackLogic {
    /// Open a new log entry for `title` and mark it active.
    pub fn start(pool: &mut DbPool, title: &str, now: NaiveDateTime) -> AppResult<TimeLogEntry> {
        let tx = pool.conn.transaction()?;
        let entry = Self::start_in(&tx, title, now)?;
        tx.commit()?;
        Ok(entry)
    }

    /// Start tracking inside a caller-owned transaction.
    pub(crate) fn start_in(
        conn: &Connection,
        title: &str,
        now: NaiveDateTime,
    ) -> AppResult<TimeLogEntry> {
        let project = find_project_by_title(conn, title.trim())?
            .ok_or_else(|| AppError::ProjectNotFound(title.to_string()))?;
        let table = checked_log_table(conn, &project)?;

        if project.active || count_open_entries(conn, table)? > 0 {
            return Err(AppError::AlreadyTracking(project.title.clone()));
        }
        if let Some(other) = active_project(conn)? {
            return Err(AppError::AlreadyTracking(other.title));
        }

        let entry_id = insert_open_entry(conn, table, &now)?;
        set_active(conn, project.id, true)?;
        ttlog(
            conn,
            "start",
            &project.title,
            &format!("Tracking started at {}", format_timestamp(&now)),
        )?;

        Ok(TimeLogEntry {
            id: entry_id,
            start: now,
            end: None,
            duration: None,
            cumulative: None,
        })
    }

    /// Close the open entry of the active project.
    ///
    /// When `title` is given it must name the active project.
    pub fn stop(
        pool: &mut DbPool,
        title: Option<&str>,
        now: NaiveDateTime,
    ) -> AppResult<(Project, TimeLogEntry)> {
        let tx = pool.conn.transaction()?;

        let project = active_project(&tx)?.ok_or(AppError::NotTracking)?;
        if let Some(requested) = title
            && requested.trim() != project.title
        {
            return Err(AppError::NotActiveProject {
                requested: requested.to_string(),
                active: project.title,
            });
        }
        let table = checked_log_table(&tx, &project)?.to_string();

        let Some(mut entry) = open_entry(&tx, &table)? else {
            // flag without an open entry: clear it so tracking can resume
            set_active(&tx, project.id, false)?;
            ttlog(&tx, "repair", &project.title, "Cleared stale active flag")?;
            tx.commit()?;
            warning(format!(
                "No open time log found for '{}'; active flag cleared.",
                project.title
            ));
            return Err(AppError::NotTracking);
        };

        if now < entry.start {
            return Err(AppError::InvalidTime(format!(
                "stop time {} is before start time {}",
                format_timestamp(&now),
                format_timestamp(&entry.start)
            )));
        }

        let duration = (now - entry.start).num_seconds();
        let cumulative = closed_seconds_before(&tx, &table, entry.id)? + duration;

        close_entry(&tx, &table, entry.id, &now, duration, cumulative)?;
        set_active(&tx, project.id, false)?;
        ttlog(
            &tx,
            "stop",
            &project.title,
            &format!(
                "Tracking stopped at {} after {}",
                format_timestamp(&now),
                secs2clock(duration)
            ),
        )?;

        tx.commit()?;

        entry.end = Some(now);
        entry.duration = Some(duration);
        entry.cumulative = Some(cumulative);

        let mut project = project;
        project.active = false;
        Ok((project, entry))
    }

    /// The running project, if any.
    pub fn status(pool: &DbPool, now: NaiveDateTime) -> AppResult<TrackStatus> {
        let Some(project) = active_project(&pool.conn)? else {
            return Ok(TrackStatus::Idle);
        };
        let table = checked_log_table(&pool.conn, &project)?;

        Ok(match open_entry(&pool.conn, table)? {
            Some(entry) => TrackStatus::Running(RunningStatus {
                elapsed_secs: entry.elapsed_secs(now),
                project,
                entry,
            }),
            None => TrackStatus::Stale(project),
        })
    }
}
