//! SQL for the `projects` master table and the per-project log tables.
//!
//! Log table names are built from the numeric project id and validated
//! before being interpolated into a statement; nothing derived from user
//! input ever reaches the SQL text.

use crate::errors::{AppError, AppResult};
use crate::models::project::Project;
use crate::models::time_entry::TimeLogEntry;
use crate::utils::time::{format_timestamp, parse_timestamp};
use chrono::NaiveDateTime;
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::sync::OnceLock;

const LOG_TABLE_PREFIX: &str = "project_log_";

pub fn log_table_name(project_id: i64) -> String {
    format!("{LOG_TABLE_PREFIX}{project_id}")
}

fn table_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^project_log_[0-9]+$").expect("static regex"))
}

pub fn validate_table_name(name: &str) -> AppResult<&str> {
    if table_name_re().is_match(name) {
        Ok(name)
    } else {
        Err(AppError::InvalidTableName(name.to_string()))
    }
}

fn to_sql_err(col: usize, raw: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        col,
        rusqlite::types::Type::Text,
        Box::new(AppError::InvalidTime(raw.to_string())),
    )
}

fn get_ts(row: &Row, col: &str) -> Result<NaiveDateTime> {
    let raw: String = row.get(col)?;
    parse_timestamp(&raw).ok_or_else(|| to_sql_err(0, &raw))
}

fn get_opt_ts(row: &Row, col: &str) -> Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.get(col)?;
    match raw {
        None => Ok(None),
        Some(s) => parse_timestamp(&s).map(Some).ok_or_else(|| to_sql_err(0, &s)),
    }
}

pub fn map_project(row: &Row) -> Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        title: row.get("title")?,
        details: row.get("details")?,
        created_at: get_ts(row, "created_at")?,
        active: row.get::<_, i32>("active")? == 1,
        log_table: row.get("log_table")?,
    })
}

pub fn map_entry(row: &Row) -> Result<TimeLogEntry> {
    Ok(TimeLogEntry {
        id: row.get("id")?,
        start: get_ts(row, "start_time")?,
        end: get_opt_ts(row, "end_time")?,
        duration: row.get("duration")?,
        cumulative: row.get("cumulative")?,
    })
}

// ---------------------------------------------------------------------------
// projects
// ---------------------------------------------------------------------------

/// Insert the project row and create its empty log table.
/// Callers run this inside a transaction.
pub fn insert_project(
    conn: &Connection,
    title: &str,
    details: &str,
    created_at: &NaiveDateTime,
) -> AppResult<Project> {
    conn.execute(
        "INSERT INTO projects (title, details, created_at, active, log_table)
         VALUES (?1, ?2, ?3, 0, ?4)",
        params![
            title,
            details,
            format_timestamp(created_at),
            format!("pending:{title}")
        ],
    )?;
    let id = conn.last_insert_rowid();
    let table = log_table_name(id);

    conn.execute(
        "UPDATE projects SET log_table = ?1 WHERE id = ?2",
        params![table, id],
    )?;
    create_log_table(conn, &table)?;

    find_project_by_id(conn, id)?.ok_or_else(|| AppError::ProjectNotFound(title.to_string()))
}

pub fn find_project_by_title(conn: &Connection, title: &str) -> AppResult<Option<Project>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM projects WHERE title = ?1")?;
    Ok(stmt.query_row([title], map_project).optional()?)
}

pub fn find_project_by_id(conn: &Connection, id: i64) -> AppResult<Option<Project>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM projects WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_project).optional()?)
}

pub fn active_project(conn: &Connection) -> AppResult<Option<Project>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM projects WHERE active = 1 LIMIT 1")?;
    Ok(stmt.query_row([], map_project).optional()?)
}

/// All projects ordered by title.
pub fn list_projects(conn: &Connection) -> AppResult<Vec<Project>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM projects ORDER BY title ASC")?;
    let rows = stmt.query_map([], map_project)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn set_active(conn: &Connection, project_id: i64, active: bool) -> AppResult<()> {
    conn.execute(
        "UPDATE projects SET active = ?1 WHERE id = ?2",
        params![if active { 1 } else { 0 }, project_id],
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// per-project log tables
// ---------------------------------------------------------------------------

pub fn create_log_table(conn: &Connection, table: &str) -> AppResult<()> {
    let table = validate_table_name(table)?;
    conn.execute_batch(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS "{table}" (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            start_time  TEXT NOT NULL,
            end_time    TEXT,
            duration    INTEGER,
            cumulative  INTEGER
        );
        "#
    ))?;
    Ok(())
}

pub fn table_exists(conn: &Connection, table: &str) -> AppResult<bool> {
    let mut stmt =
        conn.prepare_cached("SELECT name FROM sqlite_master WHERE type='table' AND name = ?1")?;
    let found: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(found.is_some())
}

/// Validated name of the project's log table, failing when it is missing.
pub fn checked_log_table<'a>(conn: &Connection, project: &'a Project) -> AppResult<&'a str> {
    let table = validate_table_name(&project.log_table)?;
    if !table_exists(conn, table)? {
        return Err(AppError::LogTableMissing(project.title.clone()));
    }
    Ok(table)
}

pub fn insert_open_entry(conn: &Connection, table: &str, start: &NaiveDateTime) -> AppResult<i64> {
    let table = validate_table_name(table)?;
    conn.execute(
        &format!(r#"INSERT INTO "{table}" (start_time) VALUES (?1)"#),
        [format_timestamp(start)],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Newest entry without an end time.
pub fn open_entry(conn: &Connection, table: &str) -> AppResult<Option<TimeLogEntry>> {
    let table = validate_table_name(table)?;
    let mut stmt = conn.prepare(&format!(
        r#"SELECT * FROM "{table}" WHERE end_time IS NULL ORDER BY id DESC LIMIT 1"#
    ))?;
    Ok(stmt.query_row([], map_entry).optional()?)
}

pub fn count_open_entries(conn: &Connection, table: &str) -> AppResult<i64> {
    let table = validate_table_name(table)?;
    Ok(conn.query_row(
        &format!(r#"SELECT COUNT(*) FROM "{table}" WHERE end_time IS NULL"#),
        [],
        |row| row.get(0),
    )?)
}

/// Sum of the durations of closed entries older than `before_id`.
pub fn closed_seconds_before(conn: &Connection, table: &str, before_id: i64) -> AppResult<i64> {
    let table = validate_table_name(table)?;
    Ok(conn.query_row(
        &format!(
            r#"SELECT IFNULL(SUM(duration), 0) FROM "{table}"
               WHERE id < ?1 AND duration IS NOT NULL"#
        ),
        [before_id],
        |row| row.get(0),
    )?)
}

pub fn close_entry(
    conn: &Connection,
    table: &str,
    entry_id: i64,
    end: &NaiveDateTime,
    duration: i64,
    cumulative: i64,
) -> AppResult<()> {
    let table = validate_table_name(table)?;
    conn.execute(
        &format!(
            r#"UPDATE "{table}" SET end_time = ?1, duration = ?2, cumulative = ?3 WHERE id = ?4"#
        ),
        params![format_timestamp(end), duration, cumulative, entry_id],
    )?;
    Ok(())
}

/// All entries of a log table, oldest first.
pub fn load_entries(conn: &Connection, table: &str) -> AppResult<Vec<TimeLogEntry>> {
    let table = validate_table_name(table)?;
    let mut stmt = conn.prepare(&format!(r#"SELECT * FROM "{table}" ORDER BY id ASC"#))?;
    let rows = stmt.query_map([], map_entry)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// (entry count, closed seconds) of a log table.
pub fn entry_totals(conn: &Connection, table: &str) -> AppResult<(i64, i64)> {
    let table = validate_table_name(table)?;
    Ok(conn.query_row(
        &format!(r#"SELECT COUNT(*), IFNULL(SUM(duration), 0) FROM "{table}""#),
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?)
}
