use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension};

/// A forward-only schema step, recorded in `log` once applied.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250101_0001_create_projects",
        description: "Created projects master table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS projects (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            title       TEXT NOT NULL UNIQUE,
            details     TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL,
            active      INTEGER NOT NULL DEFAULT 0 CHECK(active IN (0, 1)),
            log_table   TEXT NOT NULL UNIQUE
        );
        "#,
    },
    Migration {
        version: "20250101_0002_single_active_project",
        description: "Added unique index allowing one active project",
        sql: r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_projects_single_active
            ON projects(active) WHERE active = 1;
        "#,
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    conn.execute_batch(&format!("BEGIN;\n{}\nCOMMIT;", m.sql))
        .map_err(|e| {
            let _ = conn.execute_batch("ROLLBACK;");
            AppError::Migration(format!("{}: {e}", m.version))
        })?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        [Local::now().to_rfc3339().as_str(), m.version, m.description],
    )?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Returns the number of migrations applied.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
            applied += 1;
        }
    }
    Ok(applied)
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
