use crate::cli::parser::Cli;
use crate::config::{Config, DATABASE_FILE_NAME};
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::path::expand_tilde;
use std::io::{self, Write};
use std::path::PathBuf;

/// Handle the `init` command
///
/// This initializes:
///  - the database location (`--db`, `--dir`, or asked on stdin)
///  - the SQLite database and all pending migrations
///  - the configuration file pointing at it (skipped in test mode)
pub fn handle(cli: &Cli, dir: Option<&str>, cfg: &Config) -> AppResult<()> {
    let db_path = match (&cli.db, dir) {
        (Some(db), _) => expand_tilde(db),
        (None, Some(d)) => expand_tilde(d).join(DATABASE_FILE_NAME),
        (None, None) => prompt_db_folder(&Config::config_dir())?.join(DATABASE_FILE_NAME),
    };
    let config_path = cli.config_path();

    println!("⚙️  Initializing rTimeTracker…");
    println!("📄 Config file : {}", config_path.display());
    println!("🗄️  Database   : {}", db_path.display());

    let pool = DbPool::create(&db_path)?;
    init_db(&pool.conn)?;
    println!("✅ Database initialized at {}", db_path.display());

    // internal log, non blocking
    if let Err(e) = ttlog(
        &pool.conn,
        "init",
        &db_path.to_string_lossy(),
        "Database initialized",
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    if !cli.test {
        let mut updated = cfg.clone();
        updated.database = db_path.to_string_lossy().to_string();
        updated.save(&config_path)?;
    }

    success("rTimeTracker initialization completed!");
    Ok(())
}

/// Ask for the database folder; an empty answer keeps `default`.
fn prompt_db_folder(default: &std::path::Path) -> AppResult<PathBuf> {
    print!("Database folder [{}]: ", default.display());
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(folder_or_default(&answer, default))
}

fn folder_or_default(answer: &str, default: &std::path::Path) -> PathBuf {
    match answer.trim() {
        "" => default.to_path_buf(),
        folder => expand_tilde(folder),
    }
}
