use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::tracking::TrackLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::time::{format_timestamp, resolve_at};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start { title, at } = cmd {
        let now = resolve_at(at.as_ref())?;
        let mut pool = DbPool::open(&cfg.database_path())?;

        let entry = TrackLogic::start(&mut pool, title, now)?;
        println!(
            "⏱️  Tracking '{}' since {} (entry #{})",
            title.trim(),
            format_timestamp(&entry.start),
            entry.id
        );
    }
    Ok(())
}
