use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::tracking::TrackLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::optional_clock;
use crate::utils::time::{format_timestamp, resolve_at};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stop { title, at } = cmd {
        let now = resolve_at(at.as_ref())?;
        let mut pool = DbPool::open(&cfg.database_path())?;

        let (project, entry) = TrackLogic::stop(&mut pool, title.as_deref(), now)?;
        println!(
            "⏹️  Stopped '{}' at {}: duration {}, total {}",
            project.title,
            format_timestamp(&now),
            optional_clock(entry.duration),
            optional_clock(entry.cumulative)
        );
    }
    Ok(())
}
