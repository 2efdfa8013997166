use crate::config::Config;
use crate::core::tracking::{TrackLogic, TrackStatus};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::colors::{CYAN, GREY, RESET};
use crate::utils::formatting::{bold, secs2readable};
use crate::utils::time::{format_timestamp, now};

const DETAILS_WIDTH: usize = 72;

/// "Running Project" view
pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = DbPool::open(&cfg.database_path())?;

    let status = match TrackLogic::status(&pool, now())? {
        TrackStatus::Running(status) => status,
        TrackStatus::Idle => {
            println!("{GREY}No project running{RESET}");
            return Ok(());
        }
        TrackStatus::Stale(project) => {
            println!("{GREY}No project running{RESET}");
            warning(format!(
                "'{}' is flagged as active but has no open time log; other projects cannot start. \
                 Run `stop` to clear the flag or `db --check` to inspect.",
                project.title
            ));
            return Ok(());
        }
    };

    println!("{}▶ {}{}", CYAN, bold(&status.project.title), RESET);
    if !status.project.details.is_empty() {
        for line in textwrap::wrap(&status.project.details, DETAILS_WIDTH) {
            println!("  {line}");
        }
    }
    println!("  Started : {}", format_timestamp(&status.entry.start));
    println!("  Elapsed : {}", secs2readable(status.elapsed_secs));

    Ok(())
}
