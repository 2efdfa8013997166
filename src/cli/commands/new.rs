use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::project::ProjectLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::{format_timestamp, resolve_at};

/// Handle the `new` command ("Start Project" when `--start` is given)
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::New {
        title,
        details,
        start,
        at,
    } = cmd
    {
        let now = resolve_at(at.as_ref())?;
        let mut pool = DbPool::open(&cfg.database_path())?;

        if *start {
            let (project, entry) = ProjectLogic::create_and_start(&mut pool, title, details, now)?;
            println!("📁 Project '{}' created (id {}).", project.title, project.id);
            println!(
                "⏱️  Tracking '{}' since {}",
                project.title,
                format_timestamp(&entry.start)
            );
        } else {
            let project = ProjectLogic::create(&mut pool, title, details, now)?;
            println!("📁 Project '{}' created (id {}).", project.title, project.id);
        }

        success("Done.");
    }
    Ok(())
}
