use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::project::ProjectLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::secs2readable;
use crate::utils::table::Table;
use crate::utils::time::format_timestamp;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Projects { available } = cmd {
        let pool = DbPool::open(&cfg.database_path())?;
        let projects = ProjectLogic::list(&pool, *available)?;

        if projects.is_empty() {
            println!(
                "{}",
                if *available {
                    "No projects available to start."
                } else {
                    "No projects yet. Create one with `rtimetracker new <TITLE>`."
                }
            );
            return Ok(());
        }

        let mut table = Table::new(&["ID", "Title", "Details", "Created", "Status", "Entries", "Total"]);
        for s in &projects {
            table.add_row(vec![
                s.project.id.to_string(),
                s.project.title.clone(),
                s.project.details.clone(),
                format_timestamp(&s.project.created_at),
                s.project.status_label().to_string(),
                s.entries.to_string(),
                secs2readable(s.total_secs),
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
