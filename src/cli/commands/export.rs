use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportRequest};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        project,
        range,
        entries,
        force,
    } = cmd
    {
        let req = ExportRequest {
            format: *format,
            file: file.clone(),
            project: project.clone(),
            range: range.clone(),
            entries: entries.clone(),
            force: *force,
        };

        let mut pool = DbPool::open(&cfg.database_path())?;
        if let Some(summary) = ExportLogic::export(&mut pool, cfg, &req)? {
            println!(
                "📤 Exported {} row(s) as {} to {}",
                summary.rows,
                summary.format.as_str(),
                summary.path.display()
            );
        }
    }
    Ok(())
}
