use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let db_path = cfg.database_path();
        let mut pool = DbPool::open(&db_path)?;
        let out = BackupLogic::backup(&mut pool, &db_path, &expand_tilde(file), *compress, *force)?;
        println!("💾 Backup written to {}", out.display());
    }

    Ok(())
}
