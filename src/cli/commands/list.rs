use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::records::{RecordFilter, RecordsLogic};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::colorize_optional;
use crate::utils::period::Period;
use crate::utils::secs2readable;
use crate::utils::table::Table;

/// "All Records" view
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { project, period } = cmd {
        let filter = RecordFilter {
            project: project.clone(),
            period: period.as_deref().map(Period::parse).transpose()?,
            entries: None,
            include_empty_projects: true,
        };

        let pool = DbPool::open(&cfg.database_path())?;
        let records = RecordsLogic::load(&pool, &filter)?;

        if records.is_empty() {
            match period {
                Some(p) => println!("No time log entries {}.", Period::describe(p)),
                None => println!("No projects yet."),
            }
            return Ok(());
        }

        let mut table = Table::new(&[
            "Project ID",
            "Title",
            "Details",
            "#",
            "Start Time",
            "End Time",
            "Duration",
            "Cumulative Time",
        ]);
        for r in &records {
            table.add_row(vec![
                r.project_id.to_string(),
                r.title.clone(),
                r.details.clone(),
                r.entry_id().map(|id| id.to_string()).unwrap_or_default(),
                r.start_str(),
                r.end_str(),
                r.duration_str(),
                r.cumulative_str(),
            ]);
        }

        // color placeholders after padding so widths stay right
        for line in table.render().lines() {
            println!("{}", colorize_line(line));
        }

        println!(
            "\nTotal Project Time: {}",
            secs2readable(RecordsLogic::total_secs(&records))
        );
    }
    Ok(())
}

fn colorize_line(line: &str) -> String {
    line.split(" | ")
        .map(|cell| {
            let trimmed = cell.trim_end();
            let pad = &cell[trimmed.len()..];
            if trimmed == "N/A" || trimmed == "In Progress" {
                format!("{}{pad}", colorize_optional(trimmed))
            } else {
                cell.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
