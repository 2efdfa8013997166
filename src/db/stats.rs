use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::db::queries::{count_open_entries, entry_totals, list_projects, table_exists};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::secs2readable;
use std::fs;
use std::path::Path;

pub fn print_db_info(pool: &mut DbPool, db_path: &Path) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!(
        "{}• File:{} {}{}{}",
        CYAN,
        RESET,
        YELLOW,
        db_path.display(),
        RESET
    );
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    let versions = applied_versions(&pool.conn)?;
    let schema = versions
        .last()
        .cloned()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    println!(
        "{}• Schema:{} {} ({} migration(s) applied)",
        CYAN,
        RESET,
        schema,
        versions.len()
    );

    //
    // 2) PROJECTS / ENTRIES
    //
    let projects = list_projects(&pool.conn)?;
    let mut entries = 0;
    let mut total_secs = 0;
    for p in &projects {
        if table_exists(&pool.conn, &p.log_table)? {
            let (count, secs) = entry_totals(&pool.conn, &p.log_table)?;
            entries += count;
            total_secs += secs;
        }
    }

    println!(
        "{}• Projects:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        projects.len(),
        RESET
    );
    println!("{}• Log entries:{} {}{}{}", CYAN, RESET, GREEN, entries, RESET);
    println!(
        "{}• Tracked time:{} {}",
        CYAN,
        RESET,
        secs2readable(total_secs)
    );

    //
    // 3) ACTIVE PROJECT
    //
    let active = projects
        .iter()
        .find(|p| p.active)
        .map(|p| p.title.clone())
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    println!("{}• Running:{} {}", CYAN, RESET, active);

    println!();
    Ok(())
}

/// Projects whose active flag disagrees with their log table.
pub fn consistency_issues(pool: &mut DbPool) -> AppResult<Vec<String>> {
    let mut issues = Vec::new();

    for p in list_projects(&pool.conn)? {
        if !table_exists(&pool.conn, &p.log_table)? {
            issues.push(format!("'{}': log table {} is missing", p.title, p.log_table));
            continue;
        }

        let open = count_open_entries(&pool.conn, &p.log_table)?;
        match (p.active, open) {
            (true, 0) => issues.push(format!("'{}': marked running but has no open entry", p.title)),
            (false, n) if n > 0 => issues.push(format!(
                "'{}': has {n} open entr{} but is not marked running",
                p.title,
                if n == 1 { "y" } else { "ies" }
            )),
            (true, n) if n > 1 => issues.push(format!("'{}': has {n} open entries", p.title)),
            _ => {}
        }
    }

    Ok(issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::{insert_open_entry, insert_project};
    use crate::utils::time::parse_user_timestamp;

    #[test]
    fn reports_open_entry_on_idle_project() {
        let mut pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        let now = parse_user_timestamp("2025-01-01 10:00").unwrap();
        let p = insert_project(&pool.conn, "Alpha", "", &now).unwrap();
        assert!(consistency_issues(&mut pool).unwrap().is_empty());

        insert_open_entry(&pool.conn, &p.log_table, &now).unwrap();
        let issues = consistency_issues(&mut pool).unwrap();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("not marked running"));
    }
}
