use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{TestEnv, rtt, seed};

#[test]
fn test_new_project_is_listed() {
    let env = TestEnv::new("new_project");
    env.init();

    env.cmd()
        .args(["new", "Website", "--details", "landing page"])
        .assert()
        .success()
        .stdout(contains("Project 'Website' created"));

    env.cmd()
        .args(["projects"])
        .assert()
        .success()
        .stdout(contains("Website"))
        .stdout(contains("landing page"))
        .stdout(contains("idle"));

    // exactly one project row and one empty log table
    let conn = rusqlite::Connection::open(&env.db).unwrap();
    let projects: i64 = conn
        .query_row("SELECT COUNT(*) FROM projects", [], |r| r.get(0))
        .unwrap();
    assert_eq!(projects, 1);
    let entries: i64 = conn
        .query_row("SELECT COUNT(*) FROM \"project_log_1\"", [], |r| r.get(0))
        .unwrap();
    assert_eq!(entries, 0);
}

#[test]
fn test_duplicate_and_empty_titles_are_rejected() {
    let env = TestEnv::new("duplicate_title");
    env.init();
    env.run(&["new", "Alpha"]);

    env.cmd()
        .args(["new", "  Alpha "])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    env.cmd()
        .args(["new", "   "])
        .assert()
        .failure()
        .stderr(contains("Input error"));
}

#[test]
fn test_start_stop_status_cycle() {
    let env = TestEnv::new("start_stop");
    env.init();
    env.run(&["new", "Alpha", "--details", "a fairly long description"]);

    env.cmd()
        .args(["status"])
        .assert()
        .success()
        .stdout(contains("No project running"));

    env.cmd()
        .args(["start", "Alpha", "--at", "2025-05-01 09:00"])
        .assert()
        .success()
        .stdout(contains("Tracking 'Alpha' since 2025-05-01 09:00:00"));

    env.cmd()
        .args(["status"])
        .assert()
        .success()
        .stdout(contains("Alpha"))
        .stdout(contains("a fairly long description"))
        .stdout(contains("2025-05-01 09:00:00"));

    env.cmd()
        .args(["projects", "--available"])
        .assert()
        .success()
        .stdout(contains("Alpha").not());

    env.cmd()
        .args(["stop", "--at", "2025-05-01 10:15:30"])
        .assert()
        .success()
        .stdout(contains("duration 01:15:30"));

    env.cmd()
        .args(["status"])
        .assert()
        .success()
        .stdout(contains("No project running"));

    let conn = rusqlite::Connection::open(&env.db).unwrap();
    let (end, active): (Option<String>, i64) = conn
        .query_row(
            "SELECT l.end_time, p.active FROM \"project_log_1\" l, projects p WHERE p.id = 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(end.as_deref(), Some("2025-05-01 10:15:30"));
    assert_eq!(active, 0);
}

#[test]
fn test_second_start_is_rejected() {
    let env = TestEnv::new("double_start");
    env.init();
    env.run(&["new", "Alpha"]);
    env.run(&["new", "Beta"]);
    env.run(&["start", "Alpha", "--at", "2025-05-01 09:00"]);

    env.cmd()
        .args(["start", "Alpha", "--at", "2025-05-01 09:10"])
        .assert()
        .failure()
        .stderr(contains("already being tracked"));

    env.cmd()
        .args(["start", "Beta", "--at", "2025-05-01 09:10"])
        .assert()
        .failure()
        .stderr(contains("'Alpha' is already being tracked"));

    let conn = rusqlite::Connection::open(&env.db).unwrap();
    let open: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM \"project_log_1\" WHERE end_time IS NULL",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(open, 1);
}

#[test]
fn test_stop_errors() {
    let env = TestEnv::new("stop_errors");
    env.init();
    env.run(&["new", "Alpha"]);
    env.run(&["new", "Beta"]);

    env.cmd()
        .args(["stop"])
        .assert()
        .failure()
        .stderr(contains("No project is currently running"));

    env.run(&["start", "Alpha", "--at", "2025-05-01 09:00"]);

    env.cmd()
        .args(["stop", "Beta"])
        .assert()
        .failure()
        .stderr(contains("active project: 'Alpha'"));

    env.cmd()
        .args(["stop", "--at", "2025-05-01 08:00"])
        .assert()
        .failure()
        .stderr(contains("before start time"));
}

#[test]
fn test_new_with_start_tracks_immediately() {
    let env = TestEnv::new("new_start");
    env.init();

    env.cmd()
        .args(["new", "Quick", "--start", "--at", "2025-06-01 12:00"])
        .assert()
        .success()
        .stdout(contains("Tracking 'Quick' since 2025-06-01 12:00:00"));

    env.cmd()
        .args(["projects"])
        .assert()
        .success()
        .stdout(contains("running"));
}

#[test]
fn test_new_with_start_is_rejected_while_another_runs() {
    let env = TestEnv::new("new_start_busy");
    env.init();
    env.run(&["new", "Alpha", "--start", "--at", "2025-06-01 09:00"]);

    env.cmd()
        .args(["new", "Beta", "--start", "--at", "2025-06-01 10:00"])
        .assert()
        .failure()
        .stderr(contains("'Alpha' is already being tracked"));

    env.cmd()
        .args(["projects"])
        .assert()
        .success()
        .stdout(contains("Alpha"))
        .stdout(contains("Beta").not());

    // the title is still free
    env.run(&["new", "Beta"]);
}

#[test]
fn test_status_reports_stale_active_flag() {
    let env = TestEnv::new("status_stale");
    env.init();
    env.run(&["new", "Alpha"]);
    env.run(&["new", "Beta"]);

    // set the running flag behind the tool's back
    let conn = rusqlite::Connection::open(&env.db).unwrap();
    conn.execute("UPDATE projects SET active = 1 WHERE title = 'Alpha'", [])
        .unwrap();
    drop(conn);

    env.cmd()
        .args(["status"])
        .assert()
        .success()
        .stdout(contains("No project running"))
        .stdout(contains("'Alpha' is flagged as active"))
        .stdout(contains("db --check"));

    env.cmd().args(["stop"]).assert().failure();
    env.run(&["start", "Beta"]);
}

#[test]
fn test_list_records_and_total() {
    let env = TestEnv::new("list_all");
    seed(&env);

    env.cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("2025-01-10 09:00:00"))
        .stdout(contains("2025-01-20 09:00:00"))
        .stdout(contains("In Progress"))
        .stdout(contains("Gamma"))
        // 1h30 + 45m + 1h
        .stdout(contains("Total Project Time: 03h 15m 00s"));
}

#[test]
fn test_list_filters() {
    let env = TestEnv::new("list_filters");
    seed(&env);

    env.cmd()
        .args(["list", "--project", "Alpha"])
        .assert()
        .success()
        .stdout(contains("Beta").not())
        .stdout(contains("02:30:00"))
        .stdout(contains("Total Project Time: 02h 30m 00s"));

    env.cmd()
        .args(["list", "--period", "2025-01"])
        .assert()
        .success()
        .stdout(contains("2025-01-10 09:00:00"))
        .stdout(contains("2025-01-20 09:00:00"))
        .stdout(contains("2025-02-03").not())
        .stdout(contains("Gamma").not());

    env.cmd()
        .args(["list", "--period", "2025-02-01:2025-03-31"])
        .assert()
        .success()
        .stdout(contains("2025-02-03 14:00:00"))
        .stdout(contains("2025-03-01 08:00:00"))
        .stdout(contains("2025-01-10").not());

    env.cmd()
        .args(["list", "--period", "2025-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid period"));

    env.cmd()
        .args(["list", "--project", "Nope"])
        .assert()
        .failure()
        .stderr(contains("Project not found"));
}

#[test]
fn test_missing_database_is_storage_error() {
    let env = TestEnv::new("missing_db");

    env.cmd()
        .args(["--test", "projects"])
        .assert()
        .failure()
        .stderr(contains("Storage error"))
        .stderr(contains("Database not found"));

    assert!(!Path::new(&env.db).exists());
}

#[test]
fn test_default_config_created_when_missing() {
    let env = TestEnv::new("default_config");
    assert!(!Path::new(&env.config).exists());

    env.cmd().args(["formats"]).assert().success();

    let text = fs::read_to_string(&env.config).unwrap();
    let cfg: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(cfg["styles"]["header_background"], "#2F75B5");
    assert_eq!(cfg["preferences"]["pdf_orientation"], "landscape");
}

#[test]
fn test_malformed_config_is_config_error() {
    let env = TestEnv::new("bad_config");
    fs::write(&env.config, "{ not json").unwrap();

    env.cmd()
        .args(["formats"])
        .assert()
        .failure()
        .stderr(contains("Configuration error"));
}

#[test]
fn test_config_check_adds_missing_keys() {
    let env = TestEnv::new("config_check");
    fs::write(&env.config, r##"{ "styles": { "grid_color": "#000000" } }"##).unwrap();

    env.cmd()
        .args(["config", "--check"])
        .assert()
        .success()
        .stdout(contains("missing key(s) added"));

    let cfg: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&env.config).unwrap()).unwrap();
    assert_eq!(cfg["styles"]["grid_color"], "#000000");
    assert_eq!(cfg["styles"]["row_background"], "#FFFFFF");
    assert_eq!(cfg["preferences"]["enable_notifications"], true);

    env.cmd()
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("\"grid_color\": \"#000000\""));
}

#[test]
fn test_init_writes_database_into_config() {
    let env = TestEnv::new("init_dir");
    let folder = env.dir.join("data");

    rtt()
        .args(["--config", &env.config, "init", "--dir"])
        .arg(&folder)
        .assert()
        .success();

    let db = folder.join("projects.db");
    assert!(db.exists());

    let cfg: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&env.config).unwrap()).unwrap();
    assert_eq!(cfg["database"], db.to_string_lossy().to_string());

    // later commands pick the database up from the configuration
    rtt()
        .args(["--config", &env.config, "new", "FromConfig"])
        .assert()
        .success();
}

#[test]
fn test_db_check_and_info() {
    let env = TestEnv::new("db_check");
    seed(&env);

    env.cmd()
        .args(["db", "--check", "--info"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"))
        .stdout(contains("Active flags consistent"))
        .stdout(contains("Projects:"))
        .stdout(contains("Schema:"))
        .stdout(contains("20250101_0002_single_active_project"))
        .stdout(contains("2 migration(s) applied"));

    // clear the running flag behind the tool's back
    let conn = rusqlite::Connection::open(&env.db).unwrap();
    conn.execute("UPDATE projects SET active = 0 WHERE title = 'Alpha'", [])
        .unwrap();
    drop(conn);

    env.cmd()
        .args(["db", "--check"])
        .assert()
        .success()
        .stdout(contains("not marked running"));
}

#[test]
fn test_log_print_shows_operations() {
    let env = TestEnv::new("log_print");
    seed(&env);

    env.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("Alpha"))
        .stdout(contains("stop"));
}

#[test]
fn test_backup_plain_and_compressed() {
    let env = TestEnv::new("backup");
    seed(&env);

    let plain = env.out("copy.db");
    env.cmd()
        .args(["backup", "--file", &plain])
        .assert()
        .success()
        .stdout(contains("Backup written"));
    assert!(Path::new(&plain).exists());

    let zipped = env.out("archive.db");
    env.cmd()
        .args(["backup", "--file", &zipped, "--compress"])
        .assert()
        .success();
    assert!(!Path::new(&zipped).exists());
    assert!(env.dir.join("archive.zip").exists());

    let named_zip = env.out("named.zip");
    env.cmd()
        .args(["backup", "--file", &named_zip, "--compress"])
        .assert()
        .success();
    let archive = zip::ZipArchive::new(fs::File::open(&named_zip).unwrap()).unwrap();
    assert_eq!(archive.len(), 1);
}

#[test]
fn test_formats_lists_writers() {
    let env = TestEnv::new("formats");

    env.cmd()
        .args(["--test", "formats"])
        .assert()
        .success()
        .stdout(contains("csv"))
        .stdout(contains("json"))
        .stdout(contains("xlsx"))
        .stdout(contains("pdf"));
}
