use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::io::Read;
use std::path::Path;

mod common;
use common::{TestEnv, seed};

const STARTS: [&str; 4] = [
    "2025-01-10 09:00:00",
    "2025-01-20 09:00:00",
    "2025-02-03 14:00:00",
    "2025-03-01 08:00:00",
];

fn xlsx_row_count(path: &str) -> usize {
    let file = fs::File::open(path).expect("open xlsx");
    let mut archive = zip::ZipArchive::new(file).expect("xlsx is a zip");
    let mut sheet = String::new();
    archive
        .by_name("xl/worksheets/sheet1.xml")
        .expect("sheet1")
        .read_to_string(&mut sheet)
        .expect("read sheet");
    sheet.matches("<row ").count()
}

#[test]
fn test_export_xlsx_row_count_matches_entries() {
    let env = TestEnv::new("export_xlsx");
    seed(&env);

    let out = env.out("all.xlsx");
    env.cmd()
        .args(["export", "--format", "xlsx", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Exported 4 row(s) as xlsx"));

    // header + one row per entry, Gamma has no entries
    assert_eq!(xlsx_row_count(&out), 5);

    let alpha = env.out("alpha.xlsx");
    env.cmd()
        .args(["export", "--format", "xlsx", "--file", &alpha, "--project", "Alpha"])
        .assert()
        .success();
    assert_eq!(xlsx_row_count(&alpha), 4);
}

#[test]
fn test_export_pdf_contains_every_entry() {
    let env = TestEnv::new("export_pdf");
    seed(&env);

    let out = env.out("all.pdf");
    env.cmd()
        .args(["export", "--format", "pdf", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Exported 4 row(s) as pdf"));

    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));

    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("All Project Records"));
    for start in STARTS {
        assert_eq!(text.matches(start).count(), 1, "{start}");
    }
}

#[test]
fn test_export_pdf_selected_entries() {
    let env = TestEnv::new("export_pdf_selected");
    seed(&env);

    let out = env.out("selected.pdf");
    env.cmd()
        .args([
            "export", "--format", "pdf", "--file", &out, "--project", "Alpha", "--entries", "1,3",
        ])
        .assert()
        .success()
        .stdout(contains("Exported 2 row(s)"));

    let text = String::from_utf8_lossy(&fs::read(&out).unwrap()).to_string();
    assert!(text.contains("Selected Project Records"));
    assert!(text.contains("Project: Alpha"));
    assert!(text.contains("2025-01-10 09:00:00"));
    assert!(text.contains("2025-03-01 08:00:00"));
    assert!(!text.contains("2025-02-03 14:00:00"));
}

#[test]
fn test_export_csv_and_json() {
    let env = TestEnv::new("export_csv_json");
    seed(&env);

    let csv_out = env.out("all.csv");
    env.cmd()
        .args(["export", "--format", "csv", "--file", &csv_out])
        .assert()
        .success();

    let csv_text = fs::read_to_string(&csv_out).unwrap();
    let mut lines = csv_text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Project ID,Title,Details,Start Time,End Time,Duration,Cumulative Time"
    );
    assert_eq!(lines.count(), 4);
    assert!(csv_text.contains("In Progress"));

    let json_out = env.out("feb.json");
    env.cmd()
        .args(["export", "--format", "json", "--file", &json_out, "--range", "2025-02"])
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).unwrap()).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["Title"], "Alpha");
    assert_eq!(rows[0]["Duration"], "01:00:00");
    assert_eq!(rows[0]["Cumulative Time"], "02:30:00");
}

#[test]
fn test_export_existing_file_needs_confirmation() {
    let env = TestEnv::new("export_overwrite");
    seed(&env);

    let out = env.out("keep.csv");
    fs::write(&out, "original").unwrap();

    env.cmd()
        .args(["export", "--format", "csv", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "original");

    env.cmd()
        .args(["export", "--format", "csv", "--file", &out])
        .write_stdin("y\n")
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().starts_with("Project ID"));

    fs::write(&out, "original").unwrap();
    env.cmd()
        .args(["export", "--format", "csv", "--file", &out, "--force"])
        .assert()
        .success();
    assert_ne!(fs::read_to_string(&out).unwrap(), "original");
}

#[test]
fn test_export_rejections() {
    let env = TestEnv::new("export_rejections");
    seed(&env);

    env.cmd()
        .args(["export", "--format", "csv", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));

    let missing_dir = env.dir.join("nope").join("out.csv");
    env.cmd()
        .args(["export", "--format", "csv", "--file"])
        .arg(&missing_dir)
        .assert()
        .failure()
        .stderr(contains("Export error"));

    env.cmd()
        .args(["export", "--file", "/tmp/x.csv", "--entries", "1"])
        .assert()
        .failure();
}

#[test]
fn test_export_empty_selection_writes_nothing() {
    let env = TestEnv::new("export_empty");
    seed(&env);

    let out = env.out("empty.xlsx");
    env.cmd()
        .args(["export", "--format", "xlsx", "--file", &out, "--range", "2030"])
        .assert()
        .success()
        .stdout(contains("nothing exported"))
        .stdout(contains("Exported").not());

    assert!(!Path::new(&out).exists());
}

#[test]
fn test_export_to_a_directory_is_an_export_error() {
    let env = TestEnv::new("export_dir_target");
    seed(&env);

    let target = env.dir.join("taken");
    fs::create_dir_all(&target).unwrap();

    for format in ["csv", "json", "xlsx", "pdf"] {
        env.cmd()
            .args(["export", "--format", format, "--force", "--file"])
            .arg(&target)
            .assert()
            .failure()
            .stderr(contains("Export error"))
            .stderr(contains("Storage error").not());
    }
}
