#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rtt() -> Command {
    cargo_bin_cmd!("rtimetracker")
}

/// Per-test database, configuration file and output folder under the
/// system temp dir. Everything is wiped when the env is created.
pub struct TestEnv {
    pub dir: PathBuf,
    pub db: String,
    pub config: String,
}

impl TestEnv {
    pub fn new(name: &str) -> Self {
        let dir = env::temp_dir().join(format!("rtimetracker_it_{name}"));
        fs::remove_dir_all(&dir).ok();
        fs::create_dir_all(&dir).expect("create test dir");

        Self {
            db: dir.join("projects.db").to_string_lossy().to_string(),
            config: dir.join("config.json").to_string_lossy().to_string(),
            dir,
        }
    }

    /// Command with `--db` and `--config` pointing into this env.
    pub fn cmd(&self) -> Command {
        let mut cmd = rtt();
        cmd.args(["--db", &self.db, "--config", &self.config]);
        cmd
    }

    /// Create the schema without touching the configuration file.
    pub fn init(&self) {
        self.cmd().args(["--test", "init"]).assert().success();
    }

    pub fn run(&self, args: &[&str]) {
        self.cmd().args(args).assert().success();
    }

    /// Absolute path of an output file inside the env folder.
    pub fn out(&self, file: &str) -> String {
        let p = self.dir.join(file);
        fs::remove_file(&p).ok();
        p.to_string_lossy().to_string()
    }
}

/// Two projects, three closed entries and one running:
///
/// - Alpha: 2025-01-10 09:00-10:30, 2025-02-03 14:00-15:00, running since 2025-03-01 08:00
/// - Beta:  2025-01-20 09:00-09:45
/// - Gamma: no entries
pub fn seed(env: &TestEnv) {
    env.init();
    env.run(&["new", "Alpha", "--details", "first project"]);
    env.run(&["new", "Beta"]);
    env.run(&["new", "Gamma", "--details", "never tracked"]);

    env.run(&["start", "Alpha", "--at", "2025-01-10 09:00"]);
    env.run(&["stop", "--at", "2025-01-10 10:30"]);
    env.run(&["start", "Beta", "--at", "2025-01-20 09:00"]);
    env.run(&["stop", "--at", "2025-01-20 09:45"]);
    env.run(&["start", "Alpha", "--at", "2025-02-03 14:00"]);
    env.run(&["stop", "Alpha", "--at", "2025-02-03 15:00"]);
    env.run(&["start", "Alpha", "--at", "2025-03-01 08:00"]);
}
