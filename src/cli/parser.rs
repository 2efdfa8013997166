use crate::config::Config;
use crate::export::ExportFormat;
use crate::utils::path::expand_tilde;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for rTimeTracker
/// CLI application to track time spent on projects with SQLite
#[derive(Parser)]
#[command(
    name = "rtimetracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple project time tracker: start/stop timers, list and export logs using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db", value_name = "FILE")]
    pub db: Option<String>,

    /// Override configuration file path
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration file in use: `--config` or the default location.
    pub fn config_path(&self) -> PathBuf {
        match &self.config {
            Some(p) => expand_tilde(p),
            None => Config::config_file(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init {
        #[arg(
            long = "dir",
            value_name = "FOLDER",
            help = "Folder for the database file (prompted for when omitted)"
        )]
        dir: Option<String>,
    },

    /// Create a new project
    New {
        /// Project title (must be unique)
        title: String,

        #[arg(long, short = 'd', default_value = "", help = "Free text project details")]
        details: String,

        #[arg(long, short = 's', help = "Start tracking the new project right away")]
        start: bool,

        #[arg(
            long,
            value_name = "TIMESTAMP",
            help = "Use this time instead of now (YYYY-MM-DD HH:MM[:SS])"
        )]
        at: Option<String>,
    },

    /// Start tracking time on an existing project
    Start {
        /// Project title
        title: String,

        #[arg(
            long,
            value_name = "TIMESTAMP",
            help = "Use this time instead of now (YYYY-MM-DD HH:MM[:SS])"
        )]
        at: Option<String>,
    },

    /// Stop the running project
    Stop {
        /// Project title; must match the running project when given
        title: Option<String>,

        #[arg(
            long,
            value_name = "TIMESTAMP",
            help = "Use this time instead of now (YYYY-MM-DD HH:MM[:SS])"
        )]
        at: Option<String>,
    },

    /// Show the running project, if any
    Status,

    /// List projects with their tracked time
    Projects {
        #[arg(long, short = 'a', help = "Only projects that can be started")]
        available: bool,
    },

    /// List time log entries
    List {
        #[arg(long, short = 'p', value_name = "TITLE", help = "Only entries of this project")]
        project: Option<String>,

        #[arg(
            long,
            value_name = "PERIOD",
            help = "Filter by year/month/day or a custom range (YYYY, YYYY-MM, YYYY-MM-DD, A:B)"
        )]
        period: Option<String>,
    },

    /// Export time log entries
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute path of the output file")]
        file: String,

        #[arg(long, short = 'p', value_name = "TITLE", help = "Only entries of this project")]
        project: Option<String>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(
            long,
            short = 'e',
            value_name = "IDS",
            value_delimiter = ',',
            requires = "project",
            help = "Export only these entry ids of --project (comma separated)"
        )]
        entries: Option<Vec<i64>>,

        #[arg(long, short = 'f', help = "Overwrite the output file without asking")]
        force: bool,
    },

    /// List the export formats supported by this build
    Formats,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Compress the copy into a .zip archive")]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite the destination without asking")]
        force: bool,
    },
}
