//! Unified application error type.
//! All modules (db, core, export, config, cli) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

/// Broad classification used when an error is surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Storage,
    Export,
    Config,
    Input,
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Storage => "Storage error",
            ErrorKind::Export => "Export error",
            ErrorKind::Config => "Configuration error",
            ErrorKind::Input => "Input error",
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database not found: {0} (run `rtimetracker init` first)")]
    DatabaseNotFound(String),

    #[error("Log table missing for project '{0}'")]
    LogTableMissing(String),

    #[error("Invalid log table name: {0}")]
    InvalidTableName(String),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Tracking logic
    // ---------------------------
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("A project titled '{0}' already exists")]
    DuplicateProject(String),

    #[error("Project '{0}' is already being tracked")]
    AlreadyTracking(String),

    #[error("No project is currently running")]
    NotTracking,

    #[error("Project '{requested}' is not running (active project: '{active}')")]
    NotActiveProject { requested: String, active: String },

    // ---------------------------
    // Parsing / validation
    // ---------------------------
    #[error("Invalid project title: {0}")]
    InvalidTitle(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("{0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("{0}")]
    Export(String),

    #[error("Cancelled: existing file '{0}' not overwritten")]
    OverwriteDeclined(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Io(_)
            | AppError::Db(_)
            | AppError::DatabaseNotFound(_)
            | AppError::LogTableMissing(_)
            | AppError::InvalidTableName(_)
            | AppError::Migration(_) => ErrorKind::Storage,

            AppError::Export(_) => ErrorKind::Export,

            AppError::Config(_) => ErrorKind::Config,

            AppError::ProjectNotFound(_)
            | AppError::DuplicateProject(_)
            | AppError::AlreadyTracking(_)
            | AppError::NotTracking
            | AppError::NotActiveProject { .. }
            | AppError::InvalidTitle(_)
            | AppError::InvalidTime(_)
            | AppError::InvalidPeriod(_)
            | AppError::InvalidArgument(_)
            | AppError::OverwriteDeclined(_) => ErrorKind::Input,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
