// src/export/mod.rs

#[cfg(feature = "xlsx")]
mod excel_date;
pub(crate) mod fs_utils;
mod json_csv;
pub mod logic;
mod model;
#[cfg(feature = "pdf")]
mod pdf;
#[cfg(feature = "pdf")]
mod pdf_export;
#[cfg(feature = "xlsx")]
mod xlsx;

pub use logic::{ExportLogic, ExportRequest};
pub use model::RecordExport;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// Helper comune per messaggi di completamento export.
pub(crate) fn notify_export_success(label: &str, path: &Path, rows: usize) {
    success(format!(
        "{label} export completed: {} ({rows} row{})",
        path.display(),
        if rows == 1 { "" } else { "s" }
    ));
}

/// Formats offered on the command line. Writers compiled out of the
/// build are not offered at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    #[cfg(feature = "xlsx")]
    Xlsx,
    #[cfg(feature = "pdf")]
    Pdf,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            #[cfg(feature = "xlsx")]
            ExportFormat::Xlsx => "xlsx",
            #[cfg(feature = "pdf")]
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// Every known format and whether this build can write it.
pub fn capabilities() -> Vec<(&'static str, bool)> {
    vec![
        ("csv", true),
        ("json", true),
        ("xlsx", cfg!(feature = "xlsx")),
        ("pdf", cfg!(feature = "pdf")),
    ]
}

/// Outcome of a completed export.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub rows: usize,
}
