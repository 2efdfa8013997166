// src/export/logic.rs

use crate::config::Config;
use crate::core::records::{RecordFilter, RecordsLogic};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::RecordExport;
use crate::export::{ExportFormat, ExportSummary};
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;
use crate::utils::period::Period;
use std::path::Path;

#[cfg(feature = "pdf")]
use crate::export::pdf_export::export_pdf;
#[cfg(feature = "xlsx")]
use crate::export::xlsx::export_xlsx;

/// What to export and where.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub format: ExportFormat,
    /// Absolute path of the output file.
    pub file: String,
    pub project: Option<String>,
    /// `None`, `"all"` or a period expression (`YYYY`, `YYYY-MM`,
    /// `YYYY-MM-DD`, or `A:B` of the same shape).
    pub range: Option<String>,
    /// Entry ids of `project` ("export selected").
    pub entries: Option<Vec<i64>>,
    pub force: bool,
}

impl ExportRequest {
    fn period(&self) -> AppResult<Option<Period>> {
        match &self.range {
            None => Ok(None),
            Some(r) if r.eq_ignore_ascii_case("all") => Ok(None),
            Some(r) => Period::parse(r).map(Some),
        }
    }

    #[cfg_attr(not(feature = "pdf"), allow(dead_code))]
    fn title(&self) -> &'static str {
        if self.entries.is_some() {
            "Selected Project Records"
        } else {
            "All Project Records"
        }
    }

    /// Second title line: project and period, when given.
    #[cfg_attr(not(feature = "pdf"), allow(dead_code))]
    fn subtitle(&self) -> Option<String> {
        let project = self.project.as_ref().map(|p| format!("Project: {p}"));
        let period = self
            .range
            .as_ref()
            .filter(|r| !r.eq_ignore_ascii_case("all"))
            .map(|r| format!("Entries {}", Period::describe(r)));

        match (project, period) {
            (Some(a), Some(b)) => Some(format!("{a} - {b}")),
            (a, b) => a.or(b),
        }
    }
}

/// Logica di alto livello per l'export.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the selected log rows. Returns `None` when the selection is
    /// empty and nothing was written.
    pub fn export(
        pool: &mut DbPool,
        cfg: &Config,
        req: &ExportRequest,
    ) -> AppResult<Option<ExportSummary>> {
        let target = expand_tilde(&req.file);
        let path = target.as_path();

        if !path.is_absolute() {
            return Err(AppError::InvalidArgument(format!(
                "Output file path must be absolute: {}",
                req.file
            )));
        }

        let filter = RecordFilter {
            project: req.project.clone(),
            period: req.period()?,
            entries: req.entries.clone(),
            include_empty_projects: false,
        };

        let records: Vec<RecordExport> = RecordsLogic::load(pool, &filter)?
            .iter()
            .map(RecordExport::from)
            .collect();

        if records.is_empty() {
            warning("No log entries found for the selected filter; nothing exported.");
            return Ok(None);
        }

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            return Err(AppError::Export(format!(
                "Directory does not exist: {}",
                parent.display()
            )));
        }

        ensure_writable(path, req.force)?;

        let rows = write_records(&records, path, cfg, req)?;

        ttlog(
            &pool.conn,
            "export",
            req.format.as_str(),
            &format!("{rows} row(s) to {}", path.display()),
        )?;

        Ok(Some(ExportSummary {
            path: target,
            format: req.format,
            rows,
        }))
    }
}

#[cfg_attr(not(any(feature = "xlsx", feature = "pdf")), allow(unused_variables))]
fn write_records(
    records: &[RecordExport],
    path: &Path,
    cfg: &Config,
    req: &ExportRequest,
) -> AppResult<usize> {
    match req.format {
        ExportFormat::Csv => export_csv(records, path),
        ExportFormat::Json => export_json(records, path),
        #[cfg(feature = "xlsx")]
        ExportFormat::Xlsx => export_xlsx(records, path, &cfg.styles),
        #[cfg(feature = "pdf")]
        ExportFormat::Pdf => {
            let subtitle = req.subtitle();
            export_pdf(records, path, cfg, req.title(), subtitle.as_deref())
        }
    }
}
