// src/export/pdf_export.rs

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::model::{get_headers, records_to_table};
use crate::export::pdf::PdfManager;
use crate::export::{RecordExport, notify_export_success};
use crate::ui::messages::info;
use std::path::Path;

/// Export PDF usando PdfManager e la tabella generata.
pub(crate) fn export_pdf(
    records: &[RecordExport],
    path: &Path,
    cfg: &Config,
    title: &str,
    subtitle: Option<&str>,
) -> AppResult<usize> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = get_headers();
    let data_vec = records_to_table(records);

    let mut pdf = PdfManager::new(cfg.preferences.pdf_orientation, &cfg.styles);
    let rows = pdf.write_table(title, subtitle, &headers, &data_vec);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path, rows);
    Ok(rows)
}
