// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::{RecordExport, notify_export_success};
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed, one object per row.
pub(crate) fn export_json(records: &[RecordExport], path: &Path) -> AppResult<usize> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(records)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path).map_err(to_json_error)?;
    file.write_all(json_data.as_bytes()).map_err(to_json_error)?;

    notify_export_success("JSON", path, records.len());
    Ok(records.len())
}

fn to_json_error(e: std::io::Error) -> AppError {
    AppError::Export(format!("JSON write error: {e}"))
}

/// Export CSV (header incluso grazie a serde).
pub(crate) fn export_csv(records: &[RecordExport], path: &Path) -> AppResult<usize> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    for item in records {
        wtr.serialize(item)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()
        .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;

    notify_export_success("CSV", path, records.len());
    Ok(records.len())
}
