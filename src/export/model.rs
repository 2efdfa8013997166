// src/export/model.rs

use crate::models::record::LogRecord;
use serde::Serialize;

/// Flat row used by every exporter.
#[derive(Serialize, Clone, Debug)]
pub struct RecordExport {
    #[serde(rename = "Project ID")]
    pub project_id: i64,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Details")]
    pub details: String,
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time")]
    pub end_time: String,
    #[serde(rename = "Duration")]
    pub duration: String,
    #[serde(rename = "Cumulative Time")]
    pub cumulative_time: String,
}

impl From<&LogRecord> for RecordExport {
    fn from(r: &LogRecord) -> Self {
        Self {
            project_id: r.project_id,
            title: r.title.clone(),
            details: r.details.clone(),
            start_time: r.start_str(),
            end_time: r.end_str(),
            duration: r.duration_str(),
            cumulative_time: r.cumulative_str(),
        }
    }
}

/// Header per XLSX / PDF
#[cfg_attr(not(any(feature = "xlsx", feature = "pdf")), allow(dead_code))]
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "Project ID",
        "Title",
        "Details",
        "Start Time",
        "End Time",
        "Duration",
        "Cumulative Time",
    ]
}

#[cfg_attr(not(any(feature = "xlsx", feature = "pdf")), allow(dead_code))]
pub(crate) fn record_to_row(r: &RecordExport) -> Vec<String> {
    vec![
        r.project_id.to_string(),
        r.title.clone(),
        r.details.clone(),
        r.start_time.clone(),
        r.end_time.clone(),
        r.duration.clone(),
        r.cumulative_time.clone(),
    ]
}

#[cfg_attr(not(feature = "pdf"), allow(dead_code))]
pub(crate) fn records_to_table(records: &[RecordExport]) -> Vec<Vec<String>> {
    records.iter().map(record_to_row).collect()
}
