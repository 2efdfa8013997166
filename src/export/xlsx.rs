// src/export/xlsx.rs

use crate::config::Styles;
use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_value;
use crate::export::model::{get_headers, record_to_row};
use crate::export::{RecordExport, notify_export_success};
use crate::ui::messages::info;
use crate::utils::colors::hex_or;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const SHEET_NAME: &str = "Project Records";

/// Columns always written as text, even when they look numeric.
const TEXT_COLUMNS: [usize; 2] = [1, 2];

/// Export XLSX con styling e auto-larghezza colonne.
/// Returns the number of data rows written.
pub(crate) fn export_xlsx(records: &[RecordExport], path: &Path, styles: &Styles) -> AppResult<usize> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(to_export_error)?;

    let grid = Color::RGB(hex_or(&styles.grid_color, 0xA6A6A6));

    // ---------------------------
    // Header
    // ---------------------------
    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(hex_or(&styles.header_text_color, 0xFFFFFF)))
        .set_background_color(Color::RGB(hex_or(&styles.header_background, 0x2F75B5)))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
        .set_border_color(grid);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(to_export_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(hex_or(&styles.row_background, 0xFFFFFF));
    let band2 = Color::RGB(hex_or(&styles.row_alternate_background, 0xEAF3FB));

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, rec) in records.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let cell_style = CellStyle {
            bg: if row_index % 2 == 0 { band1 } else { band2 },
            border: grid,
        };

        for (col, value) in record_to_row(rec).iter().enumerate() {
            write_xlsx_cell(worksheet, row, col, value, &cell_style)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, (*w).min(60) as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", path, records.len());
    Ok(records.len())
}

struct CellStyle {
    bg: Color,
    border: Color,
}

impl CellStyle {
    fn base(&self) -> Format {
        Format::new()
            .set_background_color(self.bg)
            .set_pattern(FormatPattern::Solid)
            .set_border(FormatBorder::Thin)
            .set_border_color(self.border)
    }
}

/// Scrive una singola cella, interpretando stringhe come data/durata/numero se possibile.
fn write_xlsx_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: usize,
    s: &str,
    style: &CellStyle,
) -> AppResult<()> {
    let col_u16 = col as u16;

    if !TEXT_COLUMNS.contains(&col) {
        // Data / durata in formato Excel
        if let Some((num_format, serial)) = parse_to_excel_value(s) {
            let fmt = style.base().set_num_format(num_format);
            worksheet
                .write_with_format(row, col_u16, serial, &fmt)
                .map_err(to_export_error)?;
            return Ok(());
        }

        // Numero generico
        if let Ok(num) = s.parse::<f64>() {
            let fmt = style.base().set_align(FormatAlign::Right);
            worksheet
                .write_with_format(row, col_u16, num, &fmt)
                .map_err(to_export_error)?;
            return Ok(());
        }
    }

    // Testo
    worksheet
        .write_with_format(row, col_u16, s, &style.base())
        .map_err(to_export_error)?;

    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(format!("XLSX: {e}"))
}
