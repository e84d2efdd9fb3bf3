//! Multi-sheet spreadsheet export.

use std::path::Path;
use std::time::Instant;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use star_core::NamedTable;
use tracing::{info, info_span};

use crate::atomic::write_atomic;
use crate::error::{ExportError, Result};
use crate::values::{Cell, any_to_cell};

fn sheet_error(sheet: &str) -> impl FnOnce(XlsxError) -> ExportError + '_ {
    move |err| ExportError::Workbook {
        sheet: sheet.to_string(),
        message: err.to_string(),
    }
}

fn write_table(worksheet: &mut Worksheet, table: &NamedTable, header: &Format) -> Result<()> {
    let frame = &table.frame;
    for (col, column) in frame.get_columns().iter().enumerate() {
        let col = u16::try_from(col).map_err(|_| ExportError::Workbook {
            sheet: table.name.to_string(),
            message: format!("too many columns ({})", frame.width()),
        })?;
        worksheet
            .write_string_with_format(0, col, column.name().as_str(), header)
            .map_err(sheet_error(table.name))?;

        for row in 0..frame.height() {
            let excel_row = u32::try_from(row + 1).map_err(|_| ExportError::Workbook {
                sheet: table.name.to_string(),
                message: format!("too many rows ({})", frame.height()),
            })?;
            match any_to_cell(column.get(row)?) {
                Cell::Number(value) => {
                    worksheet
                        .write_number(excel_row, col, value)
                        .map_err(sheet_error(table.name))?;
                }
                Cell::Text(value) => {
                    worksheet
                        .write_string(excel_row, col, value)
                        .map_err(sheet_error(table.name))?;
                }
                Cell::Blank => {}
            }
        }
    }
    Ok(())
}

/// Render `tables` as an in-memory workbook, one sheet per table in order.
pub fn render_workbook(tables: &[NamedTable]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    for table in tables {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(table.name)
            .map_err(sheet_error(table.name))?;
        write_table(worksheet, table, &header)?;
    }

    workbook.save_to_buffer().map_err(|err| ExportError::Workbook {
        sheet: String::new(),
        message: err.to_string(),
    })
}

/// Render and atomically write a workbook to `path`.
pub fn write_workbook(tables: &[NamedTable], path: &Path) -> Result<()> {
    let span = info_span!("export", path = %path.display(), sheets = tables.len());
    let _guard = span.enter();
    let start = Instant::now();

    let bytes = render_workbook(tables)?;
    write_atomic(path, &bytes)?;

    info!(
        bytes = bytes.len(),
        duration_ms = start.elapsed().as_millis(),
        "workbook written"
    );
    Ok(())
}
