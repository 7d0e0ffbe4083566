//! Excel exporter implementation - Table → single-sheet .xlsx

use crate::error::{ExtractError, ExtractResult};
use crate::types::Table;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;
use tracing::debug;

/// Default worksheet name for exported tables
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Writes a table as a new workbook with one worksheet
pub struct ExcelExporter<'a> {
    table: &'a Table,
    sheet_name: String,
}

impl<'a> ExcelExporter<'a> {
    /// Create a new Excel exporter
    pub fn new(table: &'a Table, sheet_name: impl Into<String>) -> Self {
        Self {
            table,
            sheet_name: sheet_name.into(),
        }
    }

    /// Export the table to an Excel .xlsx file, replacing any existing file
    pub fn export(&self, output_path: &Path) -> ExtractResult<()> {
        let mut workbook = Workbook::new();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name).map_err(|e| {
            ExtractError::Format(format!(
                "Invalid worksheet name '{}': {}",
                self.sheet_name, e
            ))
        })?;
        self.write_rows(worksheet)?;

        workbook.save(output_path).map_err(|e| {
            ExtractError::File(format!(
                "Failed to save Excel file '{}': {}",
                output_path.display(),
                e
            ))
        })?;

        debug!(
            path = %output_path.display(),
            sheet = %self.sheet_name,
            rows = self.table.row_count(),
            "wrote workbook"
        );
        Ok(())
    }

    /// Write every cell as a plain string, row 0 at the top
    ///
    /// Empty strings become text-formatted blanks. An unformatted blank is
    /// not stored, which would shrink the sheet's dimension when a trailing
    /// column or row holds nothing.
    fn write_rows(&self, worksheet: &mut Worksheet) -> ExtractResult<()> {
        let blank = Format::new().set_num_format("@");
        for (row_idx, row) in self.table.rows().iter().enumerate() {
            let excel_row = u32::try_from(row_idx).map_err(|_| {
                ExtractError::Index(format!("row {} does not fit in a worksheet", row_idx))
            })?;
            for (col_idx, value) in row.iter().enumerate() {
                let excel_col = u16::try_from(col_idx).map_err(|_| {
                    ExtractError::Index(format!(
                        "column {} does not fit in a worksheet",
                        col_idx
                    ))
                })?;
                let written = if value.is_empty() {
                    worksheet.write_blank(excel_row, excel_col, &blank)
                } else {
                    worksheet.write_string(excel_row, excel_col, value)
                };
                written.map_err(|e| {
                    ExtractError::Format(format!(
                        "Failed to write cell ({}, {}): {}",
                        row_idx, col_idx, e
                    ))
                })?;
            }
        }
        Ok(())
    }
}
