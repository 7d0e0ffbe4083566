//! Workbook reading and writing
//!
//! - Extract: workbook (.xlsx/.xls/.ods) → Table of strings
//! - Export: Table → single-sheet .xlsx

mod columns;
mod exporter;
mod extractor;

pub use columns::{column_index_to_letter, column_letter_to_index, MAX_COLUMNS};
pub use exporter::{ExcelExporter, DEFAULT_SHEET_NAME};
pub use extractor::{collect_rows, collect_rows_within, ExcelExtractor, ExtractRequest, SheetInfo};

use crate::error::ExtractResult;
use crate::types::{ColumnRef, RowFilter, RowRange, Table};
use std::path::Path;

/// Extract columns by zero-based index from one sheet of a workbook
pub fn extract_columns<P: AsRef<Path>>(
    path: P,
    sheet_index: usize,
    rows: RowRange,
    columns: &[usize],
    filter: RowFilter,
) -> ExtractResult<Table> {
    ExcelExtractor::new(path).extract(sheet_index, rows, columns, filter)
}

/// Extract columns addressed by letter ("A", "AA") from one sheet of a workbook
pub fn extract_columns_by_letters<P: AsRef<Path>, S: AsRef<str>>(
    path: P,
    sheet_index: usize,
    rows: RowRange,
    letters: &[S],
    filter: RowFilter,
) -> ExtractResult<Table> {
    ExcelExtractor::new(path).extract_by_letters(sheet_index, rows, letters, filter)
}

/// Extract columns given as a mix of indices and letters
pub fn extract<P: AsRef<Path>>(
    path: P,
    sheet_index: usize,
    rows: RowRange,
    columns: &[ColumnRef],
    filter: RowFilter,
) -> ExtractResult<Table> {
    let request = ExtractRequest::new(columns.to_vec())
        .sheet(sheet_index)
        .rows(rows)
        .filter(filter);
    ExcelExtractor::new(path).run(&request)
}

/// List the sheets of a workbook
pub fn list_sheets<P: AsRef<Path>>(path: P) -> ExtractResult<Vec<SheetInfo>> {
    ExcelExtractor::new(path).sheets()
}

/// Write a table as a new single-sheet workbook
pub fn write_spreadsheet<P: AsRef<Path>>(
    path: P,
    table: &Table,
    sheet_name: &str,
) -> ExtractResult<()> {
    ExcelExporter::new(table, sheet_name).export(path.as_ref())
}
