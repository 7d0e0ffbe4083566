//! Column extraction from spreadsheet workbooks (.xlsx, .xlsm, .xlsb, .xls, .ods)

use crate::error::{ExtractError, ExtractResult};
use crate::excel::columns::column_letter_to_index;
use crate::types::{resolve_columns, ColumnRef, RowFilter, RowRange, Table};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Name and used size of one worksheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetInfo {
    pub index: usize,
    pub name: String,
    /// Rows from row 1 down to the last used row
    pub height: usize,
    /// Columns from A across to the last used column
    pub width: usize,
}

/// What to pull out of a workbook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractRequest {
    pub sheet: usize,
    pub rows: RowRange,
    pub columns: Vec<ColumnRef>,
    pub filter: RowFilter,
}

impl ExtractRequest {
    pub fn new(columns: Vec<ColumnRef>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    pub fn sheet(mut self, sheet: usize) -> Self {
        self.sheet = sheet;
        self
    }

    pub fn rows(mut self, rows: RowRange) -> Self {
        self.rows = rows;
        self
    }

    pub fn filter(mut self, filter: RowFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Reads column subsets out of one workbook file
pub struct ExcelExtractor {
    path: PathBuf,
}

impl ExcelExtractor {
    /// Create a new extractor for the workbook at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Run an extraction request, resolving letter references first
    pub fn run(&self, request: &ExtractRequest) -> ExtractResult<Table> {
        let columns = resolve_columns(&request.columns)?;
        self.extract(request.sheet, request.rows, &columns, request.filter)
    }

    /// Extract columns by zero-based index
    pub fn extract(
        &self,
        sheet_index: usize,
        rows: RowRange,
        columns: &[usize],
        filter: RowFilter,
    ) -> ExtractResult<Table> {
        let mut workbook = self.open()?;
        let (range, extent) = Self::load_sheet(&mut workbook, sheet_index)?;

        debug!(
            path = %self.path.display(),
            sheet = sheet_index,
            start = rows.start,
            end = ?rows.end,
            columns = ?columns,
            "extracting columns"
        );

        let table = collect_rows_within(&range, extent, rows, columns, filter)?;
        debug!(rows = table.row_count(), "extraction finished");
        Ok(table)
    }

    /// Extract columns addressed by letter ("A", "C", "AA")
    pub fn extract_by_letters<S: AsRef<str>>(
        &self,
        sheet_index: usize,
        rows: RowRange,
        letters: &[S],
        filter: RowFilter,
    ) -> ExtractResult<Table> {
        let columns = letters
            .iter()
            .map(|l| column_letter_to_index(l.as_ref()))
            .collect::<ExtractResult<Vec<_>>>()?;
        self.extract(sheet_index, rows, &columns, filter)
    }

    /// List every worksheet with its used size
    pub fn sheets(&self) -> ExtractResult<Vec<SheetInfo>> {
        let mut workbook = self.open()?;
        let names = workbook.sheet_names();

        let mut sheets = Vec::with_capacity(names.len());
        for (index, name) in names.into_iter().enumerate() {
            let (_, extent) = Self::load_sheet(&mut workbook, index)?;
            let (height, width) = match extent {
                Some((row, col)) => (row as usize + 1, col as usize + 1),
                None => (0, 0),
            };
            sheets.push(SheetInfo {
                index,
                name,
                height,
                width,
            });
        }

        Ok(sheets)
    }

    fn open(&self) -> ExtractResult<Sheets<BufReader<File>>> {
        open_workbook_auto(&self.path).map_err(|e| {
            ExtractError::File(format!(
                "Failed to open workbook '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Read a sheet's cells and its extent (last row, last column) from A1
    fn load_sheet(
        workbook: &mut Sheets<BufReader<File>>,
        sheet_index: usize,
    ) -> ExtractResult<(Range<Data>, Option<(u32, u32)>)> {
        let names = workbook.sheet_names();
        let Some(name) = names.get(sheet_index) else {
            return Err(ExtractError::sheet_out_of_bounds(sheet_index, names.len()));
        };

        let range = match workbook.worksheet_range_at(sheet_index) {
            Some(Ok(range)) => range,
            Some(Err(e)) => {
                return Err(ExtractError::File(format!(
                    "Failed to read sheet {}: {}",
                    sheet_index, e
                )))
            }
            None => return Err(ExtractError::sheet_out_of_bounds(sheet_index, names.len())),
        };

        let extent = match (range.end(), declared_extent(workbook, name)) {
            (Some((row, col)), Some((d_row, d_col))) => Some((row.max(d_row), col.max(d_col))),
            (used, declared) => used.or(declared),
        };
        Ok((range, extent))
    }
}

/// Last cell of the `<dimension>` an .xlsx sheet declares
///
/// calamine leaves blank cells out of its ranges, so a sheet whose right-most
/// column or bottom rows hold only blanks reads narrower than it was written.
/// The declared dimension still covers them. `A1:A1` is what writers emit
/// for an empty sheet and is ignored.
fn declared_extent(workbook: &mut Sheets<BufReader<File>>, name: &str) -> Option<(u32, u32)> {
    let Sheets::Xlsx(xlsx) = workbook else {
        return None;
    };
    let dimensions = xlsx.worksheet_cells_reader(name).ok()?.dimensions();
    if dimensions.end == (0, 0) {
        return None;
    }
    Some(dimensions.end)
}

/// Walk a sheet's rows in order and keep the requested columns
///
/// The sheet's extent is taken from the cells calamine read.
pub fn collect_rows(
    range: &Range<Data>,
    rows: RowRange,
    columns: &[usize],
    filter: RowFilter,
) -> ExtractResult<Table> {
    collect_rows_within(range, range.end(), rows, columns, filter)
}

/// Walk a sheet's rows in order within an explicit extent
///
/// Rows and columns are absolute: row 0 is the sheet's first row even when
/// the used area starts lower down, and rows above it read as blank. `extent`
/// is the last (row, column) of the sheet; a row's cell count is the extent's
/// width measured from column A.
pub fn collect_rows_within(
    range: &Range<Data>,
    extent: Option<(u32, u32)>,
    rows: RowRange,
    columns: &[usize],
    filter: RowFilter,
) -> ExtractResult<Table> {
    let mut table = Table::new();

    let Some((last_row, last_col)) = extent else {
        return Ok(table);
    };
    let cell_count = last_col as usize + 1;

    for row in (rows.start..=last_row as usize).take_while(|&row| rows.contains(row)) {
        if let Some(key) = filter.key_column() {
            let key_value = (key < cell_count).then(|| cell_text(range, row, key));
            if !filter.keeps(key_value.as_deref()) {
                trace!(row, "skipping row with empty key column");
                continue;
            }
        }

        let mut values = Vec::with_capacity(columns.len());
        for &col in columns {
            if col >= cell_count {
                return Err(ExtractError::column_out_of_bounds(col, row, cell_count));
            }
            values.push(cell_text(range, row, col));
        }
        table.push_row(values);
    }

    Ok(table)
}

/// String value of a cell with trailing line breaks removed
fn cell_text(range: &Range<Data>, row: usize, col: usize) -> String {
    let (Ok(r), Ok(c)) = (u32::try_from(row), u32::try_from(col)) else {
        return String::new();
    };
    match range.get_value((r, c)) {
        Some(Data::Empty) | None => String::new(),
        Some(cell) => cell.to_string().trim_end_matches(['\r', '\n']).to_string(),
    }
}
