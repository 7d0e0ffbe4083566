//! sheetx - spreadsheet column extraction
//!
//! This library reads a subset of columns out of one sheet of a workbook and
//! writes the resulting table of strings back out as a workbook or as
//! delimited text.
//!
//! # Features
//!
//! - Columns by zero-based index or by letter (A, B, ..., AA)
//! - Inclusive row ranges with an open end
//! - Configurable blank-row filter on a key column
//! - .xlsx, .xlsm, .xlsb, .xls and .ods input
//! - .xlsx, CSV and tab-separated output
//!
//! # Example
//!
//! ```no_run
//! use sheetx::excel::{extract_columns_by_letters, write_spreadsheet};
//! use sheetx::types::{RowFilter, RowRange};
//!
//! let table = extract_columns_by_letters(
//!     "book.xlsx",
//!     0,
//!     RowRange::from_start(1),
//!     &["A", "C"],
//!     RowFilter::default(),
//! )?;
//!
//! println!("Rows: {}", table.row_count());
//! write_spreadsheet("out.xlsx", &table, "Export")?;
//! # Ok::<(), sheetx::error::ExtractError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod excel;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{ExtractError, ExtractResult};
pub use excel::{extract, extract_columns, extract_columns_by_letters, write_spreadsheet};
pub use types::{ColumnRef, OutputFormat, RowFilter, RowRange, Separator, Table};
pub use writer::{write_delimited, write_table};
