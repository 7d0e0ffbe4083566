use crate::error::{ExtractError, ExtractResult};
use crate::excel;
use crate::types::{OutputFormat, Separator, Table};
use csv::WriterBuilder;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Write a table as delimited text, one record per line
///
/// Fields containing the delimiter, quotes or line breaks are quoted.
/// The writer is flushed before returning even when a record fails to write;
/// the record error is reported first, then any flush error.
pub fn write_delimited<P: AsRef<Path>>(
    path: P,
    table: &Table,
    separator: Separator,
) -> ExtractResult<()> {
    let path = path.as_ref();
    let mut writer = WriterBuilder::new()
        .delimiter(separator.as_byte())
        .flexible(true)
        .from_path(path)
        .map_err(|e| file_error(path, e))?;

    let written = write_records(&mut writer, table);
    let flushed = writer.flush();

    written.map_err(|e| file_error(path, e))?;
    flushed.map_err(|e| file_error(path, e))?;

    debug!(path = %path.display(), rows = table.row_count(), "wrote delimited text");
    Ok(())
}

/// Write a table in the given format; `sheet_name` only applies to workbooks
pub fn write_table<P: AsRef<Path>>(
    path: P,
    table: &Table,
    format: OutputFormat,
    sheet_name: &str,
) -> ExtractResult<()> {
    match format.separator() {
        Some(separator) => write_delimited(path, table, separator),
        None => excel::write_spreadsheet(path, table, sheet_name),
    }
}

fn write_records<W: Write>(writer: &mut csv::Writer<W>, table: &Table) -> csv::Result<()> {
    for row in table.rows() {
        writer.write_record(row)?;
    }
    Ok(())
}

fn file_error(path: &Path, e: impl std::fmt::Display) -> ExtractError {
    ExtractError::File(format!("Failed to write '{}': {}", path.display(), e))
}
