use crate::error::{ExtractError, ExtractResult};
use crate::excel::column_letter_to_index;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

//==============================================================================
// Table
//==============================================================================

/// Rows of plain text cells, in sheet order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

impl From<Vec<Vec<String>>> for Table {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

//==============================================================================
// Column References
//==============================================================================

/// A column addressed either by zero-based index or by letter ("A", "AA", ...)
///
/// In job files a reference is a number or a string; strings go through
/// [`FromStr`], so a quoted `"4"` is column index 4.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawColumnRef", into = "RawColumnRef")]
pub enum ColumnRef {
    Index(usize),
    Letter(String),
}

/// Column reference as written in a job file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawColumnRef {
    Index(usize),
    Text(String),
}

impl TryFrom<RawColumnRef> for ColumnRef {
    type Error = ExtractError;

    fn try_from(raw: RawColumnRef) -> Result<Self, Self::Error> {
        match raw {
            RawColumnRef::Index(idx) => Ok(ColumnRef::Index(idx)),
            RawColumnRef::Text(text) => text.parse(),
        }
    }
}

impl From<ColumnRef> for RawColumnRef {
    fn from(column: ColumnRef) -> Self {
        match column {
            ColumnRef::Index(idx) => RawColumnRef::Index(idx),
            ColumnRef::Letter(letter) => RawColumnRef::Text(letter),
        }
    }
}

impl ColumnRef {
    /// Resolve to a zero-based column index
    pub fn resolve(&self) -> ExtractResult<usize> {
        match self {
            ColumnRef::Index(idx) => Ok(*idx),
            ColumnRef::Letter(letter) => column_letter_to_index(letter),
        }
    }
}

impl FromStr for ColumnRef {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ExtractError::Format("empty column reference".to_string()));
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            let idx = s
                .parse::<usize>()
                .map_err(|e| ExtractError::Format(format!("column index '{}': {}", s, e)))?;
            return Ok(ColumnRef::Index(idx));
        }
        Ok(ColumnRef::Letter(s.to_string()))
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Index(idx) => write!(f, "{}", idx),
            ColumnRef::Letter(letter) => write!(f, "{}", letter),
        }
    }
}

/// Resolve a list of mixed column references, stopping at the first bad one
pub fn resolve_columns(columns: &[ColumnRef]) -> ExtractResult<Vec<usize>> {
    columns.iter().map(ColumnRef::resolve).collect()
}

//==============================================================================
// Row Range
//==============================================================================

/// Inclusive row range; `end: None` means "until the last row"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: Option<usize>,
}

impl RowRange {
    pub fn new(start: usize, end: Option<usize>) -> Self {
        Self { start, end }
    }

    pub fn from_start(start: usize) -> Self {
        Self { start, end: None }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn contains(&self, row: usize) -> bool {
        row >= self.start && self.end.map_or(true, |end| row <= end)
    }

    /// Build from the command-line convention where a negative end means no limit
    pub fn from_signed(start: usize, end: Option<i64>) -> Self {
        let end = end.and_then(|e| usize::try_from(e).ok());
        Self { start, end }
    }
}

//==============================================================================
// Row Filter
//==============================================================================

/// Decides which rows of a sheet count as data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFilter {
    /// Skip rows whose cell in this column is empty
    KeyColumn(usize),
    /// Keep every row in range
    KeepAll,
}

impl Default for RowFilter {
    fn default() -> Self {
        RowFilter::KeyColumn(1)
    }
}

impl RowFilter {
    /// Whether a row with the given key cell value should be kept
    pub fn keeps(&self, key_value: Option<&str>) -> bool {
        match self {
            RowFilter::KeyColumn(_) => key_value.is_some_and(|v| !v.is_empty()),
            RowFilter::KeepAll => true,
        }
    }

    /// Filter from the user-facing options: an optional key column, or keep everything
    pub fn from_options(key_column: Option<&ColumnRef>, keep_all: bool) -> ExtractResult<Self> {
        if keep_all {
            return Ok(RowFilter::KeepAll);
        }
        match key_column {
            Some(column) => Ok(RowFilter::KeyColumn(column.resolve()?)),
            None => Ok(RowFilter::default()),
        }
    }

    pub fn key_column(&self) -> Option<usize> {
        match self {
            RowFilter::KeyColumn(col) => Some(*col),
            RowFilter::KeepAll => None,
        }
    }
}

//==============================================================================
// Output
//==============================================================================

/// Field delimiter for text output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Tab,
    Comma,
}

impl Separator {
    pub fn as_byte(&self) -> u8 {
        match self {
            Separator::Tab => b'\t',
            Separator::Comma => b',',
        }
    }
}

/// Destination file type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated text
    Txt,
    /// Comma-separated text
    Csv,
    /// Single-sheet workbook
    Xlsx,
}

impl OutputFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> ExtractResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                ExtractError::Format(format!(
                    "cannot infer output format from '{}' (use --format)",
                    path.display()
                ))
            })?;
        ext.parse()
    }

    /// Separator for the text formats, `None` for workbooks
    pub fn separator(&self) -> Option<Separator> {
        match self {
            OutputFormat::Txt => Some(Separator::Tab),
            OutputFormat::Csv => Some(Separator::Comma),
            OutputFormat::Xlsx => None,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "txt" | "tsv" => Ok(OutputFormat::Txt),
            "csv" => Ok(OutputFormat::Csv),
            "xlsx" => Ok(OutputFormat::Xlsx),
            other => Err(ExtractError::Format(format!(
                "unknown output format '{}' (expected txt, csv or xlsx)",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_column_ref_from_str() {
        assert_eq!("4".parse::<ColumnRef>().unwrap(), ColumnRef::Index(4));
        assert_eq!(
            "AB".parse::<ColumnRef>().unwrap(),
            ColumnRef::Letter("AB".to_string())
        );
        assert!("".parse::<ColumnRef>().is_err());
    }

    #[test]
    fn test_column_ref_deserialize() {
        let columns: Vec<ColumnRef> = serde_yaml::from_str("[4, \"4\", B, \" c \"]").unwrap();
        assert_eq!(
            columns,
            vec![
                ColumnRef::Index(4),
                ColumnRef::Index(4),
                ColumnRef::Letter("B".to_string()),
                ColumnRef::Letter("c".to_string()),
            ]
        );
        assert!(serde_yaml::from_str::<Vec<ColumnRef>>("[\"\"]").is_err());
    }

    #[test]
    fn test_column_ref_resolve() {
        assert_eq!(ColumnRef::Index(7).resolve().unwrap(), 7);
        assert_eq!(ColumnRef::Letter("c".to_string()).resolve().unwrap(), 2);
        assert!(ColumnRef::Letter("A1".to_string()).resolve().is_err());
    }

    #[test]
    fn test_row_range_contains() {
        let range = RowRange::new(1, Some(3));
        assert!(!range.contains(0));
        assert!(range.contains(1));
        assert!(range.contains(3));
        assert!(!range.contains(4));

        let open = RowRange::from_start(2);
        assert!(!open.contains(1));
        assert!(open.contains(1_000_000));
    }

    #[test]
    fn test_row_range_from_signed() {
        assert_eq!(RowRange::from_signed(0, Some(-1)).end, None);
        assert_eq!(RowRange::from_signed(0, None).end, None);
        assert_eq!(RowRange::from_signed(0, Some(5)).end, Some(5));
    }

    #[test]
    fn test_row_filter() {
        let filter = RowFilter::default();
        assert_eq!(filter.key_column(), Some(1));
        assert!(filter.keeps(Some("x")));
        assert!(!filter.keeps(Some("")));
        assert!(!filter.keeps(None));
        assert!(RowFilter::KeepAll.keeps(None));
    }

    #[test]
    fn test_row_filter_from_options() {
        let key = ColumnRef::Letter("D".to_string());
        assert_eq!(
            RowFilter::from_options(Some(&key), false).unwrap(),
            RowFilter::KeyColumn(3)
        );
        assert_eq!(
            RowFilter::from_options(Some(&key), true).unwrap(),
            RowFilter::KeepAll
        );
        assert_eq!(
            RowFilter::from_options(None, false).unwrap(),
            RowFilter::KeyColumn(1)
        );
        let bad = ColumnRef::Letter("?".to_string());
        assert!(RowFilter::from_options(Some(&bad), false).is_err());
    }

    #[test]
    fn test_output_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(&PathBuf::from("out.CSV")).unwrap(),
            OutputFormat::Csv
        );
        assert_eq!(
            OutputFormat::from_path(&PathBuf::from("out.txt")).unwrap(),
            OutputFormat::Txt
        );
        assert_eq!(
            OutputFormat::from_path(&PathBuf::from("out.xlsx")).unwrap(),
            OutputFormat::Xlsx
        );
        assert!(OutputFormat::from_path(&PathBuf::from("out")).is_err());
        assert!(OutputFormat::from_path(&PathBuf::from("out.pdf")).is_err());
    }

    #[test]
    fn test_output_format_separator() {
        assert_eq!(OutputFormat::Txt.separator(), Some(Separator::Tab));
        assert_eq!(OutputFormat::Csv.separator(), Some(Separator::Comma));
        assert_eq!(OutputFormat::Xlsx.separator(), None);
    }
}
