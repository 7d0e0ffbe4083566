use thiserror::Error;

pub type ExtractResult<T> = Result<T, ExtractError>;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("File error: {0}")]
    File(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl ExtractError {
    /// Sheet index past the end of the workbook
    pub fn sheet_out_of_bounds(index: usize, count: usize) -> Self {
        ExtractError::Index(format!(
            "sheet index {} out of bounds (workbook has {} sheets)",
            index, count
        ))
    }

    /// Column index past the end of a row
    pub fn column_out_of_bounds(column: usize, row: usize, cells: usize) -> Self {
        ExtractError::Index(format!(
            "column index {} out of bounds on row {} ({} cells)",
            column, row, cells
        ))
    }
}
