//! YAML job files: one extraction, any number of outputs
//!
//! ```yaml
//! input: data.xlsx
//! sheet: 0
//! start: 1
//! end: -1
//! columns: [A, C, 4]
//! key_column: B
//! outputs:
//!   - path: out.csv
//!   - path: out.xlsx
//!     sheet_name: Data
//! ```

use crate::error::{ExtractError, ExtractResult};
use crate::excel::{ExtractRequest, DEFAULT_SHEET_NAME};
use crate::types::{ColumnRef, OutputFormat, RowFilter, RowRange};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One output target of a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub path: PathBuf,
    /// Inferred from the path extension when absent
    #[serde(default)]
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub sheet_name: Option<String>,
}

impl OutputSpec {
    pub fn format(&self) -> ExtractResult<OutputFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => OutputFormat::from_path(&self.path),
        }
    }

    pub fn sheet_name(&self) -> &str {
        self.sheet_name.as_deref().unwrap_or(DEFAULT_SHEET_NAME)
    }
}

/// A parsed job file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFile {
    pub input: PathBuf,
    #[serde(default)]
    pub sheet: usize,
    #[serde(default)]
    pub start: usize,
    /// Negative or absent means "until the last row"
    #[serde(default)]
    pub end: Option<i64>,
    pub columns: Vec<ColumnRef>,
    /// Defaults to column B
    #[serde(default)]
    pub key_column: Option<ColumnRef>,
    #[serde(default)]
    pub keep_blank_rows: bool,
    pub outputs: Vec<OutputSpec>,
}

impl JobFile {
    /// Load a job file, resolving relative paths against its directory
    pub fn load(path: &Path) -> ExtractResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut job: JobFile = serde_yaml::from_str(&content)?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        job.input = base_dir.join(&job.input);
        for output in &mut job.outputs {
            output.path = base_dir.join(&output.path);
        }

        job.validate()?;
        Ok(job)
    }

    /// Check the job is runnable without touching the input file
    pub fn validate(&self) -> ExtractResult<()> {
        if self.columns.is_empty() {
            return Err(ExtractError::Config("job has no columns".to_string()));
        }
        if self.outputs.is_empty() {
            return Err(ExtractError::Config("job has no outputs".to_string()));
        }
        if let Some(end) = self.end.and_then(|e| usize::try_from(e).ok()) {
            if end < self.start {
                return Err(ExtractError::Config(format!(
                    "end row {} is before start row {}",
                    end, self.start
                )));
            }
        }
        for output in &self.outputs {
            output.format()?;
        }
        Ok(())
    }

    pub fn row_filter(&self) -> ExtractResult<RowFilter> {
        RowFilter::from_options(self.key_column.as_ref(), self.keep_blank_rows)
    }

    pub fn request(&self) -> ExtractResult<ExtractRequest> {
        Ok(ExtractRequest::new(self.columns.clone())
            .sheet(self.sheet)
            .rows(RowRange::from_signed(self.start, self.end))
            .filter(self.row_filter()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_job(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("job.yaml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_full_job() {
        let dir = TempDir::new().unwrap();
        let path = write_job(
            &dir,
            r#"
input: data.xlsx
sheet: 1
start: 2
end: 9
columns: [A, C, 4]
key_column: D
outputs:
  - path: out.csv
  - path: out.dat
    format: txt
  - path: out.xlsx
    sheet_name: Data
"#,
        );

        let job = JobFile::load(&path).unwrap();
        assert_eq!(job.input, dir.path().join("data.xlsx"));
        assert_eq!(
            job.columns,
            vec![
                ColumnRef::Letter("A".to_string()),
                ColumnRef::Letter("C".to_string()),
                ColumnRef::Index(4),
            ]
        );
        assert_eq!(job.outputs[0].format().unwrap(), OutputFormat::Csv);
        assert_eq!(job.outputs[1].format().unwrap(), OutputFormat::Txt);
        assert_eq!(job.outputs[2].sheet_name(), "Data");
        assert_eq!(job.outputs[0].sheet_name(), DEFAULT_SHEET_NAME);

        let request = job.request().unwrap();
        assert_eq!(request.sheet, 1);
        assert_eq!(request.rows, RowRange::new(2, Some(9)));
        assert_eq!(request.filter, RowFilter::KeyColumn(3));
    }

    #[test]
    fn test_load_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_job(
            &dir,
            "input: data.xlsx\ncolumns: [0]\noutputs:\n  - path: out.csv\n",
        );

        let job = JobFile::load(&path).unwrap();
        let request = job.request().unwrap();
        assert_eq!(request.sheet, 0);
        assert_eq!(request.rows, RowRange::all());
        assert_eq!(request.filter, RowFilter::KeyColumn(1));
    }

    #[test]
    fn test_quoted_column_index() {
        let dir = TempDir::new().unwrap();
        let path = write_job(
            &dir,
            "input: d.xlsx\ncolumns: [\"4\", A]\nkey_column: \"2\"\noutputs:\n  - path: o.csv\n",
        );
        let job = JobFile::load(&path).unwrap();
        let request = job.request().unwrap();
        assert_eq!(
            request.columns,
            vec![ColumnRef::Index(4), ColumnRef::Letter("A".to_string())]
        );
        assert_eq!(request.filter, RowFilter::KeyColumn(2));
    }

    #[test]
    fn test_negative_end_is_open() {
        let dir = TempDir::new().unwrap();
        let path = write_job(
            &dir,
            "input: d.xlsx\nstart: 3\nend: -1\ncolumns: [A]\noutputs:\n  - path: o.csv\n",
        );
        let job = JobFile::load(&path).unwrap();
        assert_eq!(job.request().unwrap().rows, RowRange::from_start(3));
    }

    #[test]
    fn test_keep_blank_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_job(
            &dir,
            "input: d.xlsx\ncolumns: [A]\nkeep_blank_rows: true\noutputs:\n  - path: o.csv\n",
        );
        let job = JobFile::load(&path).unwrap();
        assert_eq!(job.row_filter().unwrap(), RowFilter::KeepAll);
    }

    #[test]
    fn test_invalid_jobs() {
        let dir = TempDir::new().unwrap();

        let no_columns = write_job(&dir, "input: d.xlsx\ncolumns: []\noutputs:\n  - path: o.csv\n");
        assert!(matches!(
            JobFile::load(&no_columns),
            Err(ExtractError::Config(_))
        ));

        let no_outputs = write_job(&dir, "input: d.xlsx\ncolumns: [A]\noutputs: []\n");
        assert!(matches!(
            JobFile::load(&no_outputs),
            Err(ExtractError::Config(_))
        ));

        let backwards = write_job(
            &dir,
            "input: d.xlsx\nstart: 5\nend: 2\ncolumns: [A]\noutputs:\n  - path: o.csv\n",
        );
        assert!(matches!(
            JobFile::load(&backwards),
            Err(ExtractError::Config(_))
        ));

        let unknown_ext = write_job(&dir, "input: d.xlsx\ncolumns: [A]\noutputs:\n  - path: o.pdf\n");
        assert!(matches!(
            JobFile::load(&unknown_ext),
            Err(ExtractError::Format(_))
        ));
    }

    #[test]
    fn test_malformed_yaml() {
        let dir = TempDir::new().unwrap();
        let path = write_job(&dir, "input: [unclosed\n");
        assert!(matches!(JobFile::load(&path), Err(ExtractError::Yaml(_))));
    }

    #[test]
    fn test_missing_job_file() {
        let result = JobFile::load(Path::new("no-such-job.yaml"));
        assert!(matches!(result, Err(ExtractError::Io(_))));
    }
}
