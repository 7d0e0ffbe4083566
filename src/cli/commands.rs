use crate::config::JobFile;
use crate::error::{ExtractError, ExtractResult};
use crate::excel::{self, column_index_to_letter, ExcelExtractor, ExtractRequest};
use crate::types::{ColumnRef, OutputFormat, RowFilter, RowRange, Table};
use crate::writer;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments for the extract command
#[derive(Debug, Clone)]
pub struct ExtractArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub sheet: usize,
    pub start: usize,
    /// Negative means no limit
    pub end: Option<i64>,
    pub columns: Vec<ColumnRef>,
    pub key_column: Option<ColumnRef>,
    pub keep_blank_rows: bool,
    pub format: Option<OutputFormat>,
    pub sheet_name: String,
    pub verbose: bool,
}

/// Execute the extract command
pub fn extract(args: ExtractArgs) -> ExtractResult<()> {
    println!("{}", "📄 sheetx - Extracting columns".bold().green());
    println!("   Input:  {}", args.input.display());
    println!("   Output: {}\n", args.output.display());

    if args.columns.is_empty() {
        return Err(ExtractError::Config(
            "no columns requested (use --columns)".to_string(),
        ));
    }

    let format = match args.format {
        Some(format) => format,
        None => OutputFormat::from_path(&args.output)?,
    };
    let filter = RowFilter::from_options(args.key_column.as_ref(), args.keep_blank_rows)?;
    let request = ExtractRequest::new(args.columns.clone())
        .sheet(args.sheet)
        .rows(RowRange::from_signed(args.start, args.end))
        .filter(filter);

    if args.verbose {
        print_request(&request);
    }

    let table = ExcelExtractor::new(&args.input).run(&request)?;

    if args.verbose {
        println!("{}", format!("💾 Writing {} output...", format).cyan());
    }
    writer::write_table(&args.output, &table, format, &args.sheet_name)?;
    info!(output = %args.output.display(), rows = table.row_count(), "extract complete");

    print_summary(&table, &args.output);
    Ok(())
}

/// Execute the sheets command
pub fn sheets(input: PathBuf) -> ExtractResult<()> {
    println!("{}", "📄 sheetx - Workbook sheets".bold().green());
    println!("   File: {}\n", input.display());

    let sheets = excel::list_sheets(&input)?;
    if sheets.is_empty() {
        println!("{}", "   (no sheets)".yellow());
        return Ok(());
    }

    for sheet in &sheets {
        let size = if sheet.width == 0 {
            "empty".to_string()
        } else {
            format!(
                "{} rows, columns A..{}",
                sheet.height,
                column_index_to_letter(sheet.width - 1)
            )
        };
        println!(
            "   [{}] {} ({})",
            sheet.index.to_string().bold(),
            sheet.name.bright_blue().bold(),
            size
        );
    }
    println!();

    Ok(())
}

/// Execute the run command
pub fn run(job_path: PathBuf, verbose: bool) -> ExtractResult<()> {
    println!("{}", "📄 sheetx - Running job".bold().green());
    println!("   Job: {}\n", job_path.display());

    let job = JobFile::load(&job_path)?;
    let request = job.request()?;

    if verbose {
        println!("   Input: {}", job.input.display());
        print_request(&request);
    }

    let table = ExcelExtractor::new(&job.input).run(&request)?;

    for output in &job.outputs {
        let format = output.format()?;
        if verbose {
            println!(
                "{}",
                format!("💾 Writing {} ({})...", output.path.display(), format).cyan()
            );
        }
        writer::write_table(&output.path, &table, format, output.sheet_name())?;
        info!(output = %output.path.display(), rows = table.row_count(), "job output written");
    }

    println!("{}", "✅ Job Complete!".bold().green());
    println!("   {} rows extracted", table.row_count());
    for output in &job.outputs {
        println!("   → {}", output.path.display());
    }
    println!();

    Ok(())
}

fn print_request(request: &ExtractRequest) {
    let columns: Vec<String> = request.columns.iter().map(ToString::to_string).collect();
    let end = request
        .rows
        .end
        .map_or_else(|| "last".to_string(), |e| e.to_string());
    println!("{}", "📖 Reading workbook...".cyan());
    println!("   Sheet:   {}", request.sheet);
    println!("   Rows:    {}..={}", request.rows.start, end);
    println!("   Columns: {}", columns.join(", "));
    match request.filter.key_column() {
        Some(key) => println!(
            "   Skip rows where column {} is empty",
            column_index_to_letter(key)
        ),
        None => println!("   Keeping blank rows"),
    }
    println!();
}

fn print_summary(table: &Table, output: &Path) {
    println!("{}", "✅ Extract Complete!".bold().green());
    println!("   {} rows written to {}\n", table.row_count(), output.display());
}
