use clap::{Parser, Subcommand};
use sheetx::cli;
use sheetx::excel::DEFAULT_SHEET_NAME;
use sheetx::types::{ColumnRef, OutputFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetx")]
#[command(about = "Pull columns out of spreadsheets into .xlsx, CSV or tab-separated text.")]
#[command(long_about = "sheetx - spreadsheet column extraction

Reads one sheet of a workbook (.xlsx, .xlsm, .xlsb, .xls, .ods), keeps a row
range and a set of columns, and writes the result as a new workbook or as
delimited text.

COMMANDS:
  extract  - Extract columns and write them to a file
  sheets   - List the sheets of a workbook
  run      - Run a YAML job file

EXAMPLES:
  sheetx extract book.xlsx -o out.csv -c A,C,F --start 1
  sheetx extract book.xlsx -o out.txt -c 0,2 --sheet 1 --end 200
  sheetx sheets book.xlsx
  sheetx run job.yaml

LOGGING:
  Set RUST_LOG (e.g. RUST_LOG=sheetx=debug) for diagnostic output.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Extract columns from one sheet of a workbook.

Rows and columns are zero-based and absolute: row 0 is the first row of the
sheet and column 0 is column A. Columns can be given as indices or letters
and are written in the order requested.

ROW FILTER:
  Rows whose key column (default B) is empty are skipped, which drops
  trailing blank rows. Use --key-column to pick another column or
  --keep-blank-rows to keep every row in range.

OUTPUT FORMAT:
  Inferred from the output extension (.txt, .tsv, .csv, .xlsx) unless
  --format is given. txt is tab-separated.

EXAMPLES:
  sheetx extract book.xlsx -o out.csv -c A,C --start 1 --end 99
  sheetx extract book.xlsx -o out.xlsx -c 0,3,AA --sheet-name Export")]
    /// Extract columns and write them to a file
    Extract {
        /// Path to the source workbook
        input: PathBuf,

        /// Output file path (.txt, .csv or .xlsx)
        #[arg(short, long)]
        output: PathBuf,

        /// Sheet index (0-based)
        #[arg(short, long, default_value = "0", env = "SHEETX_SHEET")]
        sheet: usize,

        /// First row to read (0-based, inclusive)
        #[arg(long, default_value = "0")]
        start: usize,

        /// Last row to read (0-based, inclusive; -1 or omitted reads to the end)
        #[arg(long, allow_hyphen_values = true)]
        end: Option<i64>,

        /// Columns to keep, as indices or letters (e.g. A,C,4)
        #[arg(short, long, value_delimiter = ',', required = true)]
        columns: Vec<ColumnRef>,

        /// Skip rows where this column is empty (default: B)
        #[arg(short, long)]
        key_column: Option<ColumnRef>,

        /// Keep rows even when the key column is empty
        #[arg(long, conflicts_with = "key_column")]
        keep_blank_rows: bool,

        /// Output format (txt, csv, xlsx); inferred from the output path if omitted
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Worksheet name for .xlsx output
        #[arg(long, default_value = DEFAULT_SHEET_NAME, env = "SHEETX_SHEET_NAME")]
        sheet_name: String,

        /// Show verbose extraction steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the sheets of a workbook with their index and used size
    Sheets {
        /// Path to the workbook
        input: PathBuf,
    },

    #[command(long_about = "Run a YAML job file.

A job describes one extraction and any number of outputs:

  input: book.xlsx
  sheet: 0
  start: 1
  end: -1
  columns: [A, C, 4]
  key_column: B
  outputs:
    - path: out.csv
    - path: out.xlsx
      sheet_name: Data

Relative paths are resolved against the job file's directory.")]
    /// Run a YAML job file
    Run {
        /// Path to the job file
        job: PathBuf,

        /// Show verbose extraction steps
        #[arg(short, long)]
        verbose: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "sheetx=debug" } else { "sheetx=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            output,
            sheet,
            start,
            end,
            columns,
            key_column,
            keep_blank_rows,
            format,
            sheet_name,
            verbose,
        } => {
            init_tracing(verbose);
            cli::extract(cli::ExtractArgs {
                input,
                output,
                sheet,
                start,
                end,
                columns,
                key_column,
                keep_blank_rows,
                format,
                sheet_name,
                verbose,
            })?;
        }

        Commands::Sheets { input } => {
            init_tracing(false);
            cli::sheets(input)?;
        }

        Commands::Run { job, verbose } => {
            init_tracing(verbose);
            cli::run(job, verbose)?;
        }
    }

    Ok(())
}
