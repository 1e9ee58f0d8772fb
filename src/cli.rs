use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Merge JSON documents into a single CSV table", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the columns discovered across the JSON inputs
    Columns(ColumnsArgs),
    /// Check that every JSON input parses
    Validate(ValidateArgs),
    /// Inspect or edit the persisted column selection
    Select(SelectArgs),
    /// Convert the JSON inputs into CSV
    Convert(ConvertArgs),
}

#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// JSON input files, in order ('-' reads stdin)
    #[arg(short = 'i', long = "input", action = clap::ArgAction::Append)]
    pub inputs: Vec<PathBuf>,
    /// Inline JSON documents, appended after any --input files
    #[arg(long = "json", action = clap::ArgAction::Append)]
    pub json: Vec<String>,
    /// Character encoding of the input files (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Args)]
pub struct SelectArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Selection store file (defaults to $JSON_CSV_STATE)
    #[arg(long = "state")]
    pub state: Option<PathBuf>,
    /// Toggle a column in or out of the selection (name taken verbatim)
    #[arg(long = "toggle", action = clap::ArgAction::Append)]
    pub toggle: Vec<String>,
    /// Select every available column
    #[arg(long = "all", conflicts_with = "none")]
    pub all: bool,
    /// Clear the selection
    #[arg(long = "none")]
    pub none: bool,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Emit these columns, in this order (comma-separated, repeatable)
    #[arg(short = 'C', long = "columns", action = clap::ArgAction::Append)]
    pub columns: Vec<String>,
    /// Emit this column, name taken verbatim (repeatable, after any --columns)
    #[arg(long = "column", action = clap::ArgAction::Append)]
    pub column: Vec<String>,
    /// Selection store file used when no columns are given (defaults to $JSON_CSV_STATE)
    #[arg(long = "state")]
    pub state: Option<PathBuf>,
    /// Output CSV file or directory (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Character encoding for the output file/stdout (defaults to utf-8)
    #[arg(long = "output-encoding")]
    pub output_encoding: Option<String>,
    /// Render the result as a table on stdout instead of CSV, optionally capped to N rows
    #[arg(
        long = "preview",
        num_args = 0..=1,
        default_missing_value = "0",
        conflicts_with_all = ["output", "output_encoding"]
    )]
    pub preview: Option<usize>,
}

/// Splits repeatable comma-separated column arguments into trimmed names.
pub fn split_column_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|s| s.split(','))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
