//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Ergostat - run the survey statistics pipeline against a dataset
#[derive(Parser, Debug)]
#[command(name = "ergostat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input survey dataset (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the full analysis (descriptive, association and regression
    /// reports) as JSON to this path
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Write the fully derived dataset (recoded scores, region flags,
    /// binary outcomes) to this path (CSV or Parquet by extension)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for a full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}
