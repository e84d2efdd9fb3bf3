//! CLI argument definitions for `star-schema`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "star-schema",
    version,
    about = "Build a retail sales star schema from flat order lines",
    long_about = "Build a dimensional (star) schema from a flat retail order file.\n\n\
                  Produces date, customer, product, region and ship-mode dimensions,\n\
                  a sales fact table, spreadsheet exports, and filtered sales summaries."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the star schema and write both spreadsheet bundles.
    Build(BuildArgs),

    /// Print KPIs and the sales summary for a filtered record set.
    Summary(SummaryArgs),

    /// Print the first rows of every star-schema table.
    Preview(PreviewArgs),
}

#[derive(Parser)]
pub struct BuildArgs {
    /// Delimited order file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory for the spreadsheet bundles (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Replace output files that already exist.
    #[arg(long = "force")]
    pub force: bool,
}

#[derive(Parser)]
pub struct SummaryArgs {
    /// Delimited order file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Earliest order date to include (YYYY-MM-DD).
    #[arg(long = "from", value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Latest order date to include (YYYY-MM-DD).
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Restrict to a category (repeatable).
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Restrict to a region (repeatable).
    #[arg(long = "region", value_name = "NAME")]
    pub regions: Vec<String>,

    /// Restrict to a segment (repeatable).
    #[arg(long = "segment", value_name = "NAME")]
    pub segments: Vec<String>,

    /// Write the summary JSON here (overrides `output.summary_file`).
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of top products to report.
    #[arg(long = "top", value_name = "N")]
    pub top: Option<usize>,
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// Delimited order file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Rows to show per table.
    #[arg(long = "rows", value_name = "N", default_value_t = 15)]
    pub rows: usize,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
