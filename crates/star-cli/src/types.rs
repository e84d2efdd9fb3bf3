use std::path::PathBuf;

use star_core::NormalizeStats;
use star_model::{Kpis, SalesSummary};

/// What happened to one output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// Already present and overwriting was not requested.
    Skipped,
}

#[derive(Debug)]
pub struct OutputFile {
    pub label: &'static str,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

#[derive(Debug)]
pub struct BuildResult {
    pub input: PathBuf,
    pub fingerprint: String,
    pub stats: NormalizeStats,
    pub row_counts: Vec<(&'static str, usize)>,
    pub outputs: Vec<OutputFile>,
}

#[derive(Debug)]
pub struct SummaryResult {
    pub matched_records: usize,
    pub total_records: usize,
    pub kpis: Kpis,
    pub summary: SalesSummary,
    pub sales_by_segment: Vec<(String, f64)>,
    pub sales_by_region: Vec<(String, f64)>,
    /// Where the JSON went; `None` means it belongs on stdout.
    pub output: Option<PathBuf>,
}
