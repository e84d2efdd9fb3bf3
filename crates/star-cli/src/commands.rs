use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use star_core::{
    Fingerprint, NamedTable, NormalizedRecords, SchemaFrames, StarSchema, build_star_schema,
    normalize_records,
};
use star_ingest::read_raw_records_with_options;
use star_report::{
    RecordFilter, kpis, sales_by_region, sales_by_segment, summarize, write_summary_json,
    write_workbook,
};
use tracing::{info, info_span, warn};

use crate::cli::{BuildArgs, PreviewArgs, SummaryArgs};
use crate::config::StarConfig;
use crate::types::{BuildResult, OutputFile, SummaryResult, WriteOutcome};

fn load_records(input: &Path, config: &StarConfig) -> Result<NormalizedRecords> {
    let raw = read_raw_records_with_options(input, config.ingest_options())
        .with_context(|| format!("read {}", input.display()))?;
    Ok(normalize_records(&raw))
}

fn build_verified(records: &NormalizedRecords) -> Result<StarSchema> {
    let schema = build_star_schema(records.as_slice()).context("build star schema")?;
    schema.verify().context("verify star schema")?;
    Ok(schema)
}

fn write_if_allowed(
    label: &'static str,
    path: PathBuf,
    overwrite: bool,
    tables: &[NamedTable],
) -> Result<OutputFile> {
    if path.exists() && !overwrite {
        warn!(path = %path.display(), "output exists, skipping (use --force to replace)");
        return Ok(OutputFile {
            label,
            path,
            outcome: WriteOutcome::Skipped,
        });
    }
    write_workbook(tables, &path).with_context(|| format!("write {}", path.display()))?;
    Ok(OutputFile {
        label,
        path,
        outcome: WriteOutcome::Written,
    })
}

pub fn run_build(args: &BuildArgs, config: &StarConfig) -> Result<BuildResult> {
    let span = info_span!("build", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let records = load_records(&args.input, config)?;
    let fingerprint = Fingerprint::of_records(records.as_slice());
    let schema = build_verified(&records)?;
    let frames = SchemaFrames::new(records.as_slice(), &schema).context("materialize tables")?;

    let output_dir = args.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let overwrite = args.force || config.output.overwrite;
    let outputs = vec![
        write_if_allowed(
            "Star schema",
            output_dir.join(&config.output.star_schema_file),
            overwrite,
            &frames.star_schema_bundle(),
        )?,
        write_if_allowed(
            "Normalized views",
            output_dir.join(&config.output.normalized_views_file),
            overwrite,
            &frames.normalized_views(),
        )?,
    ];

    info!(
        fingerprint = %fingerprint,
        duration_ms = start.elapsed().as_millis(),
        "build complete"
    );
    Ok(BuildResult {
        input: args.input.clone(),
        fingerprint: fingerprint.to_hex(),
        stats: records.stats,
        row_counts: schema.row_counts(),
        outputs,
    })
}

pub fn run_summary(args: &SummaryArgs, config: &StarConfig) -> Result<SummaryResult> {
    let span = info_span!("summary", input = %args.input.display());
    let _guard = span.enter();

    let records = load_records(&args.input, config)?;
    let filter = RecordFilter::new()
        .with_date_range(args.from, args.to)
        .with_categories(args.categories.iter().cloned())
        .with_regions(args.regions.iter().cloned())
        .with_segments(args.segments.iter().cloned());
    let filtered = filter.apply(records.as_slice());
    if filtered.is_empty() {
        warn!("no records match the filter");
    }

    let top = args.top.unwrap_or(config.summary.top_products);
    let summary = summarize(&filtered, top);
    let output = args
        .output
        .clone()
        .or_else(|| config.output.summary_file.as_ref().map(PathBuf::from));
    if let Some(path) = &output {
        write_summary_json(&summary, path).with_context(|| format!("write {}", path.display()))?;
    }

    Ok(SummaryResult {
        matched_records: filtered.len(),
        total_records: records.len(),
        kpis: kpis(&filtered),
        sales_by_segment: sales_by_segment(&filtered),
        sales_by_region: sales_by_region(&filtered),
        summary,
        output,
    })
}

pub fn run_preview(args: &PreviewArgs, config: &StarConfig) -> Result<Vec<NamedTable>> {
    let span = info_span!("preview", input = %args.input.display());
    let _guard = span.enter();

    let records = load_records(&args.input, config)?;
    let schema = build_verified(&records)?;
    let frames = SchemaFrames::new(records.as_slice(), &schema).context("materialize tables")?;
    Ok(frames.preview(args.rows))
}
