//! Record normalization.
//!
//! Turns raw order lines into [`NormalizedRecord`]s in three steps, in this
//! order:
//!
//! 1. Parse order and ship dates day-first (unparseable -> missing)
//! 2. Canonicalize postal codes (float artifact stripped, missing -> `Unknown`)
//! 3. Drop logical duplicates, keeping the first occurrence
//!
//! Deduplication runs last because normalization changes equality: two rows
//! that differ only in `42420` vs `42420.0` are the same order line.

mod date;
mod dedupe;
mod postal;

use std::time::Instant;

use star_model::{NormalizedRecord, RawRecord, UNKNOWN_POSTAL_CODE};
use tracing::{info, info_span, warn};

pub use date::parse_day_first;
pub use dedupe::dedupe_records;
pub use postal::clean_postal_code;

/// Counters describing what normalization changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub input_rows: usize,
    pub output_rows: usize,
    pub duplicates_removed: usize,
    pub missing_order_dates: usize,
    pub missing_ship_dates: usize,
    pub unknown_postal_codes: usize,
}

/// The cleaned record set plus what it took to get there.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecords {
    pub records: Vec<NormalizedRecord>,
    pub stats: NormalizeStats,
}

impl NormalizedRecords {
    pub fn as_slice(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Normalize a single raw record. Does not deduplicate.
pub fn normalize_record(raw: &RawRecord) -> NormalizedRecord {
    NormalizedRecord {
        row_id: raw.row_id,
        order_id: raw.order_id.clone(),
        order_date: parse_day_first(&raw.order_date),
        ship_date: parse_day_first(&raw.ship_date),
        ship_mode: raw.ship_mode.clone(),
        customer_id: raw.customer_id.clone(),
        customer_name: raw.customer_name.clone(),
        segment: raw.segment.clone(),
        country: raw.country.clone(),
        city: raw.city.clone(),
        state: raw.state.clone(),
        postal_code: clean_postal_code(raw.postal_code.as_deref()),
        region: raw.region.clone(),
        product_id: raw.product_id.clone(),
        category: raw.category.clone(),
        sub_category: raw.sub_category.clone(),
        product_name: raw.product_name.clone(),
        sales: raw.sales,
    }
}

/// Normalize and deduplicate a full raw record set. The input is untouched.
pub fn normalize_records(raw: &[RawRecord]) -> NormalizedRecords {
    let span = info_span!("normalize", input_rows = raw.len());
    let _guard = span.enter();
    let start = Instant::now();

    let normalized: Vec<NormalizedRecord> = raw.iter().map(normalize_record).collect();
    let (records, duplicates_removed) = dedupe_records(normalized);

    let stats = NormalizeStats {
        input_rows: raw.len(),
        output_rows: records.len(),
        duplicates_removed,
        missing_order_dates: records.iter().filter(|r| r.order_date.is_none()).count(),
        missing_ship_dates: records.iter().filter(|r| r.ship_date.is_none()).count(),
        unknown_postal_codes: records
            .iter()
            .filter(|r| r.postal_code == UNKNOWN_POSTAL_CODE)
            .count(),
    };

    if stats.missing_order_dates > 0 || stats.missing_ship_dates > 0 {
        warn!(
            missing_order_dates = stats.missing_order_dates,
            missing_ship_dates = stats.missing_ship_dates,
            "dates recorded as missing"
        );
    }
    info!(
        row_count = stats.output_rows,
        duplicates_removed = stats.duplicates_removed,
        unknown_postal_codes = stats.unknown_postal_codes,
        duration_ms = start.elapsed().as_millis(),
        "normalization complete"
    );

    NormalizedRecords { records, stats }
}
