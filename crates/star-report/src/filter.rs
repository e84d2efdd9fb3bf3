//! Dashboard-style record filtering.
//!
//! Every criterion is optional and an unset criterion matches everything.
//! Filters only select records; they never modify them.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use star_model::NormalizedRecord;

/// Selection over the normalized record set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Inclusive lower bound on order date.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on order date.
    pub to: Option<NaiveDate>,
    pub categories: BTreeSet<String>,
    pub regions: BTreeSet<String>,
    pub segments: BTreeSet<String>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.segments = segments.into_iter().map(Into::into).collect();
        self
    }

    fn has_date_range(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// Whether `record` passes every criterion.
    ///
    /// With a date range set, a record without an order date never matches.
    pub fn matches(&self, record: &NormalizedRecord) -> bool {
        if self.has_date_range() {
            let Some(order_date) = record.order_date else {
                return false;
            };
            if self.from.is_some_and(|from| order_date < from)
                || self.to.is_some_and(|to| order_date > to)
            {
                return false;
            }
        }
        member(&self.categories, &record.category)
            && member(&self.regions, &record.region)
            && member(&self.segments, &record.segment)
    }

    /// The matching records, in input order.
    pub fn apply<'a>(&self, records: &'a [NormalizedRecord]) -> Vec<&'a NormalizedRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

fn member(allowed: &BTreeSet<String>, value: &str) -> bool {
    allowed.is_empty() || allowed.contains(value)
}

/// The choices a dashboard offers for each filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub regions: Vec<String>,
    pub segments: Vec<String>,
    /// Earliest and latest order date, if any order date is present.
    pub order_dates: Option<(NaiveDate, NaiveDate)>,
}

impl FilterOptions {
    pub fn from_records(records: &[NormalizedRecord]) -> Self {
        let distinct = |field: fn(&NormalizedRecord) -> &str| -> Vec<String> {
            records
                .iter()
                .map(field)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(str::to_string)
                .collect()
        };
        let mut order_dates = records.iter().filter_map(|r| r.order_date);
        let order_dates = order_dates.next().map(|first| {
            order_dates.fold((first, first), |(min, max), date| {
                (min.min(date), max.max(date))
            })
        });

        Self {
            categories: distinct(|r| r.category.as_str()),
            regions: distinct(|r| r.region.as_str()),
            segments: distinct(|r| r.segment.as_str()),
            order_dates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str, region: &str, segment: &str, day: Option<u32>) -> NormalizedRecord {
        NormalizedRecord {
            row_id: 1,
            order_id: "O".to_string(),
            order_date: day.and_then(|d| NaiveDate::from_ymd_opt(2021, 3, d)),
            ship_date: None,
            ship_mode: "Same Day".to_string(),
            customer_id: "C".to_string(),
            customer_name: "N".to_string(),
            segment: segment.to_string(),
            country: "United States".to_string(),
            city: "X".to_string(),
            state: "Y".to_string(),
            postal_code: "Unknown".to_string(),
            region: region.to_string(),
            product_id: "P".to_string(),
            category: category.to_string(),
            sub_category: "S".to_string(),
            product_name: "PN".to_string(),
            sales: 1.0,
        }
    }

    fn ymd(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2021, 3, day)
    }

    #[test]
    fn empty_filter_matches_everything() {
        let records = vec![
            record("Furniture", "West", "Consumer", Some(1)),
            record("Technology", "East", "Corporate", None),
        ];
        assert_eq!(RecordFilter::new().apply(&records).len(), 2);
    }

    #[test]
    fn date_range_is_inclusive_and_drops_missing_dates() {
        let records = vec![
            record("A", "West", "Consumer", Some(1)),
            record("A", "West", "Consumer", Some(5)),
            record("A", "West", "Consumer", Some(10)),
            record("A", "West", "Consumer", Some(11)),
            record("A", "West", "Consumer", None),
        ];
        let filter = RecordFilter::new().with_date_range(ymd(5), ymd(10));
        let days: Vec<_> = filter
            .apply(&records)
            .iter()
            .map(|r| r.order_date)
            .collect();
        assert_eq!(days, vec![ymd(5), ymd(10)]);

        let open_ended = RecordFilter::new().with_date_range(ymd(10), None);
        assert_eq!(open_ended.apply(&records).len(), 2);
    }

    #[test]
    fn set_criteria_combine() {
        let records = vec![
            record("Furniture", "West", "Consumer", Some(1)),
            record("Furniture", "East", "Consumer", Some(1)),
            record("Technology", "West", "Consumer", Some(1)),
            record("Furniture", "West", "Corporate", Some(1)),
        ];
        let filter = RecordFilter::new()
            .with_categories(["Furniture"])
            .with_regions(["West", "South"])
            .with_segments(["Consumer"]);
        assert_eq!(filter.apply(&records).len(), 1);
    }

    #[test]
    fn options_are_sorted_and_distinct() {
        let records = vec![
            record("Technology", "West", "Consumer", Some(9)),
            record("Furniture", "East", "Consumer", None),
            record("Furniture", "West", "Corporate", Some(2)),
        ];
        let options = FilterOptions::from_records(&records);
        assert_eq!(options.categories, vec!["Furniture", "Technology"]);
        assert_eq!(options.regions, vec!["East", "West"]);
        assert_eq!(options.segments, vec!["Consumer", "Corporate"]);
        assert_eq!(options.order_dates, ymd(2).zip(ymd(9)));
    }
}
