//! Aggregation/Summary layer.
//!
//! Works on the normalized records (optionally pre-filtered), not on the star
//! schema. Totals are accumulated at full precision and rounded to two
//! decimals only when placed in an output value.

use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use star_model::{
    CategoryTotals, Kpis, MonthTotal, NormalizedRecord, ProductTotal, SalesSummary,
};
use tracing::debug;

/// Number of products in a default summary.
pub const DEFAULT_TOP_PRODUCTS: usize = 10;

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Full-precision totals per group, largest first; equal totals by name.
pub fn grouped_totals<R, F>(records: &[R], key: F) -> Vec<(String, f64)>
where
    R: Borrow<NormalizedRecord>,
    F: Fn(&NormalizedRecord) -> &str,
{
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for record in records {
        let record = record.borrow();
        *totals.entry(key(record)).or_insert(0.0) += record.sales;
    }
    let mut totals: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(name, total)| (name.to_string(), total))
        .collect();
    totals.sort_by(|(left_name, left), (right_name, right)| {
        right.total_cmp(left).then_with(|| left_name.cmp(right_name))
    });
    totals
}

fn rounded(totals: Vec<(String, f64)>) -> Vec<(String, f64)> {
    totals
        .into_iter()
        .map(|(name, total)| (name, round2(total)))
        .collect()
}

pub fn total_sales<R: Borrow<NormalizedRecord>>(records: &[R]) -> f64 {
    records.iter().map(|r| r.borrow().sales).sum()
}

/// Category totals, largest first.
pub fn sales_by_category<R: Borrow<NormalizedRecord>>(records: &[R]) -> CategoryTotals {
    CategoryTotals(rounded(grouped_totals(records, |r| r.category.as_str())))
}

/// Segment totals, largest first.
pub fn sales_by_segment<R: Borrow<NormalizedRecord>>(records: &[R]) -> Vec<(String, f64)> {
    rounded(grouped_totals(records, |r| r.segment.as_str()))
}

/// Region totals, largest first.
pub fn sales_by_region<R: Borrow<NormalizedRecord>>(records: &[R]) -> Vec<(String, f64)> {
    rounded(grouped_totals(records, |r| r.region.as_str()))
}

/// The `limit` best-selling products by product name.
///
/// Grouping is by the name as written on each record, so spellings that
/// differ are ranked separately.
pub fn top_products<R: Borrow<NormalizedRecord>>(records: &[R], limit: usize) -> Vec<ProductTotal> {
    grouped_totals(records, |r| r.product_name.as_str())
        .into_iter()
        .take(limit)
        .map(|(name, total)| ProductTotal {
            name,
            sales: round2(total),
        })
        .collect()
}

/// Sales per calendar month of the order date, oldest first.
///
/// Records without an order date are left out.
pub fn monthly_sales_trend<R: Borrow<NormalizedRecord>>(records: &[R]) -> Vec<MonthTotal> {
    let mut months: BTreeMap<String, f64> = BTreeMap::new();
    for record in records {
        let record = record.borrow();
        if let Some(date) = record.order_date {
            *months.entry(date.format("%Y-%m").to_string()).or_insert(0.0) += record.sales;
        }
    }
    months
        .into_iter()
        .map(|(month, total)| MonthTotal {
            month,
            sales: round2(total),
        })
        .collect()
}

/// Full summary of `records`.
pub fn summarize<R: Borrow<NormalizedRecord>>(records: &[R], top_n: usize) -> SalesSummary {
    let summary = SalesSummary {
        total_sales: round2(total_sales(records)),
        sales_by_category: sales_by_category(records),
        top_products: top_products(records, top_n),
        monthly_sales_trend: monthly_sales_trend(records),
    };
    debug!(
        records = records.len(),
        categories = summary.sales_by_category.len(),
        months = summary.monthly_sales_trend.len(),
        "summary computed"
    );
    summary
}

/// Total sales plus distinct order and customer counts.
pub fn kpis<R: Borrow<NormalizedRecord>>(records: &[R]) -> Kpis {
    let orders: BTreeSet<&str> = records
        .iter()
        .map(|r| r.borrow().order_id.as_str())
        .collect();
    let customers: BTreeSet<&str> = records
        .iter()
        .map(|r| r.borrow().customer_id.as_str())
        .collect();
    Kpis {
        total_sales: round2(total_sales(records)),
        order_count: orders.len(),
        customer_count: customers.len(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record(category: &str, product: &str, date: Option<(i32, u32, u32)>, sales: f64) -> NormalizedRecord {
        NormalizedRecord {
            row_id: 1,
            order_id: format!("O-{category}"),
            order_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            ship_date: None,
            ship_mode: "Standard Class".to_string(),
            customer_id: format!("C-{product}"),
            customer_name: "N".to_string(),
            segment: "Consumer".to_string(),
            country: "United States".to_string(),
            city: "X".to_string(),
            state: "Y".to_string(),
            postal_code: "Unknown".to_string(),
            region: "West".to_string(),
            product_id: "P".to_string(),
            category: category.to_string(),
            sub_category: "S".to_string(),
            product_name: product.to_string(),
            sales,
        }
    }

    #[test]
    fn category_totals_descend() {
        let records = vec![
            record("A", "x", None, 100.0),
            record("A", "y", None, 50.0),
            record("B", "z", None, 30.0),
        ];
        let totals = sales_by_category(&records);
        assert_eq!(
            totals.0,
            vec![("A".to_string(), 150.0), ("B".to_string(), 30.0)]
        );
    }

    #[test]
    fn monthly_trend_is_chronological() {
        let records = vec![
            record("A", "x", Some((2021, 2, 1)), 7.0),
            record("A", "x", Some((2021, 1, 5)), 10.0),
            record("A", "x", Some((2021, 1, 20)), 5.0),
            record("A", "x", None, 1000.0),
        ];
        let trend: Vec<(String, f64)> = monthly_sales_trend(&records)
            .into_iter()
            .map(|m| (m.month, m.sales))
            .collect();
        assert_eq!(
            trend,
            vec![("2021-01".to_string(), 15.0), ("2021-02".to_string(), 7.0)]
        );
    }

    #[test]
    fn top_products_limit_and_ties() {
        let records = vec![
            record("A", "Pen", None, 5.0),
            record("A", "Desk", None, 50.0),
            record("A", "Lamp", None, 5.0),
            record("A", "Pen", None, 1.0),
        ];
        let top = top_products(&records, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Desk");
        assert_eq!(top[1].name, "Pen");
        assert_eq!(top[1].sales, 6.0);

        let tied: Vec<_> = top_products(&records[..3], 3)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(tied, vec!["Desk", "Lamp", "Pen"]);
    }

    #[test]
    fn rounding_happens_once() {
        let records = vec![
            record("A", "x", None, 0.004),
            record("A", "x", None, 0.004),
        ];
        assert_eq!(round2(0.004), 0.0);
        assert_eq!(summarize(&records, 10).total_sales, 0.01);
    }

    #[test]
    fn works_on_filtered_references() {
        let records = vec![
            record("A", "x", None, 1.0),
            record("B", "y", None, 2.0),
        ];
        let filtered: Vec<&NormalizedRecord> = records.iter().filter(|r| r.category == "B").collect();
        let kpis = kpis(&filtered);
        assert_eq!(kpis.total_sales, 2.0);
        assert_eq!(kpis.order_count, 1);
        assert_eq!(kpis.customer_count, 1);
    }

    #[test]
    fn empty_input() {
        let records: Vec<NormalizedRecord> = Vec::new();
        let summary = summarize(&records, DEFAULT_TOP_PRODUCTS);
        assert_eq!(summary.total_sales, 0.0);
        assert!(summary.sales_by_category.is_empty());
        assert!(summary.top_products.is_empty());
        assert!(summary.monthly_sales_trend.is_empty());
    }
}
