//! Pipeline tests from raw records to a verified star schema.

use std::collections::{BTreeSet, HashSet};

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use proptest::test_runner::Config;
use star_core::{build_star_schema, normalize_records};
use star_model::{NormalizedRecord, RawRecord, StarError};

fn raw(row_id: i64, product_name: &str, order_date: &str, ship_date: &str) -> RawRecord {
    RawRecord {
        row_id,
        order_id: format!("US-2021-{row_id:04}"),
        order_date: order_date.to_string(),
        ship_date: ship_date.to_string(),
        ship_mode: "Standard Class".to_string(),
        customer_id: "DV-13045".to_string(),
        customer_name: "Darrin Van Huff".to_string(),
        segment: "Corporate".to_string(),
        country: "United States".to_string(),
        city: "Los Angeles".to_string(),
        state: "California".to_string(),
        postal_code: Some("90036.0".to_string()),
        region: "West".to_string(),
        product_id: "P1".to_string(),
        category: "Office Supplies".to_string(),
        sub_category: "Labels".to_string(),
        product_name: product_name.to_string(),
        sales: row_id as f64,
    }
}

#[test]
fn most_frequent_product_name_is_resolved() {
    let input = vec![
        raw(1, "Widget", "05/01/2021", "07/01/2021"),
        raw(2, "Widget", "06/01/2021", "07/01/2021"),
        raw(3, "widget", "06/01/2021", "08/01/2021"),
        raw(4, "Widget", "07/01/2021", "09/01/2021"),
    ];
    let normalized = normalize_records(&input);
    let schema = build_star_schema(normalized.as_slice()).unwrap();

    assert_eq!(schema.dim_product.len(), 1);
    assert_eq!(schema.dim_product[0].product_name, "Widget");
    assert_eq!(schema.dim_region[0].postal_code, "90036");
}

#[test]
fn date_dimension_covers_order_and_ship_dates() {
    let input = vec![
        raw(1, "A", "30/12/2020", "02/01/2021"),
        raw(2, "A", "not a date", "15/01/2021"),
    ];
    let normalized = normalize_records(&input);
    assert_eq!(normalized.stats.missing_order_dates, 1);

    let schema = build_star_schema(normalized.as_slice()).unwrap();
    assert_eq!(schema.dim_date.len(), 17);
    assert_eq!(schema.dim_date.first().unwrap().date_key, 20201230);
    assert_eq!(schema.dim_date.last().unwrap().date_key, 20210115);
    assert_eq!(schema.fact_sales[1].order_date_key, None);
    schema.verify().unwrap();
}

#[test]
fn no_valid_dates_is_fatal() {
    let input = vec![raw(1, "A", "", "??"), raw(2, "A", "31/02/2021", "")];
    let normalized = normalize_records(&input);
    let err = build_star_schema(normalized.as_slice()).unwrap_err();
    assert!(matches!(err, StarError::NoValidDates { row_count: 2 }));
}

#[test]
fn postal_formatting_duplicates_collapse() {
    let mut second = raw(2, "A", "01/02/2021", "03/02/2021");
    second.postal_code = Some("90036".to_string());
    let mut first = raw(1, "A", "01/02/2021", "03/02/2021");
    first.sales = second.sales;
    second.order_id = first.order_id.clone();

    let normalized = normalize_records(&[first, second]);
    assert_eq!(normalized.len(), 1);
    assert_eq!(normalized.stats.duplicates_removed, 1);
    assert_eq!(normalized.records[0].row_id, 1);
}

fn record_strategy() -> impl Strategy<Value = NormalizedRecord> {
    (
        0_i64..1_000,
        0_u64..40,
        prop::option::of(0_u64..40),
        prop::sample::select(vec!["Standard Class", "Second Class", "Same Day"]),
        prop::sample::select(vec!["C1", "C2", "C3"]),
        prop::sample::select(vec!["Consumer", "Corporate"]),
        prop::sample::select(vec!["10001", "Unknown", "94110"]),
        prop::sample::select(vec!["P1", "P2", "P3"]),
        prop::sample::select(vec!["Widget", "widget", "Gadget"]),
        prop::sample::select(vec![1.0, 2.5, 100.0]),
    )
        .prop_map(
            |(row_id, ship_offset, order_offset, ship_mode, customer, segment, postal, product, name, sales)| {
                let base = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
                NormalizedRecord {
                    row_id,
                    order_id: format!("O-{}", row_id % 7),
                    order_date: order_offset.map(|days| base + Days::new(days)),
                    ship_date: Some(base + Days::new(ship_offset)),
                    ship_mode: ship_mode.to_string(),
                    customer_id: customer.to_string(),
                    customer_name: format!("Name {customer}"),
                    segment: segment.to_string(),
                    country: "United States".to_string(),
                    city: "New York City".to_string(),
                    state: "New York".to_string(),
                    postal_code: postal.to_string(),
                    region: "East".to_string(),
                    product_id: product.to_string(),
                    category: "Technology".to_string(),
                    sub_category: "Phones".to_string(),
                    product_name: name.to_string(),
                    sales,
                }
            },
        )
}

fn records_strategy() -> impl Strategy<Value = Vec<NormalizedRecord>> {
    prop::collection::vec(record_strategy(), 1..60)
}

proptest! {
    #![proptest_config(Config::with_cases(64))]

    #[test]
    fn dedupe_leaves_no_logical_duplicates(records in records_strategy()) {
        let (kept, removed) = star_core::normalize::dedupe_records(records.clone());
        prop_assert_eq!(kept.len() + removed, records.len());

        let mut seen = HashSet::new();
        for record in &kept {
            let mut key = record.clone();
            key.row_id = 0;
            let key = format!("{key:?}");
            prop_assert!(seen.insert(key));
        }
    }

    #[test]
    fn surrogate_keys_are_dense(records in records_strategy()) {
        let schema = build_star_schema(&records).unwrap();
        let dense = |keys: Vec<u32>| keys == (1..=keys.len() as u32).collect::<Vec<_>>();

        prop_assert!(dense(schema.dim_customer.iter().map(|r| r.customer_key).collect()));
        prop_assert!(dense(schema.dim_product.iter().map(|r| r.product_key).collect()));
        prop_assert!(dense(schema.dim_region.iter().map(|r| r.region_key).collect()));
        prop_assert!(dense(schema.dim_ship_mode.iter().map(|r| r.ship_mode_key).collect()));
        prop_assert!(dense(schema.fact_sales.iter().map(|f| f.sales_id).collect()));
        prop_assert!(schema.dim_date.windows(2).all(|w| w[0].date_key < w[1].date_key));
    }

    #[test]
    fn date_dimension_is_contiguous(records in records_strategy()) {
        let schema = build_star_schema(&records).unwrap();
        let dates = records
            .iter()
            .flat_map(|r| [r.order_date, r.ship_date])
            .flatten();
        let min = dates.clone().min().unwrap();
        let max = dates.max().unwrap();
        let expected = (max - min).num_days() as usize + 1;
        prop_assert_eq!(schema.dim_date.len(), expected);
    }

    #[test]
    fn every_foreign_key_resolves(records in records_strategy()) {
        let schema = build_star_schema(&records).unwrap();
        prop_assert!(schema.verify().is_ok());

        let date_keys: BTreeSet<i32> = schema.dim_date.iter().map(|r| r.date_key).collect();
        let customer_keys: BTreeSet<u32> =
            schema.dim_customer.iter().map(|r| r.customer_key).collect();
        for fact in &schema.fact_sales {
            prop_assert!(customer_keys.contains(&fact.customer_key));
            if let Some(key) = fact.order_date_key {
                prop_assert!(date_keys.contains(&key));
            }
            prop_assert!(fact.ship_date_key.is_some_and(|key| date_keys.contains(&key)));
        }
    }

    #[test]
    fn build_is_idempotent(records in records_strategy()) {
        let first = build_star_schema(&records).unwrap();
        let second = build_star_schema(&records).unwrap();
        prop_assert_eq!(first, second);
    }
}
