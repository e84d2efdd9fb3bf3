//! Polars materialization of the record set and star-schema tables.
//!
//! Dimension and fact columns use snake_case names; the cleaned record table
//! keeps the source column names so it reads like the input file. Dates are
//! rendered as ISO `YYYY-MM-DD` strings and missing dates as nulls.

use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame};
use star_model::{
    CustomerRow, DateRow, NormalizedRecord, ProductRow, REQUIRED_COLUMNS, RegionRow, Result,
    SalesFact, ShipModeRow,
};

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn text<'a, T: 'a>(
    name: &str,
    rows: impl IntoIterator<Item = &'a T>,
    field: impl Fn(&'a T) -> &'a str,
) -> Column {
    let values: Vec<&str> = rows.into_iter().map(field).collect();
    Column::new(name.into(), values)
}

/// Cleaned record table with the source column names, in source order.
pub fn records_frame(records: &[NormalizedRecord]) -> Result<DataFrame> {
    let [
        row_id,
        order_id,
        order_date,
        ship_date,
        ship_mode,
        customer_id,
        customer_name,
        segment,
        country,
        city,
        state,
        postal_code,
        region,
        product_id,
        category,
        sub_category,
        product_name,
        sales,
    ] = REQUIRED_COLUMNS;

    let columns = vec![
        Column::new(
            row_id.into(),
            records.iter().map(|r| r.row_id).collect::<Vec<i64>>(),
        ),
        text(order_id, records, |r| r.order_id.as_str()),
        Column::new(
            order_date.into(),
            records
                .iter()
                .map(|r| r.order_date.map(iso_date))
                .collect::<Vec<Option<String>>>(),
        ),
        Column::new(
            ship_date.into(),
            records
                .iter()
                .map(|r| r.ship_date.map(iso_date))
                .collect::<Vec<Option<String>>>(),
        ),
        text(ship_mode, records, |r| r.ship_mode.as_str()),
        text(customer_id, records, |r| r.customer_id.as_str()),
        text(customer_name, records, |r| r.customer_name.as_str()),
        text(segment, records, |r| r.segment.as_str()),
        text(country, records, |r| r.country.as_str()),
        text(city, records, |r| r.city.as_str()),
        text(state, records, |r| r.state.as_str()),
        text(postal_code, records, |r| r.postal_code.as_str()),
        text(region, records, |r| r.region.as_str()),
        text(product_id, records, |r| r.product_id.as_str()),
        text(category, records, |r| r.category.as_str()),
        text(sub_category, records, |r| r.sub_category.as_str()),
        text(product_name, records, |r| r.product_name.as_str()),
        Column::new(
            sales.into(),
            records.iter().map(|r| r.sales).collect::<Vec<f64>>(),
        ),
    ];
    Ok(DataFrame::new(columns)?)
}

pub fn date_frame(rows: &[DateRow]) -> Result<DataFrame> {
    let columns = vec![
        Column::new(
            "date_key".into(),
            rows.iter().map(|r| r.date_key).collect::<Vec<i32>>(),
        ),
        Column::new(
            "full_date".into(),
            rows.iter()
                .map(|r| iso_date(r.full_date))
                .collect::<Vec<String>>(),
        ),
        Column::new("day".into(), rows.iter().map(|r| r.day).collect::<Vec<u32>>()),
        Column::new(
            "month".into(),
            rows.iter().map(|r| r.month).collect::<Vec<u32>>(),
        ),
        text("month_name", rows, |r| r.month_name.as_str()),
        Column::new(
            "quarter".into(),
            rows.iter().map(|r| r.quarter).collect::<Vec<u32>>(),
        ),
        Column::new("year".into(), rows.iter().map(|r| r.year).collect::<Vec<i32>>()),
        Column::new(
            "week_of_year".into(),
            rows.iter().map(|r| r.week_of_year).collect::<Vec<u32>>(),
        ),
    ];
    Ok(DataFrame::new(columns)?)
}

pub fn customer_frame(rows: &[CustomerRow]) -> Result<DataFrame> {
    let columns = vec![
        Column::new(
            "customer_key".into(),
            rows.iter().map(|r| r.customer_key).collect::<Vec<u32>>(),
        ),
        text("customer_id", rows, |r| r.customer_id.as_str()),
        text("customer_name", rows, |r| r.customer_name.as_str()),
        text("segment", rows, |r| r.segment.as_str()),
    ];
    Ok(DataFrame::new(columns)?)
}

pub fn product_frame(rows: &[ProductRow]) -> Result<DataFrame> {
    let columns = vec![
        Column::new(
            "product_key".into(),
            rows.iter().map(|r| r.product_key).collect::<Vec<u32>>(),
        ),
        text("product_id", rows, |r| r.product_id.as_str()),
        text("category", rows, |r| r.category.as_str()),
        text("sub_category", rows, |r| r.sub_category.as_str()),
        text("product_name", rows, |r| r.product_name.as_str()),
    ];
    Ok(DataFrame::new(columns)?)
}

pub fn region_frame(rows: &[RegionRow]) -> Result<DataFrame> {
    let columns = vec![
        Column::new(
            "region_key".into(),
            rows.iter().map(|r| r.region_key).collect::<Vec<u32>>(),
        ),
        text("country", rows, |r| r.country.as_str()),
        text("region", rows, |r| r.region.as_str()),
        text("state", rows, |r| r.state.as_str()),
        text("city", rows, |r| r.city.as_str()),
        text("postal_code", rows, |r| r.postal_code.as_str()),
    ];
    Ok(DataFrame::new(columns)?)
}

pub fn ship_mode_frame(rows: &[ShipModeRow]) -> Result<DataFrame> {
    let columns = vec![
        Column::new(
            "ship_mode_key".into(),
            rows.iter().map(|r| r.ship_mode_key).collect::<Vec<u32>>(),
        ),
        text("ship_mode", rows, |r| r.ship_mode.as_str()),
    ];
    Ok(DataFrame::new(columns)?)
}

pub fn fact_frame(rows: &[SalesFact]) -> Result<DataFrame> {
    let columns = vec![
        Column::new(
            "sales_id".into(),
            rows.iter().map(|r| r.sales_id).collect::<Vec<u32>>(),
        ),
        Column::new(
            "row_id".into(),
            rows.iter().map(|r| r.row_id).collect::<Vec<i64>>(),
        ),
        text("order_id", rows, |r| r.order_id.as_str()),
        Column::new(
            "order_date_key".into(),
            rows.iter().map(|r| r.order_date_key).collect::<Vec<Option<i32>>>(),
        ),
        Column::new(
            "ship_date_key".into(),
            rows.iter().map(|r| r.ship_date_key).collect::<Vec<Option<i32>>>(),
        ),
        Column::new(
            "customer_key".into(),
            rows.iter().map(|r| r.customer_key).collect::<Vec<u32>>(),
        ),
        Column::new(
            "product_key".into(),
            rows.iter().map(|r| r.product_key).collect::<Vec<u32>>(),
        ),
        Column::new(
            "region_key".into(),
            rows.iter().map(|r| r.region_key).collect::<Vec<u32>>(),
        ),
        Column::new(
            "ship_mode_key".into(),
            rows.iter().map(|r| r.ship_mode_key).collect::<Vec<u32>>(),
        ),
        Column::new(
            "sales_amount".into(),
            rows.iter().map(|r| r.sales_amount).collect::<Vec<f64>>(),
        ),
    ];
    Ok(DataFrame::new(columns)?)
}
