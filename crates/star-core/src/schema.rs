//! The assembled star schema and its integrity checks.

use std::collections::BTreeSet;
use std::time::Instant;

use star_model::{
    CustomerRow, DateRow, Dimension, NormalizedRecord, ProductRow, RegionRow, Result, SalesFact,
    ShipModeRow, StarError,
};
use tracing::{info, info_span};

use crate::dimension::{Dimensions, build_dimensions};
use crate::fact::build_fact_table;
use crate::keys::dense_keys;

/// Table name of the fact table.
pub const FACT_SALES: &str = "fact_sales";

/// Five dimension tables plus the sales fact table.
///
/// Immutable once built; rebuilt from scratch for every input.
#[derive(Debug, Clone, PartialEq)]
pub struct StarSchema {
    pub dim_date: Vec<DateRow>,
    pub dim_customer: Vec<CustomerRow>,
    pub dim_product: Vec<ProductRow>,
    pub dim_region: Vec<RegionRow>,
    pub dim_ship_mode: Vec<ShipModeRow>,
    pub fact_sales: Vec<SalesFact>,
}

/// Build dimensions, then facts keyed on their lookups.
pub fn build_star_schema(records: &[NormalizedRecord]) -> Result<StarSchema> {
    let span = info_span!("build_star_schema", row_count = records.len());
    let _guard = span.enter();
    let start = Instant::now();

    let (dimensions, lookups) = build_dimensions(records)?;
    let fact_sales = build_fact_table(records, &lookups)?;
    let Dimensions {
        date,
        customer,
        product,
        region,
        ship_mode,
    } = dimensions;

    let schema = StarSchema {
        dim_date: date,
        dim_customer: customer,
        dim_product: product,
        dim_region: region,
        dim_ship_mode: ship_mode,
        fact_sales,
    };
    info!(
        fact_rows = schema.fact_sales.len(),
        duration_ms = start.elapsed().as_millis(),
        "star schema built"
    );
    Ok(schema)
}

impl StarSchema {
    /// `(table name, row count)` for every table, dimensions first.
    pub fn row_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            (Dimension::Date.table_name(), self.dim_date.len()),
            (Dimension::Customer.table_name(), self.dim_customer.len()),
            (Dimension::Product.table_name(), self.dim_product.len()),
            (Dimension::Region.table_name(), self.dim_region.len()),
            (Dimension::ShipMode.table_name(), self.dim_ship_mode.len()),
            (FACT_SALES, self.fact_sales.len()),
        ]
    }

    /// Check the structural invariants of the schema.
    ///
    /// - surrogate keys of every dimension, and fact ids, are exactly `1..=N`
    ///   in row order
    /// - date keys are strictly increasing
    /// - every foreign key of every fact row exists in its dimension
    pub fn verify(&self) -> Result<()> {
        check_dense(
            Dimension::Customer.table_name(),
            self.dim_customer.iter().map(|row| row.customer_key),
        )?;
        check_dense(
            Dimension::Product.table_name(),
            self.dim_product.iter().map(|row| row.product_key),
        )?;
        check_dense(
            Dimension::Region.table_name(),
            self.dim_region.iter().map(|row| row.region_key),
        )?;
        check_dense(
            Dimension::ShipMode.table_name(),
            self.dim_ship_mode.iter().map(|row| row.ship_mode_key),
        )?;
        check_dense(FACT_SALES, self.fact_sales.iter().map(|fact| fact.sales_id))?;

        for pair in self.dim_date.windows(2) {
            if pair[1].date_key <= pair[0].date_key {
                return Err(StarError::DateKeyOrder {
                    previous: pair[0].date_key,
                    found: pair[1].date_key,
                });
            }
        }

        self.verify_references()
    }

    fn verify_references(&self) -> Result<()> {
        let dates: BTreeSet<i32> = self.dim_date.iter().map(|row| row.date_key).collect();
        let customers = self.dim_customer.len();
        let products = self.dim_product.len();
        let regions = self.dim_region.len();
        let ship_modes = self.dim_ship_mode.len();

        for fact in &self.fact_sales {
            for date_key in [fact.order_date_key, fact.ship_date_key].into_iter().flatten() {
                if !dates.contains(&date_key) {
                    return Err(dangling(Dimension::Date, date_key, fact));
                }
            }
            // Dense keys were checked above, so membership is a range test.
            let surrogate = [
                (Dimension::Customer, fact.customer_key, customers),
                (Dimension::Product, fact.product_key, products),
                (Dimension::Region, fact.region_key, regions),
                (Dimension::ShipMode, fact.ship_mode_key, ship_modes),
            ];
            for (dimension, key, len) in surrogate {
                if key == 0 || key as usize > len {
                    return Err(dangling(dimension, key, fact));
                }
            }
        }
        Ok(())
    }
}

fn dangling(dimension: Dimension, key: impl ToString, fact: &SalesFact) -> StarError {
    StarError::Integrity {
        dimension,
        natural_key: key.to_string(),
        row_id: fact.row_id,
    }
}

fn check_dense(table: &'static str, keys: impl Iterator<Item = u32>) -> Result<()> {
    for (position, (expected, found)) in dense_keys(usize::MAX).zip(keys).enumerate() {
        if expected != found {
            return Err(StarError::SurrogateKeyGap {
                table,
                position,
                expected,
                found,
            });
        }
    }
    Ok(())
}
