//! Schema Assembler.
//!
//! Bundles the cleaned record table and the six star-schema tables as named,
//! ordered frames. The normalized-views bundle is the same frames under
//! normal-form labels; nothing is recomputed for it.

use polars::prelude::DataFrame;
use star_model::{Dimension, NormalizedRecord, Result};
use tracing::debug;

use crate::frames::{
    customer_frame, date_frame, fact_frame, product_frame, records_frame, region_frame,
    ship_mode_frame,
};
use crate::schema::{FACT_SALES, StarSchema};

/// Sheet name of the cleaned record table in the star-schema bundle.
pub const RAW_CLEAN: &str = "raw_clean";

/// A table with the name it is exported and previewed under.
#[derive(Debug, Clone)]
pub struct NamedTable {
    pub name: &'static str,
    pub frame: DataFrame,
}

impl NamedTable {
    fn new(name: &'static str, frame: &DataFrame) -> Self {
        Self {
            name,
            frame: frame.clone(),
        }
    }
}

/// Every exportable table materialized once.
#[derive(Debug, Clone)]
pub struct SchemaFrames {
    pub raw_clean: DataFrame,
    pub dim_date: DataFrame,
    pub dim_customer: DataFrame,
    pub dim_product: DataFrame,
    pub dim_region: DataFrame,
    pub dim_ship_mode: DataFrame,
    pub fact_sales: DataFrame,
}

impl SchemaFrames {
    pub fn new(records: &[NormalizedRecord], schema: &StarSchema) -> Result<Self> {
        let frames = Self {
            raw_clean: records_frame(records)?,
            dim_date: date_frame(&schema.dim_date)?,
            dim_customer: customer_frame(&schema.dim_customer)?,
            dim_product: product_frame(&schema.dim_product)?,
            dim_region: region_frame(&schema.dim_region)?,
            dim_ship_mode: ship_mode_frame(&schema.dim_ship_mode)?,
            fact_sales: fact_frame(&schema.fact_sales)?,
        };
        debug!(tables = 7, "schema frames materialized");
        Ok(frames)
    }

    /// The five dimensions followed by the fact table.
    pub fn star_tables(&self) -> Vec<NamedTable> {
        vec![
            NamedTable::new(Dimension::Date.table_name(), &self.dim_date),
            NamedTable::new(Dimension::Customer.table_name(), &self.dim_customer),
            NamedTable::new(Dimension::Product.table_name(), &self.dim_product),
            NamedTable::new(Dimension::Region.table_name(), &self.dim_region),
            NamedTable::new(Dimension::ShipMode.table_name(), &self.dim_ship_mode),
            NamedTable::new(FACT_SALES, &self.fact_sales),
        ]
    }

    /// Cleaned record table, then [`SchemaFrames::star_tables`].
    pub fn star_schema_bundle(&self) -> Vec<NamedTable> {
        let mut tables = vec![NamedTable::new(RAW_CLEAN, &self.raw_clean)];
        tables.extend(self.star_tables());
        tables
    }

    /// The same tables grouped by normal-form milestone: the atomic table,
    /// the entity tables, then the key-normalized dimension and fact tables.
    pub fn normalized_views(&self) -> Vec<NamedTable> {
        vec![
            NamedTable::new("1NF_raw", &self.raw_clean),
            NamedTable::new("2NF_customer", &self.dim_customer),
            NamedTable::new("2NF_product", &self.dim_product),
            NamedTable::new("2NF_region", &self.dim_region),
            NamedTable::new("3NF_dim_date", &self.dim_date),
            NamedTable::new("3NF_dim_ship_mode", &self.dim_ship_mode),
            NamedTable::new("3NF_fact_sales", &self.fact_sales),
        ]
    }

    /// First `rows` rows of each star-schema table.
    pub fn preview(&self, rows: usize) -> Vec<NamedTable> {
        self.star_tables()
            .into_iter()
            .map(|table| NamedTable {
                name: table.name,
                frame: table.frame.head(Some(rows)),
            })
            .collect()
    }
}
