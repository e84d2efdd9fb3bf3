//! Aggregation results in their serialized shape.
//!
//! Monetary values here are already rounded to two decimals; rounding happens
//! once, when a summary is produced from full-precision totals.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Structured sales summary for a (possibly filtered) record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub total_sales: f64,
    pub sales_by_category: CategoryTotals,
    pub top_products: Vec<ProductTotal>,
    pub monthly_sales_trend: Vec<MonthTotal>,
}

/// Category totals in descending order of total.
///
/// Serializes as a JSON object whose key order is the vector order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals(pub Vec<(String, f64)>);

impl CategoryTotals {
    pub fn get(&self, category: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, total)| *total)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, total) in &self.0 {
            map.serialize_entry(name, total)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductTotal {
    pub name: String,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    /// `YYYY-MM`.
    pub month: String,
    pub sales: f64,
}

/// Headline figures shown above the dashboard charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total_sales: f64,
    pub order_count: usize,
    pub customer_count: usize,
}
