/// One order line expressed in surrogate keys. Grain: order line.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesFact {
    /// Dense, 1-based, in normalized input order.
    pub sales_id: u32,
    pub row_id: i64,
    pub order_id: String,
    /// `None` only when the order date itself was missing in the source.
    pub order_date_key: Option<i32>,
    /// `None` only when the ship date itself was missing in the source.
    pub ship_date_key: Option<i32>,
    pub customer_key: u32,
    pub product_key: u32,
    pub region_key: u32,
    pub ship_mode_key: u32,
    pub sales_amount: f64,
}
