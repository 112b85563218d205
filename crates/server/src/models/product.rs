//! Product model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crm_core::ProductId;

/// A product.
///
/// Price is a non-negative decimal; stock is a plain integer counter.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price, non-negative.
    pub price: Decimal,
    /// Units in stock.
    pub stock: i32,
    /// When the row was created (store-maintained).
    pub created_at: DateTime<Utc>,
    /// When the row was last mutated (store-maintained).
    pub updated_at: DateTime<Utc>,
}
