//! Order and order item models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crm_core::{CustomerId, OrderId, OrderItemId, ProductId};

/// An order placed by a customer.
///
/// `total_sum` is derived at creation time and equals the sum of the
/// order's item totals; it is never recomputed afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Customer the order belongs to.
    pub customer_id: CustomerId,
    /// When the order was placed (defaults to creation time).
    pub order_date: DateTime<Utc>,
    /// Sum of item totals at creation time.
    pub total_sum: Decimal,
    /// When the row was created (store-maintained).
    pub created_at: DateTime<Utc>,
    /// When the row was last mutated (store-maintained).
    pub updated_at: DateTime<Utc>,
}

/// A line item linking an order to a product.
///
/// Every order has at least one item. Quantity is fixed at 1 at creation
/// time and `item_total` is the product's price when the order was placed.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    /// Unique item ID.
    pub id: OrderItemId,
    /// Order this item belongs to.
    pub order_id: OrderId,
    /// Product this item references.
    pub product_id: ProductId,
    /// Quantity ordered.
    pub quantity: i32,
    /// Price charged for this line.
    pub item_total: Decimal,
}
