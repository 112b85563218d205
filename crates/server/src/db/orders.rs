//! Order repository for database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crm_core::{CustomerId, OrderId, OrderItemId, ProductId};

use super::RepositoryError;
use crate::models::{Order, OrderItem};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_id: i64,
    order_date: DateTime<Utc>,
    total_sum: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            customer_id: CustomerId::new(row.customer_id),
            order_date: row.order_date,
            total_sum: row.total_sum,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Internal row type for `PostgreSQL` order item queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    product_id: i64,
    quantity: i32,
    item_total: Decimal,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::new(row.id),
            order_id: OrderId::new(row.order_id),
            product_id: ProductId::new(row.product_id),
            quantity: row.quantity,
            item_total: row.item_total,
        }
    }
}

/// One line of a new order: the product and the price charged for it.
#[derive(Debug, Clone, Copy)]
pub struct NewOrderLine {
    /// Product being ordered.
    pub product_id: ProductId,
    /// Price charged for this line (the product's price at order time).
    pub item_total: Decimal,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, customer_id, order_date, total_sum, created_at, updated_at
            FROM orders
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List the items belonging to an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items_for_order(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<OrderItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT id, order_id, product_id, quantity, item_total
            FROM order_items
            WHERE order_id = $1
            ORDER BY id
            ",
        )
        .bind(order_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create an order together with its line items, all-or-nothing.
    ///
    /// Inserts the order header and one item per line inside a single
    /// transaction; any failure rolls the whole order back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails; nothing is
    /// persisted in that case.
    pub async fn create_with_items(
        &self,
        customer_id: CustomerId,
        order_date: DateTime<Utc>,
        total_sum: Decimal,
        lines: &[NewOrderLine],
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order_row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (customer_id, order_date, total_sum)
            VALUES ($1, $2, $3)
            RETURNING id, customer_id, order_date, total_sum, created_at, updated_at
            ",
        )
        .bind(customer_id.as_i64())
        .bind(order_date)
        .bind(total_sum)
        .fetch_one(&mut *tx)
        .await?;

        for line in lines {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, product_id, quantity, item_total)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(order_row.id)
            .bind(line.product_id.as_i64())
            .bind(1_i32)
            .bind(line.item_total)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order_row.into())
    }
}
