//! Order mutation workflow.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;

use crm_core::{CustomerId, ProductId};

use super::outcome::MutationOutcome;
use super::validate::ValidationError;
use crate::db::orders::NewOrderLine;
use crate::db::{CustomerRepository, OrderRepository, ProductRepository};
use crate::models::Order;

const MSG_CREATED: &str = "Order created successfully.";
const MSG_CUSTOMER_VALIDATION_FAILED: &str = "Customer validation failed.";
const MSG_PRODUCT_VALIDATION_FAILED: &str = "Product validation failed.";
const MSG_COMMIT_FAILED: &str = "An error occurred while creating the order.";

/// Input for creating an order.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
    /// Customer placing the order.
    pub customer_id: CustomerId,
    /// Products to order. Duplicate ids collapse: each distinct id
    /// contributes one line with quantity 1.
    pub product_ids: Vec<ProductId>,
    /// When the order was placed; defaults to now.
    pub order_date: Option<DateTime<Utc>>,
}

/// Create an order with one line per distinct product, all-or-nothing.
///
/// Validation phase: the customer must exist (checked before any
/// transaction is opened), the product list must be non-empty, and every
/// referenced product must exist - all missing ids are collected into the
/// error list rather than failing on the first. Commit phase: the order
/// header and its items are written in a single transaction; any failure
/// there persists nothing.
pub async fn create_order(pool: &PgPool, input: NewOrder) -> MutationOutcome<Order> {
    let customers = CustomerRepository::new(pool);
    match customers.get_by_id(input.customer_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            tracing::debug!(customer_id = %input.customer_id, "order rejected: unknown customer");
            return MutationOutcome::rejected(
                MSG_CUSTOMER_VALIDATION_FAILED,
                &[ValidationError::CustomerNotFound(input.customer_id)],
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "customer lookup failed");
            return MutationOutcome::failed(MSG_COMMIT_FAILED, e);
        }
    }

    if input.product_ids.is_empty() {
        return MutationOutcome::rejected(
            MSG_PRODUCT_VALIDATION_FAILED,
            &[ValidationError::EmptyProductSelection],
        );
    }

    // Distinct ids, first-occurrence order.
    let mut seen = HashSet::new();
    let distinct_ids: Vec<ProductId> = input
        .product_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    let products = ProductRepository::new(pool);
    let found = match products.find_by_ids(&distinct_ids).await {
        Ok(found) => found,
        Err(e) => {
            tracing::error!(error = %e, "product lookup failed");
            return MutationOutcome::failed(MSG_COMMIT_FAILED, e);
        }
    };

    let found_ids: HashSet<ProductId> = found.iter().map(|p| p.id).collect();
    let missing: Vec<ValidationError> = distinct_ids
        .iter()
        .filter(|id| !found_ids.contains(id))
        .map(|id| ValidationError::ProductNotFound(*id))
        .collect();
    if !missing.is_empty() {
        tracing::debug!(missing = missing.len(), "order rejected: unknown products");
        return MutationOutcome::rejected(MSG_PRODUCT_VALIDATION_FAILED, &missing);
    }

    let total_sum: Decimal = found.iter().map(|p| p.price).sum();
    let lines: Vec<NewOrderLine> = found
        .iter()
        .map(|p| NewOrderLine {
            product_id: p.id,
            item_total: p.price,
        })
        .collect();
    let order_date = input.order_date.unwrap_or_else(Utc::now);

    let orders = OrderRepository::new(pool);
    match orders
        .create_with_items(input.customer_id, order_date, total_sum, &lines)
        .await
    {
        Ok(order) => {
            tracing::info!(order_id = %order.id, total = %order.total_sum, "order created");
            MutationOutcome::created(order, MSG_CREATED)
        }
        Err(e) => {
            tracing::warn!(customer_id = %input.customer_id, error = %e, "order insert failed");
            MutationOutcome::failed(MSG_COMMIT_FAILED, e)
        }
    }
}
