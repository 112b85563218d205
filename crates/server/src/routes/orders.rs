//! Order query and mutation handlers.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::db::OrderRepository;
use crate::error::AppError;
use crate::models::Order;
use crate::services::{self, MutationOutcome, NewOrder};
use crate::state::AppState;

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new().route("/orders", get(list_orders).post(create_order))
}

/// Mutation envelope with the order under its own key.
#[derive(Debug, Serialize)]
pub struct OrderEnvelope {
    pub order: Option<Order>,
    pub success: bool,
    pub message: String,
    pub errors: Vec<String>,
}

impl From<MutationOutcome<Order>> for OrderEnvelope {
    fn from(outcome: MutationOutcome<Order>) -> Self {
        Self {
            order: outcome.entity,
            success: outcome.success,
            message: outcome.message,
            errors: outcome.errors,
        }
    }
}

/// List all orders.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, AppError> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;
    Ok(Json(orders))
}

/// Create an order.
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<NewOrder>,
) -> Json<OrderEnvelope> {
    let outcome = services::orders::create_order(state.pool(), input).await;
    Json(outcome.into())
}
