//! Customer query and mutation handlers.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::db::CustomerRepository;
use crate::error::AppError;
use crate::models::Customer;
use crate::services::{self, MutationOutcome, NewCustomer};
use crate::state::AppState;

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/bulk", post(bulk_create_customers))
}

/// Mutation envelope with the customer under its own key.
#[derive(Debug, Serialize)]
pub struct CustomerEnvelope {
    pub customer: Option<Customer>,
    pub success: bool,
    pub message: String,
    pub errors: Vec<String>,
}

impl From<MutationOutcome<Customer>> for CustomerEnvelope {
    fn from(outcome: MutationOutcome<Customer>) -> Self {
        Self {
            customer: outcome.entity,
            success: outcome.success,
            message: outcome.message,
            errors: outcome.errors,
        }
    }
}

/// Request body for bulk customer creation.
#[derive(Debug, Deserialize)]
pub struct BulkCreateRequest {
    pub customers: Vec<NewCustomer>,
}

/// Response body for bulk customer creation.
#[derive(Debug, Serialize)]
pub struct BulkCreateResponse {
    pub success_count: u32,
    pub failed_count: u32,
    pub results: Vec<CustomerEnvelope>,
}

/// List all customers.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = CustomerRepository::new(state.pool()).list_all().await?;
    Ok(Json(customers))
}

/// Create a single customer.
pub async fn create_customer(
    State(state): State<AppState>,
    Json(input): Json<NewCustomer>,
) -> Json<CustomerEnvelope> {
    let outcome = services::customers::create_customer(state.pool(), input).await;
    Json(outcome.into())
}

/// Create many customers in one call.
pub async fn bulk_create_customers(
    State(state): State<AppState>,
    Json(body): Json<BulkCreateRequest>,
) -> Json<BulkCreateResponse> {
    let summary = services::customers::bulk_create_customers(state.pool(), body.customers).await;
    Json(BulkCreateResponse {
        success_count: summary.success_count,
        failed_count: summary.failed_count,
        results: summary.results.into_iter().map(Into::into).collect(),
    })
}
