//! Product query and mutation handlers.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::models::Product;
use crate::services::{self, MutationOutcome, NewProduct};
use crate::state::AppState;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new().route("/products", get(list_products).post(create_product))
}

/// Mutation envelope with the product under its own key.
#[derive(Debug, Serialize)]
pub struct ProductEnvelope {
    pub product: Option<Product>,
    pub success: bool,
    pub message: String,
    pub errors: Vec<String>,
}

impl From<MutationOutcome<Product>> for ProductEnvelope {
    fn from(outcome: MutationOutcome<Product>) -> Self {
        Self {
            product: outcome.entity,
            success: outcome.success,
            message: outcome.message,
            errors: outcome.errors,
        }
    }
}

/// List all products.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(Json(products))
}

/// Create a product.
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<NewProduct>,
) -> Json<ProductEnvelope> {
    let outcome = services::products::create_product(state.pool(), input).await;
    Json(outcome.into())
}
