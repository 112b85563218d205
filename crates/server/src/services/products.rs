//! Product mutation workflow.

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;

use super::outcome::MutationOutcome;
use super::validate::validate_price;
use crate::db::ProductRepository;
use crate::models::Product;

const MSG_CREATED: &str = "Product created successfully.";
const MSG_VALIDATION_FAILED: &str = "Validation failed.";
const MSG_COMMIT_FAILED: &str = "An error occurred while creating the product.";

/// Input for creating a product.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Unit price; must be non-negative.
    pub price: Decimal,
    /// Units in stock.
    pub stock: i32,
}

/// Create a product.
///
/// Validation phase checks the price; the commit phase is a single insert.
pub async fn create_product(pool: &PgPool, input: NewProduct) -> MutationOutcome<Product> {
    if let Err(e) = validate_price(input.price) {
        tracing::debug!(price = %input.price, "product rejected by validation");
        return MutationOutcome::rejected(MSG_VALIDATION_FAILED, &[e]);
    }

    let repo = ProductRepository::new(pool);
    match repo.insert(&input.name, input.price, input.stock).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id, "product created");
            MutationOutcome::created(product, MSG_CREATED)
        }
        Err(e) => {
            tracing::warn!(name = %input.name, error = %e, "product insert failed");
            MutationOutcome::failed(MSG_COMMIT_FAILED, e)
        }
    }
}
