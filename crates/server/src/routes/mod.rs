//! HTTP route handlers.
//!
//! Thin pass-throughs over [`crate::services`] and [`crate::db`]: handlers
//! deserialize input, call the workflow, and serialize the envelope.
//! Mutation handlers always answer 200 - validation and commit failures
//! are payload, not transport errors.

pub mod customers;
pub mod orders;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(customers::router())
        .merge(products::router())
        .merge(orders::router())
}
