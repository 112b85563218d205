//! Business services: validation and mutation workflows.
//!
//! Each mutation follows the same two-phase shape: a validation phase with
//! no side effects, then a commit phase against the store. Every outcome -
//! success, validation rejection, or store failure - is reported through
//! the uniform [`MutationOutcome`] envelope; nothing escapes as a transport
//! error.

pub mod customers;
pub mod orders;
pub mod outcome;
pub mod products;
pub mod validate;

pub use customers::{NewCustomer, bulk_create_customers, create_customer};
pub use orders::{NewOrder, create_order};
pub use outcome::{BulkCreateSummary, MutationOutcome};
pub use products::{NewProduct, create_product};
pub use validate::ValidationError;
