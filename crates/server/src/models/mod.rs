//! Domain models.
//!
//! Plain data structs for the three business entities and the order line
//! items that link orders to products. Row-to-model conversions live next
//! to the repositories in [`crate::db`].

pub mod customer;
pub mod order;
pub mod product;

pub use customer::Customer;
pub use order::{Order, OrderItem};
pub use product::Product;
