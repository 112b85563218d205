//! Customer model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crm_core::{CustomerId, Email, Phone};

/// A customer.
///
/// Email is unique across all customers (case-sensitive exact match);
/// phone is optional and pattern-validated at the boundary.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: Email,
    /// Optional phone number.
    pub phone: Option<Phone>,
    /// When the row was created (store-maintained).
    pub created_at: DateTime<Utc>,
    /// When the row was last mutated (store-maintained).
    pub updated_at: DateTime<Utc>,
}
