//! Integration tests for the CRM backend.
//!
//! These tests talk to a real `PostgreSQL` database through the service
//! layer and are `#[ignore]`d by default so the workspace builds and
//! tests without one.
//!
//! # Running Tests
//!
//! ```bash
//! # Point at a migrated test database
//! export CRM_DATABASE_URL=postgres://localhost/crm_test
//! cargo run -p crm-cli -- migrate
//!
//! # Run the ignored suites
//! cargo test -p crm-integration-tests -- --ignored
//! ```
//!
//! Tests never truncate tables; every test works with uuid-randomized
//! emails and freshly inserted rows so suites can run against a shared
//! database repeatedly.

use secrecy::SecretString;
use sqlx::PgPool;
use uuid::Uuid;

/// Connect to the test database named by `CRM_DATABASE_URL`.
///
/// # Panics
///
/// Panics if the variable is unset or the connection fails; the suites
/// are `#[ignore]`d, so this only fires when explicitly requested.
pub async fn test_pool() -> PgPool {
    let url = std::env::var("CRM_DATABASE_URL")
        .expect("CRM_DATABASE_URL must be set for integration tests");
    crm_server::db::create_pool(&SecretString::from(url))
        .await
        .expect("failed to connect to the test database")
}

/// A unique email for this test run.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", Uuid::new_v4())
}

/// A unique display name for this test run.
#[must_use]
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix} {}", Uuid::new_v4())
}
