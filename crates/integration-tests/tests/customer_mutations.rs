//! Integration tests for customer creation workflows.
//!
//! Requires a running, migrated `PostgreSQL` database; see the crate docs.
//! Run with: cargo test -p crm-integration-tests -- --ignored

use crm_integration_tests::{test_pool, unique_email, unique_name};
use crm_server::db::CustomerRepository;
use crm_server::services::{NewCustomer, bulk_create_customers, create_customer};

fn new_customer(name: &str, email: &str, phone: Option<&str>) -> NewCustomer {
    NewCustomer {
        name: name.to_owned(),
        email: email.to_owned(),
        phone: phone.map(str::to_owned),
    }
}

// ============================================================================
// Single creation
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (CRM_DATABASE_URL)"]
async fn test_create_customer_succeeds() {
    let pool = test_pool().await;
    let email = unique_email("alice");

    let outcome = create_customer(
        &pool,
        new_customer(&unique_name("Alice"), &email, Some("+1234567890")),
    )
    .await;

    assert!(outcome.success, "unexpected errors: {:?}", outcome.errors);
    assert_eq!(outcome.message, "Customer created successfully.");
    assert!(outcome.errors.is_empty());

    let customer = outcome.entity.expect("created customer should be returned");
    assert_eq!(customer.email.as_str(), email);
    assert_eq!(
        customer.phone.as_ref().map(|p| p.as_str()),
        Some("+1234567890")
    );
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (CRM_DATABASE_URL)"]
async fn test_create_customer_without_phone() {
    let pool = test_pool().await;

    let outcome = create_customer(
        &pool,
        new_customer(&unique_name("Bob"), &unique_email("bob"), None),
    )
    .await;

    assert!(outcome.success);
    assert!(outcome.entity.expect("entity").phone.is_none());
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (CRM_DATABASE_URL)"]
async fn test_duplicate_email_rejected_and_not_persisted() {
    let pool = test_pool().await;
    let email = unique_email("dup");

    let first = create_customer(&pool, new_customer("First", &email, None)).await;
    assert!(first.success);

    let second = create_customer(&pool, new_customer("Second", &email, None)).await;
    assert!(!second.success);
    assert!(second.entity.is_none());
    assert_eq!(second.message, "Validation failed.");
    assert_eq!(
        second.errors,
        vec!["A customer with this email already exists."]
    );

    // Exactly one row with that email persists
    let matching = CustomerRepository::new(&pool)
        .list_all()
        .await
        .expect("list_all")
        .into_iter()
        .filter(|c| c.email.as_str() == email)
        .count();
    assert_eq!(matching, 1);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (CRM_DATABASE_URL)"]
async fn test_invalid_phone_rejected_and_not_persisted() {
    let pool = test_pool().await;
    let email = unique_email("badphone");

    let outcome = create_customer(&pool, new_customer("Carol", &email, Some("12345"))).await;

    assert!(!outcome.success);
    assert_eq!(
        outcome.errors,
        vec!["Phone number must be in the format: '+1234567890' or '123-456-7890'"]
    );

    let persisted = CustomerRepository::new(&pool)
        .list_all()
        .await
        .expect("list_all")
        .into_iter()
        .any(|c| c.email.as_str() == email);
    assert!(!persisted, "rejected customer must not be persisted");
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (CRM_DATABASE_URL)"]
async fn test_malformed_email_rejected() {
    let pool = test_pool().await;

    let outcome = create_customer(&pool, new_customer("Eve", "not-an-email", None)).await;

    assert!(!outcome.success);
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].starts_with("Invalid email address:"));
}

// ============================================================================
// Bulk creation
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (CRM_DATABASE_URL)"]
async fn test_bulk_flags_in_batch_duplicate() {
    let pool = test_pool().await;
    let email = unique_email("batch");

    let summary = bulk_create_customers(
        &pool,
        vec![
            new_customer("First", &email, None),
            new_customer("Second", &email, None),
        ],
    )
    .await;

    assert_eq!(summary.success_count, 1);
    assert_eq!(summary.failed_count, 1);
    assert_eq!(summary.results.len(), 2);

    assert!(summary.results[0].success);
    assert!(!summary.results[1].success);
    assert_eq!(
        summary.results[1].errors,
        vec!["A customer with this email already exists in this batch."]
    );
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (CRM_DATABASE_URL)"]
async fn test_bulk_results_stay_in_input_order() {
    let pool = test_pool().await;
    let good_one = unique_email("good1");
    let good_two = unique_email("good2");

    let summary = bulk_create_customers(
        &pool,
        vec![
            new_customer("Good One", &good_one, None),
            new_customer("Bad Phone", &unique_email("bad"), Some("abc-def-ghij")),
            new_customer("Good Two", &good_two, Some("123-456-7890")),
        ],
    )
    .await;

    assert_eq!(summary.success_count, 2);
    assert_eq!(summary.failed_count, 1);

    let emails: Vec<Option<String>> = summary
        .results
        .iter()
        .map(|r| r.entity.as_ref().map(|c| c.email.as_str().to_owned()))
        .collect();
    assert_eq!(emails, vec![Some(good_one), None, Some(good_two)]);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (CRM_DATABASE_URL)"]
async fn test_bulk_store_duplicate_flagged_against_existing_row() {
    let pool = test_pool().await;
    let email = unique_email("existing");

    let first = create_customer(&pool, new_customer("Existing", &email, None)).await;
    assert!(first.success);

    let summary =
        bulk_create_customers(&pool, vec![new_customer("Rejoin", &email, None)]).await;

    assert_eq!(summary.success_count, 0);
    assert_eq!(summary.failed_count, 1);
    assert_eq!(
        summary.results[0].errors,
        vec!["A customer with this email already exists."]
    );
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (CRM_DATABASE_URL)"]
async fn test_bulk_valid_records_commit_despite_failures() {
    let pool = test_pool().await;
    let good = unique_email("survivor");

    let summary = bulk_create_customers(
        &pool,
        vec![
            new_customer("Bad", "still-not-an-email", None),
            new_customer("Good", &good, None),
        ],
    )
    .await;

    assert_eq!(summary.success_count, 1);
    assert_eq!(summary.failed_count, 1);

    let persisted = CustomerRepository::new(&pool)
        .list_all()
        .await
        .expect("list_all")
        .into_iter()
        .any(|c| c.email.as_str() == good);
    assert!(persisted, "valid record must commit independently");
}
