//! Integration tests for order creation.
//!
//! Requires a running, migrated `PostgreSQL` database; see the crate docs.
//! Run with: cargo test -p crm-integration-tests -- --ignored

use rust_decimal::Decimal;

use crm_core::{CustomerId, ProductId};
use crm_integration_tests::{test_pool, unique_email, unique_name};
use crm_server::db::OrderRepository;
use crm_server::services::{
    NewCustomer, NewOrder, NewProduct, create_customer, create_order, create_product,
};
use sqlx::PgPool;

async fn seeded_customer(pool: &PgPool) -> CustomerId {
    let outcome = create_customer(
        pool,
        NewCustomer {
            name: unique_name("Orderer"),
            email: unique_email("orderer"),
            phone: None,
        },
    )
    .await;
    outcome.entity.expect("customer should be created").id
}

async fn seeded_product(pool: &PgPool, cents: i64) -> ProductId {
    let outcome = create_product(
        pool,
        NewProduct {
            name: unique_name("Item"),
            price: Decimal::new(cents, 2),
            stock: 10,
        },
    )
    .await;
    outcome.entity.expect("product should be created").id
}

async fn orders_for(pool: &PgPool, customer_id: CustomerId) -> usize {
    OrderRepository::new(pool)
        .list_all()
        .await
        .expect("list_all")
        .into_iter()
        .filter(|o| o.customer_id == customer_id)
        .count()
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (CRM_DATABASE_URL)"]
async fn test_create_order_succeeds_with_exact_total() {
    let pool = test_pool().await;
    let customer_id = seeded_customer(&pool).await;
    let first = seeded_product(&pool, 1999).await;
    let second = seeded_product(&pool, 501).await;

    let outcome = create_order(
        &pool,
        NewOrder {
            customer_id,
            product_ids: vec![first, second],
            order_date: None,
        },
    )
    .await;

    assert!(outcome.success, "unexpected errors: {:?}", outcome.errors);
    assert_eq!(outcome.message, "Order created successfully.");

    let order = outcome.entity.expect("created order should be returned");
    assert_eq!(order.customer_id, customer_id);
    assert_eq!(order.total_sum, Decimal::new(2500, 2));

    let items = OrderRepository::new(&pool)
        .items_for_order(order.id)
        .await
        .expect("items_for_order");
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.quantity == 1));
    let item_sum: Decimal = items.iter().map(|i| i.item_total).sum();
    assert_eq!(order.total_sum, item_sum);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (CRM_DATABASE_URL)"]
async fn test_empty_product_selection_rejected() {
    let pool = test_pool().await;
    let customer_id = seeded_customer(&pool).await;

    let outcome = create_order(
        &pool,
        NewOrder {
            customer_id,
            product_ids: vec![],
            order_date: None,
        },
    )
    .await;

    assert!(!outcome.success);
    assert!(outcome.entity.is_none());
    assert_eq!(outcome.message, "Product validation failed.");
    assert_eq!(
        outcome.errors,
        vec!["At least one product must be selected."]
    );
    assert_eq!(orders_for(&pool, customer_id).await, 0);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (CRM_DATABASE_URL)"]
async fn test_missing_product_aborts_whole_order() {
    let pool = test_pool().await;
    let customer_id = seeded_customer(&pool).await;
    let valid = seeded_product(&pool, 1000).await;
    let missing = ProductId::new(i64::MAX);

    let outcome = create_order(
        &pool,
        NewOrder {
            customer_id,
            product_ids: vec![valid, missing],
            order_date: None,
        },
    )
    .await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, "Product validation failed.");
    assert_eq!(outcome.errors, vec![format!("Product not found: {missing}")]);

    // All-or-nothing: no order or items persist for this customer
    assert_eq!(orders_for(&pool, customer_id).await, 0);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (CRM_DATABASE_URL)"]
async fn test_all_missing_products_are_collected() {
    let pool = test_pool().await;
    let customer_id = seeded_customer(&pool).await;
    let first = ProductId::new(i64::MAX);
    let second = ProductId::new(i64::MAX - 1);

    let outcome = create_order(
        &pool,
        NewOrder {
            customer_id,
            product_ids: vec![first, second],
            order_date: None,
        },
    )
    .await;

    assert!(!outcome.success);
    assert_eq!(
        outcome.errors,
        vec![
            format!("Product not found: {first}"),
            format!("Product not found: {second}"),
        ]
    );
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (CRM_DATABASE_URL)"]
async fn test_unknown_customer_rejected_before_products() {
    let pool = test_pool().await;
    let product = seeded_product(&pool, 1500).await;
    let ghost = CustomerId::new(i64::MAX);

    let outcome = create_order(
        &pool,
        NewOrder {
            customer_id: ghost,
            product_ids: vec![product],
            order_date: None,
        },
    )
    .await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, "Customer validation failed.");
    assert_eq!(outcome.errors, vec![format!("Customer not found: {ghost}")]);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (CRM_DATABASE_URL)"]
async fn test_duplicate_product_ids_collapse_to_one_line() {
    let pool = test_pool().await;
    let customer_id = seeded_customer(&pool).await;
    let product = seeded_product(&pool, 2000).await;

    let outcome = create_order(
        &pool,
        NewOrder {
            customer_id,
            product_ids: vec![product, product, product],
            order_date: None,
        },
    )
    .await;

    assert!(outcome.success);
    let order = outcome.entity.expect("order");
    assert_eq!(order.total_sum, Decimal::new(2000, 2));

    let items = OrderRepository::new(&pool)
        .items_for_order(order.id)
        .await
        .expect("items_for_order");
    assert_eq!(items.len(), 1);
}
