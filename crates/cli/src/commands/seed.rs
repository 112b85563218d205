//! Seed the database with demo data.
//!
//! Inserts demo customers and products through the same mutation
//! workflows the API uses, then places one order for the first customer.
//! Re-running is harmless: duplicate emails are flagged by validation and
//! reported as skipped.

use rust_decimal::Decimal;
use secrecy::SecretString;
use tracing::{info, warn};

use crm_server::db::{self, CustomerRepository, ProductRepository};
use crm_server::services::{
    NewCustomer, NewOrder, NewProduct, bulk_create_customers, create_order, create_product,
};

/// Seed demo data.
///
/// # Errors
///
/// Returns an error if the database URL is missing or the connection
/// fails. Per-record validation failures are logged, not fatal.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("CRM_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "CRM_DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    // Customers, through the bulk workflow
    let customers = vec![
        NewCustomer {
            name: "Alice Johnson".to_owned(),
            email: "alice@example.com".to_owned(),
            phone: Some("+1234567890".to_owned()),
        },
        NewCustomer {
            name: "Bob Smith".to_owned(),
            email: "bob@example.com".to_owned(),
            phone: Some("123-456-7890".to_owned()),
        },
        NewCustomer {
            name: "Carol Davis".to_owned(),
            email: "carol@example.com".to_owned(),
            phone: None,
        },
    ];
    let summary = bulk_create_customers(&pool, customers).await;
    info!(
        created = summary.success_count,
        skipped = summary.failed_count,
        "Seeded customers"
    );

    // Products
    let products = vec![
        NewProduct {
            name: "Laptop".to_owned(),
            price: Decimal::new(99999, 2),
            stock: 10,
        },
        NewProduct {
            name: "Mouse".to_owned(),
            price: Decimal::new(2999, 2),
            stock: 100,
        },
        NewProduct {
            name: "Keyboard".to_owned(),
            price: Decimal::new(7999, 2),
            stock: 50,
        },
    ];
    let mut created = 0_u32;
    for product in products {
        let outcome = create_product(&pool, product).await;
        if outcome.success {
            created += 1;
        } else {
            warn!(errors = ?outcome.errors, "Product seed skipped");
        }
    }
    info!(created, "Seeded products");

    // One demo order: first customer, first two products
    let customer = CustomerRepository::new(&pool)
        .list_all()
        .await?
        .into_iter()
        .next()
        .ok_or("no customers available for the demo order")?;
    let product_ids: Vec<_> = ProductRepository::new(&pool)
        .list_all()
        .await?
        .into_iter()
        .take(2)
        .map(|p| p.id)
        .collect();

    let outcome = create_order(
        &pool,
        NewOrder {
            customer_id: customer.id,
            product_ids,
            order_date: None,
        },
    )
    .await;
    if let Some(order) = &outcome.entity {
        info!(order_id = %order.id, total = %order.total_sum, "Seeded demo order");
    } else {
        warn!(errors = ?outcome.errors, "Demo order skipped");
    }

    info!("Seeding complete!");
    Ok(())
}
