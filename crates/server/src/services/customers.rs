//! Customer mutation workflows.

use std::collections::HashSet;

use serde::Deserialize;
use sqlx::PgPool;

use crm_core::Email;

use super::outcome::{BulkCreateSummary, MutationOutcome};
use super::validate::{ScreenedCustomer, screen_customer};
use crate::db::{CustomerRepository, RepositoryError};
use crate::models::Customer;

const MSG_CREATED: &str = "Customer created successfully.";
const MSG_VALIDATION_FAILED: &str = "Validation failed.";
const MSG_COMMIT_FAILED: &str = "An error occurred while creating the customer.";

/// Input for creating a customer.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    /// Display name.
    pub name: String,
    /// Email address (raw; validated by the workflow).
    pub email: String,
    /// Optional phone number (raw; validated by the workflow).
    pub phone: Option<String>,
}

/// Create a single customer.
///
/// Validation phase: email structure, store-level duplicate, phone format
/// (all failures collected). Commit phase: one insert; a store-level
/// failure - e.g. a unique violation racing a concurrent create - is
/// reported in the envelope with the store error's text.
pub async fn create_customer(pool: &PgPool, input: NewCustomer) -> MutationOutcome<Customer> {
    let repo = CustomerRepository::new(pool);

    let store_taken = match store_duplicate(&repo, &input.email).await {
        Ok(taken) => taken,
        Err(e) => {
            tracing::error!(error = %e, "duplicate-email lookup failed");
            return MutationOutcome::failed(MSG_COMMIT_FAILED, e);
        }
    };

    let mut batch = HashSet::new();
    match screen_customer(
        &input.name,
        &input.email,
        input.phone.as_deref(),
        store_taken,
        &mut batch,
    ) {
        Ok(screened) => commit_customer(&repo, &screened).await,
        Err(errors) => {
            tracing::debug!(email = %input.email, ?errors, "customer rejected by validation");
            MutationOutcome::rejected(MSG_VALIDATION_FAILED, &errors)
        }
    }
}

/// Create many customers in one call.
///
/// Phase one screens every record with no side effects, tracking
/// already-accepted emails in a per-call set so intra-batch collisions are
/// caught alongside store-level duplicates. Phase two commits each
/// validated record independently: a per-record store failure downgrades
/// only that record, previously committed rows stay.
pub async fn bulk_create_customers(
    pool: &PgPool,
    inputs: Vec<NewCustomer>,
) -> BulkCreateSummary<Customer> {
    let repo = CustomerRepository::new(pool);
    let total = inputs.len();

    // Validation phase: no side effects.
    let mut batch = HashSet::new();
    let mut screened: Vec<Result<ScreenedCustomer, MutationOutcome<Customer>>> =
        Vec::with_capacity(total);

    for input in &inputs {
        let store_taken = match store_duplicate(&repo, &input.email).await {
            Ok(taken) => taken,
            Err(e) => {
                tracing::error!(error = %e, "duplicate-email lookup failed");
                screened.push(Err(MutationOutcome::failed(MSG_COMMIT_FAILED, e)));
                continue;
            }
        };

        screened.push(
            screen_customer(
                &input.name,
                &input.email,
                input.phone.as_deref(),
                store_taken,
                &mut batch,
            )
            .map_err(|errors| MutationOutcome::rejected(MSG_VALIDATION_FAILED, &errors)),
        );
    }

    // Commit phase: each validated record commits on its own.
    let mut results = Vec::with_capacity(total);
    for record in screened {
        match record {
            Ok(customer) => results.push(commit_customer(&repo, &customer).await),
            Err(outcome) => results.push(outcome),
        }
    }

    let summary = BulkCreateSummary::from_results(results);
    tracing::info!(
        total,
        success = summary.success_count,
        failed = summary.failed_count,
        "bulk customer creation finished"
    );
    summary
}

/// Store-level duplicate check for a raw email input.
///
/// A structurally invalid email cannot be in the store; it reports as not
/// taken and the screening step rejects it instead.
async fn store_duplicate(
    repo: &CustomerRepository<'_>,
    raw_email: &str,
) -> Result<bool, RepositoryError> {
    match Email::parse(raw_email) {
        Ok(email) => repo.email_exists(&email).await,
        Err(_) => Ok(false),
    }
}

/// Commit one screened customer, folding the result into an envelope.
async fn commit_customer(
    repo: &CustomerRepository<'_>,
    screened: &ScreenedCustomer,
) -> MutationOutcome<Customer> {
    match repo
        .insert(&screened.name, &screened.email, screened.phone.as_ref())
        .await
    {
        Ok(customer) => {
            tracing::info!(customer_id = %customer.id, "customer created");
            MutationOutcome::created(customer, MSG_CREATED)
        }
        Err(e) => {
            tracing::warn!(email = %screened.email, error = %e, "customer insert failed");
            MutationOutcome::failed(MSG_COMMIT_FAILED, e)
        }
    }
}
