//! Field-level validation.
//!
//! Pure functions and a typed error per failure kind. The `Display` impls
//! carry the exact human-readable strings surfaced in mutation envelopes.

use std::collections::HashSet;

use rust_decimal::Decimal;
use thiserror::Error;

use crm_core::{CustomerId, Email, EmailError, Phone, ProductId};

/// A single field-level validation failure.
///
/// One variant per failure kind; the `Display` text is the message shown
/// to callers in the envelope's error list.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// The email belongs to an existing customer row.
    #[error("A customer with this email already exists.")]
    DuplicateEmail,

    /// The email was already accepted earlier in the same bulk call.
    #[error("A customer with this email already exists in this batch.")]
    DuplicateEmailInBatch,

    /// The email is structurally invalid.
    #[error("Invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The phone number matches neither accepted shape.
    #[error("Phone number must be in the format: '+1234567890' or '123-456-7890'")]
    InvalidPhoneFormat,

    /// The price is below zero.
    #[error("Price cannot be negative.")]
    NegativePrice,

    /// An order was requested with no products.
    #[error("At least one product must be selected.")]
    EmptyProductSelection,

    /// The referenced customer does not exist.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// The referenced product does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
}

/// Render a list of validation errors into envelope error strings.
#[must_use]
pub fn render_errors(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}

/// A customer input that passed the validation phase.
#[derive(Debug, Clone)]
pub struct ScreenedCustomer {
    /// Display name.
    pub name: String,
    /// Parsed email, not present in the store or earlier in the batch.
    pub email: Email,
    /// Parsed phone, if one was supplied.
    pub phone: Option<Phone>,
}

/// Screen one customer input record.
///
/// Checks run in order: email structure, store-level duplicate, in-batch
/// duplicate, phone format. A structurally valid email that clears both
/// duplicate checks is registered in `batch` before the phone check, so a
/// later record reusing it is flagged as the in-batch duplicate even if
/// this record ends up failing on its phone.
///
/// `store_taken` is the store-level duplicate answer for this record's
/// email, looked up by the caller (this function performs no I/O).
///
/// # Errors
///
/// Returns every check failure for the record, in check order.
pub fn screen_customer(
    name: &str,
    email: &str,
    phone: Option<&str>,
    store_taken: bool,
    batch: &mut HashSet<String>,
) -> Result<ScreenedCustomer, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let parsed_email = match Email::parse(email) {
        Ok(parsed) => {
            if store_taken {
                errors.push(ValidationError::DuplicateEmail);
                None
            } else if batch.insert(parsed.as_str().to_owned()) {
                Some(parsed)
            } else {
                errors.push(ValidationError::DuplicateEmailInBatch);
                None
            }
        }
        Err(e) => {
            errors.push(ValidationError::InvalidEmail(e));
            None
        }
    };

    let parsed_phone = match phone {
        Some(raw) => match Phone::parse(raw) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                errors.push(ValidationError::InvalidPhoneFormat);
                None
            }
        },
        None => None,
    };

    match (parsed_email, errors.is_empty()) {
        (Some(email), true) => Ok(ScreenedCustomer {
            name: name.to_owned(),
            email,
            phone: parsed_phone,
        }),
        _ => Err(errors),
    }
}

/// Validate that a price is non-negative.
///
/// # Errors
///
/// Returns [`ValidationError::NegativePrice`] when `price < 0`.
pub fn validate_price(price: Decimal) -> Result<(), ValidationError> {
    if price < Decimal::ZERO {
        return Err(ValidationError::NegativePrice);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fresh_batch() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn test_screen_accepts_valid_record() {
        let mut batch = fresh_batch();
        let screened =
            screen_customer("Alice", "alice@example.com", Some("123-456-7890"), false, &mut batch)
                .unwrap();
        assert_eq!(screened.email.as_str(), "alice@example.com");
        assert_eq!(screened.phone.unwrap().as_str(), "123-456-7890");
        assert!(batch.contains("alice@example.com"));
    }

    #[test]
    fn test_screen_accepts_missing_phone() {
        let mut batch = fresh_batch();
        let screened =
            screen_customer("Bob", "bob@example.com", None, false, &mut batch).unwrap();
        assert!(screened.phone.is_none());
    }

    #[test]
    fn test_screen_rejects_store_duplicate() {
        let mut batch = fresh_batch();
        let errors =
            screen_customer("Alice", "alice@example.com", None, true, &mut batch).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::DuplicateEmail));
        // A store-duplicate email is not registered in the batch set
        assert!(!batch.contains("alice@example.com"));
    }

    #[test]
    fn test_screen_rejects_batch_duplicate() {
        let mut batch = fresh_batch();
        screen_customer("Alice", "a@x.com", None, false, &mut batch).unwrap();
        let errors = screen_customer("Alias", "a@x.com", None, false, &mut batch).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::DuplicateEmailInBatch));
    }

    #[test]
    fn test_screen_rejects_bad_phone() {
        let mut batch = fresh_batch();
        let errors =
            screen_customer("Carol", "carol@example.com", Some("12345"), false, &mut batch)
                .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::InvalidPhoneFormat));
        // The email still reserves its slot in the batch
        assert!(batch.contains("carol@example.com"));
    }

    #[test]
    fn test_screen_collects_multiple_failures() {
        let mut batch = fresh_batch();
        let errors = screen_customer("Dave", "dave@example.com", Some("abc-def-ghij"), true, &mut batch)
            .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ValidationError::DuplicateEmail));
        assert!(matches!(errors[1], ValidationError::InvalidPhoneFormat));
    }

    #[test]
    fn test_screen_rejects_malformed_email() {
        let mut batch = fresh_batch();
        let errors = screen_customer("Eve", "not-an-email", None, false, &mut batch).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::InvalidEmail(_)));
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(Decimal::new(1999, 2)).is_ok());
        assert!(matches!(
            validate_price(Decimal::new(-1, 2)),
            Err(ValidationError::NegativePrice)
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::DuplicateEmail.to_string(),
            "A customer with this email already exists."
        );
        assert_eq!(
            ValidationError::InvalidPhoneFormat.to_string(),
            "Phone number must be in the format: '+1234567890' or '123-456-7890'"
        );
        assert_eq!(
            ValidationError::ProductNotFound(ProductId::new(7)).to_string(),
            "Product not found: 7"
        );
        assert_eq!(
            ValidationError::EmptyProductSelection.to_string(),
            "At least one product must be selected."
        );
    }
}
