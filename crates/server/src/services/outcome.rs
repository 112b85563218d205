//! Uniform mutation result envelopes.

use serde::Serialize;

use super::validate::{ValidationError, render_errors};

/// The uniform result shape returned by every mutation: the primary
/// entity (absent on failure), a success flag, a human-readable message,
/// and a list of error strings (empty on success).
#[derive(Debug, Clone, Serialize)]
pub struct MutationOutcome<T> {
    /// The created entity, if the mutation succeeded.
    pub entity: Option<T>,
    /// Whether the mutation succeeded.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Error strings; empty on success.
    pub errors: Vec<String>,
}

impl<T> MutationOutcome<T> {
    /// A successful outcome carrying the created entity.
    pub fn created(entity: T, message: impl Into<String>) -> Self {
        Self {
            entity: Some(entity),
            success: true,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// A validation rejection: nothing was written.
    pub fn rejected(message: impl Into<String>, errors: &[ValidationError]) -> Self {
        Self {
            entity: None,
            success: false,
            message: message.into(),
            errors: render_errors(errors),
        }
    }

    /// A commit-phase failure, carrying the store error's text verbatim.
    pub fn failed(message: impl Into<String>, error: impl ToString) -> Self {
        Self {
            entity: None,
            success: false,
            message: message.into(),
            errors: vec![error.to_string()],
        }
    }
}

/// Result of a bulk customer creation: per-input outcomes in input order,
/// plus success/failure counters.
#[derive(Debug, Clone, Serialize)]
pub struct BulkCreateSummary<T> {
    /// Number of records created.
    pub success_count: u32,
    /// Number of records that failed validation or commit.
    pub failed_count: u32,
    /// One outcome per input record, in input order.
    pub results: Vec<MutationOutcome<T>>,
}

impl<T> BulkCreateSummary<T> {
    /// Tally the counters from a list of per-record outcomes.
    #[must_use]
    pub fn from_results(results: Vec<MutationOutcome<T>>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        let failed = results.len() - succeeded;
        Self {
            success_count: u32::try_from(succeeded).unwrap_or(u32::MAX),
            failed_count: u32::try_from(failed).unwrap_or(u32::MAX),
            results,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_created_envelope() {
        let outcome = MutationOutcome::created(42_u32, "Created.");
        assert!(outcome.success);
        assert_eq!(outcome.entity, Some(42));
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_rejected_envelope() {
        let outcome: MutationOutcome<u32> =
            MutationOutcome::rejected("Validation failed.", &[ValidationError::NegativePrice]);
        assert!(!outcome.success);
        assert!(outcome.entity.is_none());
        assert_eq!(outcome.errors, vec!["Price cannot be negative."]);
    }

    #[test]
    fn test_failed_envelope_carries_raw_text() {
        let outcome: MutationOutcome<u32> =
            MutationOutcome::failed("An error occurred.", "constraint violation: email already exists");
        assert_eq!(
            outcome.errors,
            vec!["constraint violation: email already exists"]
        );
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![
            MutationOutcome::created(1_u32, "ok"),
            MutationOutcome::rejected("Validation failed.", &[ValidationError::DuplicateEmail]),
            MutationOutcome::created(2_u32, "ok"),
        ];
        let summary = BulkCreateSummary::from_results(results);
        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.failed_count, 1);
        assert_eq!(summary.results.len(), 3);
    }
}
