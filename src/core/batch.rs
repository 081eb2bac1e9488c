//! Batch action validation business logic.
//!
//! Gates bulk operations (transfer, delete, skip, unskip) applied to a
//! client-selected set of transactions. Apportioned entries and installment
//! members cannot be bulk-edited; the result message names every violated
//! category present in the selection, not just the first one found.
//!
//! Selections mixing active and ignored (skipped) transactions must be
//! rejected by the caller before validation, because ignored entries only
//! admit reactivation. [`selection_mixes_ignored`] is exported here so every
//! caller enforces that split with the same rule.

use crate::core::recurrence::is_ignored_in;
use crate::entities::transaction;

/// Outcome of validating a bulk selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchValidation {
    /// Whether the selection may be the target of a bulk operation
    pub valid: bool,
    /// User-facing explanation when invalid
    pub message: Option<String>,
}

impl BatchValidation {
    fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    fn rejected(categories: &[&str]) -> Self {
        Self {
            valid: false,
            message: Some(format!(
                "Bulk actions are not available for {}",
                categories.join(" and ")
            )),
        }
    }
}

/// True when the transaction belongs to an installment series.
fn is_installment(tx: &transaction::Model) -> bool {
    tx.series_id.as_deref().is_some_and(|s| !s.is_empty())
}

/// Validates a selection of transactions for a bulk operation.
///
/// The selection is invalid when it contains any apportioned transaction or
/// any installment-series member. Violated categories are de-duplicated and
/// all reported together in the message. Performs no I/O.
pub fn validate_batch(selection: &[transaction::Model]) -> BatchValidation {
    let has_apportioned = selection.iter().any(|tx| tx.is_apportioned);
    let has_installment = selection.iter().any(is_installment);

    let mut categories = Vec::new();
    if has_apportioned {
        categories.push("apportioned transactions");
    }
    if has_installment {
        categories.push("installment transactions");
    }

    if categories.is_empty() {
        BatchValidation::ok()
    } else {
        BatchValidation::rejected(&categories)
    }
}

/// True when the selection spans both active and ignored transactions for
/// the given month.
///
/// Callers reject such selections before invoking [`validate_batch`]:
/// ignored entries have a different valid action set (reactivate only), so
/// bulk operations require a homogeneous selection.
pub fn selection_mixes_ignored(selection: &[transaction::Model], month: &str) -> bool {
    let mut has_active = false;
    let mut has_ignored = false;
    for tx in selection {
        if is_ignored_in(tx, month) {
            has_ignored = true;
        } else {
            has_active = true;
        }
        if has_active && has_ignored {
            return true;
        }
    }
    false
}
