//! Recurrence and skip-state business logic.
//!
//! A recurring or installment transaction can be marked as not applying in
//! one specific month without deleting or mutating its series definition:
//! the month key is added to the transaction's `skipped_in_months` set. Both
//! skip and unskip are idempotent, and a lookup on an id missing from the
//! current snapshot is a tolerated no-op rather than an error, since user
//! actions can race snapshot delivery.

use crate::{
    core::months::validate_month,
    entities::{Transaction, transaction},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::{debug, instrument};

/// True if the transaction is ignored in the given month.
///
/// This predicate drives filtering into the "ignored" display bucket and
/// the homogeneous-selection rule for batch operations.
pub fn is_ignored_in(transaction: &transaction::Model, month: &str) -> bool {
    transaction.skipped_in_months.contains(month)
}

/// Marks a recurring or installment transaction as skipped in a month.
///
/// Skipping an already-skipped month is a no-op that still succeeds. A
/// transaction id not present in the store returns `Ok(None)`.
///
/// # Errors
/// * [`Error::InvalidMonth`] for a malformed month key
/// * [`Error::NotRecurring`] when the transaction is neither recurring nor
///   part of an installment series
#[instrument(skip(db))]
pub async fn skip_month(
    db: &DatabaseConnection,
    transaction_id: i64,
    month: &str,
) -> Result<Option<transaction::Model>> {
    validate_month(month)?;

    let Some(tx) = Transaction::find_by_id(transaction_id).one(db).await? else {
        debug!("skip requested for missing transaction {transaction_id}");
        return Ok(None);
    };

    let is_installment = tx.series_id.as_deref().is_some_and(|s| !s.is_empty());
    if !tx.is_recurring && !is_installment {
        return Err(Error::NotRecurring {
            description: tx.description,
        });
    }

    if tx.skipped_in_months.contains(month) {
        return Ok(Some(tx));
    }

    let mut months = tx.skipped_in_months.clone();
    months.insert(month);
    let mut active_model: transaction::ActiveModel = tx.into();
    active_model.skipped_in_months = Set(months);
    let updated = active_model.update(db).await?;

    Ok(Some(updated))
}

/// Reactivates a transaction for a month it was skipped in.
///
/// Unskipping an already-active month is a no-op that still succeeds. A
/// transaction id not present in the store returns `Ok(None)`.
///
/// # Errors
/// * [`Error::InvalidMonth`] for a malformed month key
/// * [`Error::MonthClosed`] when the enclosing month is marked closed
///   (`month_closed` is supplied by the caller)
/// * [`Error::ManagedByOrigin`] when the transaction is apportioned or has
///   a parent; derived entries are reactivated only through their origin
#[instrument(skip(db))]
pub async fn unskip_month(
    db: &DatabaseConnection,
    transaction_id: i64,
    month: &str,
    month_closed: bool,
) -> Result<Option<transaction::Model>> {
    validate_month(month)?;

    if month_closed {
        return Err(Error::MonthClosed {
            month: month.to_string(),
        });
    }

    let Some(tx) = Transaction::find_by_id(transaction_id).one(db).await? else {
        debug!("unskip requested for missing transaction {transaction_id}");
        return Ok(None);
    };

    if tx.is_apportioned || tx.parent_id.is_some() {
        return Err(Error::ManagedByOrigin {
            description: tx.description,
        });
    }

    if !tx.skipped_in_months.contains(month) {
        return Ok(Some(tx));
    }

    let mut months = tx.skipped_in_months.clone();
    months.remove(month);
    let mut active_model: transaction::ActiveModel = tx.into();
    active_model.skipped_in_months = Set(months);
    let updated = active_model.update(db).await?;

    Ok(Some(updated))
}
