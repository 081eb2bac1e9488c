//! Transaction business logic - Handles all transaction-related operations.
//!
//! Creating a transaction validates its amounts and ownership (the profile
//! must exist and any `subprofile_id` must be embedded in that profile) and
//! registers the transaction's month in the profile's month registry inside
//! the same store transaction, so ledger and registry move together.
//! Apportioned entries are derived by the system from a shared origin and
//! cannot be created through this path.

use crate::{
    core::months,
    entities::{LabelIdSet, Profile, Transaction, TransactionKind, transaction},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, instrument};

/// Direction of a transaction's planned-vs-actual difference, as shown by
/// the UI indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difference {
    /// Better than planned
    Positive,
    /// Worse than planned (over budget for expenses, under-realized for
    /// income)
    Negative,
    /// Exactly as planned
    Neutral,
}

/// Input for [`create_transaction`].
///
/// Derived fields (`is_apportioned`, `parent_id`) are intentionally absent:
/// apportioned entries are never independently created.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// Owning profile
    pub profile_id: i64,
    /// Optional target subprofile; must be embedded in the owning profile
    pub subprofile_id: Option<String>,
    /// Income or expense
    pub kind: TransactionKind,
    /// Human-readable description
    pub description: String,
    /// Forecast amount
    pub planned: f64,
    /// Realized amount
    pub actual: f64,
    /// Reference date
    pub date: NaiveDate,
    /// Optional due date
    pub due_date: Option<NaiveDate>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Labels attached at creation
    pub label_ids: LabelIdSet,
    /// Whether the value is shared across subprofiles
    pub is_shared: bool,
    /// Whether the transaction repeats monthly
    pub is_recurring: bool,
    /// Installment series id, when part of one
    pub series_id: Option<String>,
    /// Position within the installment series (1-based)
    pub current_installment: Option<i32>,
    /// Total number of installments in the series
    pub total_installments: Option<i32>,
}

/// Creates a new transaction and registers its month atomically.
///
/// Validates that amounts are finite, the description is non-empty, the
/// owning profile exists, and the subprofile (when given) is embedded in
/// that profile. The insert and the month-registry union are committed as
/// one store transaction.
#[instrument(skip(db, new))]
pub async fn create_transaction(
    db: &DatabaseConnection,
    new: NewTransaction,
) -> Result<transaction::Model> {
    if !new.planned.is_finite() {
        return Err(Error::InvalidAmount {
            amount: new.planned,
        });
    }
    if !new.actual.is_finite() {
        return Err(Error::InvalidAmount { amount: new.actual });
    }
    if new.description.trim().is_empty() {
        return Err(Error::Validation {
            message: "Transaction description cannot be empty".to_string(),
        });
    }

    // Use a transaction to ensure atomicity with the month registry
    let txn = db.begin().await?;

    let profile = Profile::find_by_id(new.profile_id)
        .one(&txn)
        .await?
        .ok_or(Error::ProfileNotFound {
            id: new.profile_id,
        })?;

    if let Some(subprofile_id) = &new.subprofile_id
        && !profile.subprofiles.contains(subprofile_id)
    {
        return Err(Error::SubprofileNotFound {
            id: subprofile_id.clone(),
        });
    }

    let transaction_model = transaction::ActiveModel {
        profile_id: Set(new.profile_id),
        subprofile_id: Set(new.subprofile_id),
        kind: Set(new.kind),
        description: Set(new.description.trim().to_string()),
        planned: Set(new.planned),
        actual: Set(new.actual),
        date: Set(new.date),
        due_date: Set(new.due_date),
        payment_date: Set(None),
        paid: Set(false),
        notes: Set(new.notes),
        label_ids: Set(new.label_ids),
        is_shared: Set(new.is_shared),
        is_recurring: Set(new.is_recurring),
        is_apportioned: Set(false),
        series_id: Set(new.series_id),
        current_installment: Set(new.current_installment),
        total_installments: Set(new.total_installments),
        parent_id: Set(None),
        skipped_in_months: Set(Default::default()),
        ..Default::default()
    };

    let result = transaction_model.insert(&txn).await?;

    months::register_available_month(&txn, result.profile_id, &months::month_key(result.date))
        .await?;

    txn.commit().await?;

    Ok(result)
}

/// Retrieves a specific transaction by its unique ID.
pub async fn get_transaction_by_id(
    db: &DatabaseConnection,
    transaction_id: i64,
) -> Result<Option<transaction::Model>> {
    Transaction::find_by_id(transaction_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all transactions for a profile, ordered by date (newest
/// first).
pub async fn get_transactions_for_profile(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Vec<transaction::Model>> {
    Transaction::find()
        .filter(transaction::Column::ProfileId.eq(profile_id))
        .order_by_desc(transaction::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a profile's transactions that carry the given label.
///
/// Label membership lives in a JSON set column, so containment is filtered
/// here after the profile-scoped fetch.
pub async fn get_transactions_with_label(
    db: &DatabaseConnection,
    profile_id: i64,
    label_id: i64,
) -> Result<Vec<transaction::Model>> {
    let transactions = get_transactions_for_profile(db, profile_id).await?;
    Ok(transactions
        .into_iter()
        .filter(|t| t.label_ids.contains(label_id))
        .collect())
}

/// Toggles a transaction's paid state.
///
/// Marking paid stamps `payment_date` (the given date, or the transaction's
/// own date when none is supplied); marking unpaid clears it. A missing id
/// is a no-op returning `Ok(None)`.
#[instrument(skip(db))]
pub async fn set_paid(
    db: &DatabaseConnection,
    transaction_id: i64,
    paid: bool,
    payment_date: Option<NaiveDate>,
) -> Result<Option<transaction::Model>> {
    let Some(tx) = Transaction::find_by_id(transaction_id).one(db).await? else {
        debug!("paid toggle requested for missing transaction {transaction_id}");
        return Ok(None);
    };

    let fallback_date = tx.date;
    let mut active_model: transaction::ActiveModel = tx.into();
    active_model.paid = Set(paid);
    active_model.payment_date = Set(if paid {
        Some(payment_date.unwrap_or(fallback_date))
    } else {
        None
    });
    let updated = active_model.update(db).await?;

    Ok(Some(updated))
}

/// Deletes a transaction.
///
/// A missing id is a tolerated no-op, since deletes can race snapshot
/// delivery. The month registry is left as-is; it can be rebuilt with
/// [`months::recompute_available_months`].
#[instrument(skip(db))]
pub async fn delete_transaction(db: &DatabaseConnection, transaction_id: i64) -> Result<()> {
    let Some(tx) = Transaction::find_by_id(transaction_id).one(db).await? else {
        debug!("delete requested for missing transaction {transaction_id}");
        return Ok(());
    };

    tx.delete(db).await?;
    Ok(())
}

/// Classifies a transaction's planned-vs-actual difference for the UI
/// indicator.
///
/// An expense that realized above plan is over budget (`Negative`); an
/// income that realized below plan is under-realized (`Negative`). The
/// mirror cases are `Positive`, and an exact match is `Neutral`.
pub fn difference_indicator(transaction: &transaction::Model) -> Difference {
    let (actual, planned) = (transaction.actual, transaction.planned);
    if actual == planned {
        return Difference::Neutral;
    }
    match transaction.kind {
        TransactionKind::Expense => {
            if actual > planned {
                Difference::Negative
            } else {
                Difference::Positive
            }
        }
        TransactionKind::Income => {
            if actual < planned {
                Difference::Negative
            } else {
                Difference::Positive
            }
        }
    }
}
