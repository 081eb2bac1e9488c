//! Month registry business logic.
//!
//! Keeps `profile_metadata.available_months` in step with the ledger: the
//! set is union-updated whenever a transaction is registered, and can be
//! rebuilt from a full transaction scan when it drifts. Also hosts the
//! `"YYYY-MM"` month-key helpers shared by the skip manager.

use crate::{
    entities::{MonthSet, ProfileMetadata, Transaction, profile_metadata, transaction},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{Set, prelude::*};

/// Formats a date as the `"YYYY-MM"` month key used throughout the engine.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Validates that a month key is of the form `"YYYY-MM"`.
///
/// # Errors
/// Returns [`Error::InvalidMonth`] for anything chrono cannot parse as the
/// first day of such a month.
pub fn validate_month(month: &str) -> Result<()> {
    // Parse as the first day of the month; rejects bad formats and bad
    // month numbers in one go.
    if month.len() == 7 && NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").is_ok() {
        Ok(())
    } else {
        Err(Error::InvalidMonth {
            month: month.to_string(),
        })
    }
}

/// Registers a month in the profile's `available_months` set.
///
/// Read-modify-write of the metadata row: load the current set, union the
/// new key, write back. Generic over [`ConnectionTrait`] so it can join an
/// open store transaction and commit atomically with the write that
/// introduced the month.
pub async fn register_available_month<C>(conn: &C, profile_id: i64, month: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    validate_month(month)?;

    let existing = ProfileMetadata::find_by_id(profile_id).one(conn).await?;

    match existing {
        Some(metadata) => {
            if metadata.available_months.contains(month) {
                return Ok(());
            }
            let mut months = metadata.available_months.clone();
            months.insert(month);
            let mut active_model: profile_metadata::ActiveModel = metadata.into();
            active_model.available_months = Set(months);
            active_model.update(conn).await?;
        }
        None => {
            let metadata = profile_metadata::ActiveModel {
                profile_id: Set(profile_id),
                available_months: Set(std::iter::once(month.to_string()).collect()),
            };
            metadata.insert(conn).await?;
        }
    }

    Ok(())
}

/// Rebuilds `available_months` from a scan of the profile's transactions.
///
/// Self-healing counterpart to [`register_available_month`]: the registry is
/// fully recomputable, so drift (e.g. after purged transactions) can be
/// repaired by rewriting the whole set.
pub async fn recompute_available_months(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<profile_metadata::Model> {
    let transactions = Transaction::find()
        .filter(transaction::Column::ProfileId.eq(profile_id))
        .all(db)
        .await?;

    let months: MonthSet = transactions.iter().map(|t| month_key(t.date)).collect();

    let existing = ProfileMetadata::find_by_id(profile_id).one(db).await?;
    let model = match existing {
        Some(metadata) => {
            let mut active_model: profile_metadata::ActiveModel = metadata.into();
            active_model.available_months = Set(months);
            active_model.update(db).await?
        }
        None => {
            let metadata = profile_metadata::ActiveModel {
                profile_id: Set(profile_id),
                available_months: Set(months),
            };
            metadata.insert(db).await?
        }
    };

    Ok(model)
}
