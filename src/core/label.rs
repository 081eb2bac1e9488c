//! Label business logic - Handles label creation, listing, and lifecycle.
//!
//! Labels are profile-scoped tags referenced from transactions' label sets.
//! Archiving is blocked while any transaction still references the label,
//! so the grouping engine never loses a bucket that is still in use.

use crate::{
    core::transaction::get_transactions_for_profile,
    entities::{EntityStatus, Label, Profile, label},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::instrument;

/// Creates a new label for a profile.
///
/// Validates that the name is not empty and that the owning profile exists;
/// stamps `created_at`, which listings are ordered by.
#[instrument(skip(db))]
pub async fn create_label(
    db: &DatabaseConnection,
    profile_id: i64,
    name: String,
    color: String,
) -> Result<label::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Label name cannot be empty".to_string(),
        });
    }

    Profile::find_by_id(profile_id)
        .one(db)
        .await?
        .ok_or(Error::ProfileNotFound { id: profile_id })?;

    let label = label::ActiveModel {
        profile_id: Set(profile_id),
        name: Set(name.trim().to_string()),
        color: Set(color),
        status: Set(EntityStatus::Active),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let result = label.insert(db).await?;
    Ok(result)
}

/// Retrieves all of a profile's labels, ordered by creation time.
///
/// Creation order is also the precedence order the grouping engine uses
/// when a transaction carries several labels.
pub async fn get_labels_for_profile(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Vec<label::Model>> {
    Label::find()
        .filter(label::Column::ProfileId.eq(profile_id))
        .order_by_asc(label::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Archives a label.
///
/// Rejected while any transaction of the owning profile still references
/// the label.
#[instrument(skip(db))]
pub async fn archive_label(db: &DatabaseConnection, label_id: i64) -> Result<label::Model> {
    let label = Label::find_by_id(label_id)
        .one(db)
        .await?
        .ok_or(Error::LabelNotFound { id: label_id })?;

    let transactions = get_transactions_for_profile(db, label.profile_id).await?;
    if transactions.iter().any(|t| t.label_ids.contains(label_id)) {
        return Err(Error::LabelInUse { name: label.name });
    }

    let mut active_model: label::ActiveModel = label.into();
    active_model.status = Set(EntityStatus::Archived);
    let updated = active_model.update(db).await?;
    Ok(updated)
}

/// Restores an archived label to active status.
#[instrument(skip(db))]
pub async fn restore_label(db: &DatabaseConnection, label_id: i64) -> Result<label::Model> {
    let label = Label::find_by_id(label_id)
        .one(db)
        .await?
        .ok_or(Error::LabelNotFound { id: label_id })?;

    let mut active_model: label::ActiveModel = label.into();
    active_model.status = Set(EntityStatus::Active);
    let updated = active_model.update(db).await?;
    Ok(updated)
}
