//! Archive and trash lifecycle business logic.
//!
//! Profiles and subprofiles move between `active`, `archived`, and
//! permanently deleted (row or list-entry absence). Archiving only flips the
//! status field; dependent transactions stay in place and are merely
//! filtered out of active views. Purging a profile cascades to its
//! transactions and metadata in one atomic store transaction. Purging a
//! subprofile removes only its list entry: transactions referencing it are
//! deliberately left orphaned, and downstream views bucket them as such.
//!
//! Subprofile edits rewrite the parent profile's embedded list wholesale.
//! There is no optimistic-concurrency guard on that read-modify-write, so
//! two concurrent writers of the same profile document can overwrite each
//! other's list edits; callers are single-threaded UI contexts.

use crate::{
    entities::{
        EntityStatus, Profile, ProfileMetadata, Transaction, profile, profile_metadata, transaction,
    },
    errors::Result,
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

/// Archives a profile, hiding it from active views.
///
/// Only the status field changes; subprofiles and dependent transactions
/// are untouched. A missing id is a no-op returning `Ok(None)`.
#[instrument(skip(db))]
pub async fn archive_profile(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Option<profile::Model>> {
    set_profile_status(db, profile_id, EntityStatus::Archived).await
}

/// Restores an archived profile to active status.
///
/// The subprofile list comes back exactly as it was archived. A missing id
/// is a no-op returning `Ok(None)`.
#[instrument(skip(db))]
pub async fn restore_profile(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Option<profile::Model>> {
    set_profile_status(db, profile_id, EntityStatus::Active).await
}

async fn set_profile_status(
    db: &DatabaseConnection,
    profile_id: i64,
    status: EntityStatus,
) -> Result<Option<profile::Model>> {
    let Some(existing) = Profile::find_by_id(profile_id).one(db).await? else {
        debug!("status change requested for missing profile {profile_id}");
        return Ok(None);
    };

    if existing.status == status {
        return Ok(Some(existing));
    }

    let mut active_model: profile::ActiveModel = existing.into();
    active_model.status = Set(status);
    let updated = active_model.update(db).await?;
    Ok(Some(updated))
}

/// Permanently deletes a profile and everything it owns.
///
/// Cascades to every transaction with a matching `profile_id` and to the
/// profile's metadata row, all inside a single store transaction so readers
/// never observe a half-removed profile. Always legal regardless of current
/// status; purging an absent profile succeeds without effect.
#[instrument(skip(db))]
pub async fn purge_profile(db: &DatabaseConnection, profile_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let deleted_transactions = Transaction::delete_many()
        .filter(transaction::Column::ProfileId.eq(profile_id))
        .exec(&txn)
        .await?;

    ProfileMetadata::delete_many()
        .filter(profile_metadata::Column::ProfileId.eq(profile_id))
        .exec(&txn)
        .await?;

    Profile::delete_by_id(profile_id).exec(&txn).await?;

    txn.commit().await?;

    info!(
        "purged profile {profile_id} and {} dependent transactions",
        deleted_transactions.rows_affected
    );
    Ok(())
}

/// Archives a subprofile within its parent profile.
///
/// Rewrites the parent's embedded subprofile list with the one entry's
/// status flipped. Dependent transactions are untouched. Missing profile or
/// subprofile ids are tolerated no-ops.
#[instrument(skip(db))]
pub async fn archive_subprofile(
    db: &DatabaseConnection,
    profile_id: i64,
    subprofile_id: &str,
) -> Result<Option<profile::Model>> {
    set_subprofile_status(db, profile_id, subprofile_id, EntityStatus::Archived).await
}

/// Restores an archived subprofile to active status.
///
/// Same read-modify-write of the parent's list as [`archive_subprofile`].
#[instrument(skip(db))]
pub async fn restore_subprofile(
    db: &DatabaseConnection,
    profile_id: i64,
    subprofile_id: &str,
) -> Result<Option<profile::Model>> {
    set_subprofile_status(db, profile_id, subprofile_id, EntityStatus::Active).await
}

async fn set_subprofile_status(
    db: &DatabaseConnection,
    profile_id: i64,
    subprofile_id: &str,
    status: EntityStatus,
) -> Result<Option<profile::Model>> {
    let Some(existing) = Profile::find_by_id(profile_id).one(db).await? else {
        debug!("subprofile status change requested for missing profile {profile_id}");
        return Ok(None);
    };

    if !existing.subprofiles.contains(subprofile_id) {
        debug!("subprofile {subprofile_id} not present in profile {profile_id}");
        return Ok(Some(existing));
    }

    let mut subprofiles = existing.subprofiles.clone();
    for sub in &mut subprofiles.0 {
        if sub.id == subprofile_id {
            sub.status = status;
        }
    }

    let mut active_model: profile::ActiveModel = existing.into();
    active_model.subprofiles = Set(subprofiles);
    let updated = active_model.update(db).await?;
    Ok(Some(updated))
}

/// Permanently deletes a subprofile from its parent profile.
///
/// Removes the entry from the embedded list and writes the list back. Does
/// NOT cascade to transactions referencing the subprofile: those keep their
/// `subprofile_id` and are treated as orphans by downstream views. Always
/// legal regardless of the subprofile's current status.
#[instrument(skip(db))]
pub async fn purge_subprofile(
    db: &DatabaseConnection,
    profile_id: i64,
    subprofile_id: &str,
) -> Result<Option<profile::Model>> {
    let Some(existing) = Profile::find_by_id(profile_id).one(db).await? else {
        debug!("purge requested for missing profile {profile_id}");
        return Ok(None);
    };

    if !existing.subprofiles.contains(subprofile_id) {
        return Ok(Some(existing));
    }

    let mut subprofiles = existing.subprofiles.clone();
    subprofiles.0.retain(|s| s.id != subprofile_id);

    let mut active_model: profile::ActiveModel = existing.into();
    active_model.subprofiles = Set(subprofiles);
    let updated = active_model.update(db).await?;

    info!("purged subprofile {subprofile_id} from profile {profile_id}");
    Ok(Some(updated))
}
