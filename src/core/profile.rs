//! Profile business logic - Handles profile and subprofile creation and
//! retrieval.
//!
//! Profiles own their subprofiles by value; adding a subprofile rewrites
//! the parent document's embedded list. All functions are async and return
//! Result types for error handling.

use crate::{
    entities::{EntityStatus, Profile, Subprofile, profile},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::instrument;

/// Creates a new profile with an empty subprofile list.
///
/// Validates that the name is not empty and trims whitespace from it.
#[instrument(skip(db))]
pub async fn create_profile(
    db: &DatabaseConnection,
    name: String,
    icon: String,
) -> Result<profile::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Profile name cannot be empty".to_string(),
        });
    }

    let profile = profile::ActiveModel {
        name: Set(name.trim().to_string()),
        icon: Set(icon),
        status: Set(EntityStatus::Active),
        subprofiles: Set(Default::default()),
        ..Default::default()
    };

    let result = profile.insert(db).await?;
    Ok(result)
}

/// Appends a new subprofile to a profile's embedded list.
///
/// The subprofile id is generated here (UUID v4), which keeps the
/// no-duplicate-ids invariant on the list. Revenue must be finite and
/// non-negative since it feeds the apportionment proportions.
#[instrument(skip(db))]
pub async fn add_subprofile(
    db: &DatabaseConnection,
    profile_id: i64,
    name: String,
    revenue: f64,
) -> Result<profile::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Subprofile name cannot be empty".to_string(),
        });
    }

    if !revenue.is_finite() || revenue < 0.0 {
        return Err(Error::InvalidAmount { amount: revenue });
    }

    let existing = Profile::find_by_id(profile_id)
        .one(db)
        .await?
        .ok_or(Error::ProfileNotFound { id: profile_id })?;

    let mut subprofiles = existing.subprofiles.clone();
    subprofiles.0.push(Subprofile {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.trim().to_string(),
        status: EntityStatus::Active,
        revenue,
    });

    let mut active_model: profile::ActiveModel = existing.into();
    active_model.subprofiles = Set(subprofiles);
    let updated = active_model.update(db).await?;
    Ok(updated)
}

/// Finds a profile by its unique ID.
pub async fn get_profile_by_id(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Option<profile::Model>> {
    Profile::find_by_id(profile_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all active (non-archived) profiles, ordered alphabetically by
/// name.
pub async fn get_all_active_profiles(db: &DatabaseConnection) -> Result<Vec<profile::Model>> {
    Profile::find()
        .filter(profile::Column::Status.eq(EntityStatus::Active))
        .order_by_asc(profile::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all archived profiles, ordered alphabetically by name.
///
/// Backs the trash screen, where archived profiles await restore or purge.
pub async fn get_archived_profiles(db: &DatabaseConnection) -> Result<Vec<profile::Model>> {
    Profile::find()
        .filter(profile::Column::Status.eq(EntityStatus::Archived))
        .order_by_asc(profile::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_profile() -> Result<()> {
        let db = setup_test_db().await?;

        let profile = create_profile(&db, "  Home  ".to_string(), "house".to_string()).await?;
        assert_eq!(profile.name, "Home");
        assert_eq!(profile.status, EntityStatus::Active);
        assert!(profile.subprofiles.0.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_profile_rejects_empty_name() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_profile(&db, "   ".to_string(), "house".to_string()).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_subprofile() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;

        let updated = add_subprofile(&db, profile.id, "Alice".to_string(), 2500.0).await?;
        assert_eq!(updated.subprofiles.0.len(), 1);

        let sub = &updated.subprofiles.0[0];
        assert_eq!(sub.name, "Alice");
        assert_eq!(sub.revenue, 2500.0);
        assert_eq!(sub.status, EntityStatus::Active);
        assert!(!sub.id.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_add_subprofile_ids_are_unique() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;

        add_subprofile(&db, profile.id, "Alice".to_string(), 2500.0).await?;
        add_subprofile(&db, profile.id, "Bob".to_string(), 1500.0).await?;
        let updated = add_subprofile(&db, profile.id, "Carol".to_string(), 1000.0).await?;

        let mut ids: Vec<&str> = updated.subprofiles.0.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_subprofile_validation() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;

        let result = add_subprofile(&db, profile.id, String::new(), 100.0).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = add_subprofile(&db, profile.id, "Alice".to_string(), -1.0).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        let result = add_subprofile(&db, profile.id, "Alice".to_string(), f64::NAN).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        let result = add_subprofile(&db, 999, "Alice".to_string(), 100.0).await;
        assert!(matches!(result, Err(Error::ProfileNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_active_listing_excludes_archived() -> Result<()> {
        let db = setup_test_db().await?;
        let kept = create_test_profile(&db, "Beach house").await?;
        let archived = create_test_profile(&db, "Old flat").await?;
        crate::core::lifecycle::archive_profile(&db, archived.id).await?;

        let active = get_all_active_profiles(&db).await?;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, kept.id);

        let trashed = get_archived_profiles(&db).await?;
        assert_eq!(trashed.len(), 1);
        assert_eq!(trashed[0].id, archived.id);

        Ok(())
    }
}
