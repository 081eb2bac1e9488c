//! Initial profile seeding from config.toml.
//!
//! Lets a fresh install start with its household profiles already in place.
//! Profiles are matched by name; existing ones are never overwritten.

use crate::{
    core::profile::{add_subprofile, create_profile},
    entities::{Profile, profile},
    errors::{Error, Result},
};
use sea_orm::prelude::*;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct SeedConfig {
    /// List of profiles to seed
    #[serde(default)]
    pub profiles: Vec<ProfileSeed>,
}

/// Configuration for a single profile
#[derive(Debug, Deserialize, Clone)]
pub struct ProfileSeed {
    /// Name of the profile
    pub name: String,
    /// Icon identifier
    #[serde(default)]
    pub icon: String,
    /// Subprofiles to embed at creation
    #[serde(default)]
    pub subprofiles: Vec<SubprofileSeed>,
}

/// Configuration for a single embedded subprofile
#[derive(Debug, Deserialize, Clone)]
pub struct SubprofileSeed {
    /// Name of the subprofile
    pub name: String,
    /// Monthly revenue used for apportionment
    #[serde(default)]
    pub revenue: f64,
}

/// Loads seed configuration from a TOML file.
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read or the TOML is
/// invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Inserts the configured profiles that are not already present.
///
/// Matching is by profile name; a matched profile is left untouched,
/// including its subprofile list. Returns the number of profiles created.
pub async fn seed_initial_profiles(
    db: &DatabaseConnection,
    config: &SeedConfig,
) -> Result<usize> {
    let mut created = 0;

    for seed in &config.profiles {
        let existing = Profile::find()
            .filter(profile::Column::Name.eq(seed.name.as_str()))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        let new_profile = create_profile(db, seed.name.clone(), seed.icon.clone()).await?;
        for sub in &seed.subprofiles {
            add_subprofile(db, new_profile.id, sub.name.clone(), sub.revenue).await?;
        }

        info!("seeded profile '{}'", seed.name);
        created += 1;
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn sample_config() -> SeedConfig {
        toml::from_str(
            r#"
            [[profiles]]
            name = "Home"
            icon = "house"

            [[profiles.subprofiles]]
            name = "Alice"
            revenue = 2000.0

            [[profiles.subprofiles]]
            name = "Bob"
            revenue = 1000.0

            [[profiles]]
            name = "Beach house"
            icon = "umbrella"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_seed_config() {
        let config = sample_config();
        assert_eq!(config.profiles.len(), 2);
        assert_eq!(config.profiles[0].subprofiles.len(), 2);
        assert_eq!(config.profiles[0].subprofiles[1].name, "Bob");
        assert!(config.profiles[1].subprofiles.is_empty());
    }

    #[tokio::test]
    async fn test_seed_initial_profiles() -> Result<()> {
        let db = setup_test_db().await?;

        let created = seed_initial_profiles(&db, &sample_config()).await?;
        assert_eq!(created, 2);

        let home = Profile::find()
            .filter(profile::Column::Name.eq("Home"))
            .one(&db)
            .await?
            .unwrap();
        assert_eq!(home.subprofiles.0.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_seeding_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;

        seed_initial_profiles(&db, &sample_config()).await?;
        let created_again = seed_initial_profiles(&db, &sample_config()).await?;
        assert_eq!(created_again, 0);

        Ok(())
    }
}
