//! Profile entity - Represents a household budget profile.
//!
//! Each profile owns an ordered list of subprofiles embedded by value in a
//! JSON column, so a profile document is the unit of read and write for all
//! subprofile edits. Profiles are soft-deleted by flipping `status` to
//! `archived`; dependent transactions are left in place.

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Lifecycle status shared by profiles, subprofiles, and labels.
///
/// Permanent deletion is represented by row (or list-entry) absence,
/// not by a third variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    /// Visible in active views
    #[sea_orm(string_value = "active")]
    Active,
    /// Soft-deleted; hidden from active views but fully recoverable
    #[sea_orm(string_value = "archived")]
    Archived,
}

/// A subprofile embedded in its owning profile document.
///
/// Subprofiles never exist as standalone rows: they are created, archived,
/// restored, and removed by rewriting the parent profile's `subprofiles`
/// list. Ids are client-generated UUID strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subprofile {
    /// UUID string identifying this subprofile within its profile
    pub id: String,
    /// Human-readable name (e.g., a household member)
    pub name: String,
    /// Lifecycle status of this subprofile
    pub status: EntityStatus,
    /// Monthly revenue, used for proportional apportionment of shared
    /// transactions
    pub revenue: f64,
}

/// Ordered list of subprofiles stored as a JSON document column.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct SubprofileList(pub Vec<Subprofile>);

impl SubprofileList {
    /// Looks up a subprofile by id.
    pub fn get(&self, subprofile_id: &str) -> Option<&Subprofile> {
        self.0.iter().find(|s| s.id == subprofile_id)
    }

    /// True if the list contains a subprofile with the given id.
    pub fn contains(&self, subprofile_id: &str) -> bool {
        self.get(subprofile_id).is_some()
    }

    /// Subprofiles currently in `Active` status, in list order.
    pub fn active(&self) -> impl Iterator<Item = &Subprofile> {
        self.0.iter().filter(|s| s.status == EntityStatus::Active)
    }
}

/// Profile database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Unique identifier for the profile
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the profile (e.g., "Home", "Beach house")
    pub name: String,
    /// Icon identifier chosen by the user
    pub icon: String,
    /// Lifecycle status: active or archived
    pub status: EntityStatus,
    /// Subprofiles owned by value; never contains duplicate ids
    #[sea_orm(column_type = "Json")]
    pub subprofiles: SubprofileList,
}

/// Defines relationships between Profile and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One profile has many transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
    /// One profile has many labels
    #[sea_orm(has_many = "super::label::Entity")]
    Labels,
    /// One profile has one metadata row
    #[sea_orm(has_one = "super::profile_metadata::Entity")]
    Metadata,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl Related<super::label::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Labels.def()
    }
}

impl Related<super::profile_metadata::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Metadata.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
