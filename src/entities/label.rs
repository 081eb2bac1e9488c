//! Label entity - User-defined tags for organizing a profile's transactions.
//!
//! Labels are scoped to a profile and referenced from transactions through
//! their `label_ids` set. A label cannot be archived while any transaction
//! still references it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::profile::EntityStatus;

/// Label database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "labels")]
pub struct Model {
    /// Unique identifier for the label
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the profile this label belongs to
    pub profile_id: i64,
    /// Display name of the label
    pub name: String,
    /// Display color (hex string chosen by the user)
    pub color: String,
    /// Lifecycle status: active or archived
    pub status: EntityStatus,
    /// When the label was created; listings are ordered by this field
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Label and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each label belongs to one profile
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::ProfileId",
        to = "super::profile::Column::Id"
    )]
    Profile,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
