//! Profile metadata entity - Per-profile bookkeeping kept outside the
//! profile document itself.
//!
//! Currently holds the registry of months that have at least one
//! transaction. The set is union-updated whenever a transaction is
//! registered and can be fully recomputed from a transaction scan.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::transaction::MonthSet;

/// Profile metadata database model, keyed by the owning profile's id
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile_metadata")]
pub struct Model {
    /// ID of the profile this metadata row belongs to
    #[sea_orm(primary_key, auto_increment = false)]
    pub profile_id: i64,
    /// Months (`"YYYY-MM"`) with at least one registered transaction
    #[sea_orm(column_type = "Json")]
    pub available_months: MonthSet,
}

/// Defines relationships between ProfileMetadata and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each metadata row belongs to one profile
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
