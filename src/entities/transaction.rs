//! Transaction entity - Represents all ledger entries in the system.
//!
//! Each transaction belongs to exactly one profile via `profile_id` and may
//! target one of that profile's embedded subprofiles via `subprofile_id`.
//! Recurring and installment entries carry per-month skip state in
//! `skipped_in_months`; shared entries are apportioned across subprofiles at
//! read time. Apportioned entries (`is_apportioned`) are derived from a
//! shared origin and are never created or edited independently.

use std::collections::BTreeSet;

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Whether a transaction adds to or draws from the household budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in
    #[sea_orm(string_value = "income")]
    Income,
    /// Money going out
    #[sea_orm(string_value = "expense")]
    Expense,
}

/// Set of label ids attached to a transaction, stored as a JSON column.
/// Order is irrelevant; membership is what matters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct LabelIdSet(pub BTreeSet<i64>);

impl LabelIdSet {
    /// True if the set contains the given label id.
    pub fn contains(&self, label_id: i64) -> bool {
        self.0.contains(&label_id)
    }
}

impl FromIterator<i64> for LabelIdSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Set of `"YYYY-MM"` month keys, stored as a JSON column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct MonthSet(pub BTreeSet<String>);

impl MonthSet {
    /// True if the set contains the given month key.
    pub fn contains(&self, month: &str) -> bool {
        self.0.contains(month)
    }

    /// Adds a month key, returning true if it was not already present.
    pub fn insert(&mut self, month: &str) -> bool {
        self.0.insert(month.to_string())
    }

    /// Removes a month key, returning true if it was present.
    pub fn remove(&mut self, month: &str) -> bool {
        self.0.remove(month)
    }
}

impl FromIterator<String> for MonthSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the profile this transaction belongs to
    pub profile_id: i64,
    /// Optional subprofile within the owning profile
    pub subprofile_id: Option<String>,
    /// Income or expense
    pub kind: TransactionKind,
    /// Human-readable description of the transaction
    pub description: String,
    /// Forecast amount
    pub planned: f64,
    /// Realized amount
    pub actual: f64,
    /// Reference date of the transaction
    pub date: Date,
    /// Optional due date
    pub due_date: Option<Date>,
    /// Date the transaction was actually paid, when `paid`
    pub payment_date: Option<Date>,
    /// Whether the transaction has been paid
    pub paid: bool,
    /// Free-form notes
    pub notes: Option<String>,
    /// Labels attached to this transaction
    #[sea_orm(column_type = "Json")]
    pub label_ids: LabelIdSet,
    /// Whether the value is shared across subprofiles (apportioned at read
    /// time, proportional to revenue)
    pub is_shared: bool,
    /// Whether this transaction repeats monthly
    pub is_recurring: bool,
    /// Derived from a shared origin; excluded from ordinary bulk edits
    pub is_apportioned: bool,
    /// Installment series membership, when part of one
    pub series_id: Option<String>,
    /// Position within the installment series (1-based)
    pub current_installment: Option<i32>,
    /// Total number of installments in the series
    pub total_installments: Option<i32>,
    /// Originating shared/overview transaction, for derived entries
    pub parent_id: Option<i64>,
    /// Months in which this recurring/installment entry does not apply
    #[sea_orm(column_type = "Json")]
    pub skipped_in_months: MonthSet,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one profile
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
