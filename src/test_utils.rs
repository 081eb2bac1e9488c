//! Shared test utilities for `homeledger`.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test entities with sensible defaults, plus pure
//! `Model` builders for exercising the synchronous engines without a store.

use crate::{
    core::{label, profile, transaction},
    entities::{self, EntityStatus, TransactionKind},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test database together with a default profile.
pub async fn setup_with_profile() -> Result<(DatabaseConnection, entities::profile::Model)> {
    let db = setup_test_db().await?;
    let profile = create_test_profile(&db, "Test profile").await?;
    Ok((db, profile))
}

/// Creates a test profile with sensible defaults.
///
/// # Defaults
/// * `icon`: `"house"`
/// * no subprofiles
pub async fn create_test_profile(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::profile::Model> {
    profile::create_profile(db, name.to_string(), "house".to_string()).await
}

/// Creates a test profile with the given `(name, revenue)` subprofiles.
/// Returns the profile with the full embedded list.
pub async fn create_test_profile_with_subprofiles(
    db: &DatabaseConnection,
    name: &str,
    subprofiles: &[(&str, f64)],
) -> Result<entities::profile::Model> {
    let mut created = create_test_profile(db, name).await?;
    for (sub_name, revenue) in subprofiles {
        created = profile::add_subprofile(db, created.id, (*sub_name).to_string(), *revenue).await?;
    }
    Ok(created)
}

/// Default creation input for a test transaction.
///
/// # Defaults
/// * `kind`: expense, `planned` = `actual` = 50.0
/// * `date`: 2023-10-01
/// * not shared, not recurring, no labels, no series
pub fn new_test_transaction(profile_id: i64) -> transaction::NewTransaction {
    transaction::NewTransaction {
        profile_id,
        subprofile_id: None,
        kind: TransactionKind::Expense,
        description: "Test transaction".to_string(),
        planned: 50.0,
        actual: 50.0,
        date: NaiveDate::from_ymd_opt(2023, 10, 1).expect("valid date"),
        due_date: None,
        notes: None,
        label_ids: Default::default(),
        is_shared: false,
        is_recurring: false,
        series_id: None,
        current_installment: None,
        total_installments: None,
    }
}

/// Creates a test transaction with the given actual amount.
pub async fn create_test_transaction(
    db: &DatabaseConnection,
    profile_id: i64,
    actual: f64,
) -> Result<entities::transaction::Model> {
    let mut new = new_test_transaction(profile_id);
    new.planned = actual;
    new.actual = actual;
    transaction::create_transaction(db, new).await
}

/// Creates a test transaction dated `date` (format `YYYY-MM-DD`).
pub async fn create_test_transaction_on(
    db: &DatabaseConnection,
    profile_id: i64,
    actual: f64,
    date: &str,
) -> Result<entities::transaction::Model> {
    let mut new = new_test_transaction(profile_id);
    new.planned = actual;
    new.actual = actual;
    new.date = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid date literal");
    transaction::create_transaction(db, new).await
}

/// Creates a recurring test transaction.
pub async fn create_recurring_transaction(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<entities::transaction::Model> {
    let mut new = new_test_transaction(profile_id);
    new.description = "Recurring test transaction".to_string();
    new.is_recurring = true;
    transaction::create_transaction(db, new).await
}

/// Inserts a derived (apportioned) transaction linked to an origin.
///
/// Derived entries cannot be created through the public path, so tests
/// insert them directly, the way the apportionment writer would.
pub async fn create_derived_transaction(
    db: &DatabaseConnection,
    profile_id: i64,
    parent_id: i64,
) -> Result<entities::transaction::Model> {
    use sea_orm::ActiveModelTrait;

    let model = entities::transaction::ActiveModel {
        profile_id: Set(profile_id),
        subprofile_id: Set(None),
        kind: Set(TransactionKind::Expense),
        description: Set("Derived test transaction".to_string()),
        planned: Set(25.0),
        actual: Set(25.0),
        date: Set(NaiveDate::from_ymd_opt(2023, 10, 1).expect("valid date")),
        due_date: Set(None),
        payment_date: Set(None),
        paid: Set(false),
        notes: Set(None),
        label_ids: Set(Default::default()),
        is_shared: Set(false),
        is_recurring: Set(true),
        is_apportioned: Set(true),
        series_id: Set(None),
        current_installment: Set(None),
        total_installments: Set(None),
        parent_id: Set(Some(parent_id)),
        skipped_in_months: Set(Default::default()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Creates a test label with a default color.
pub async fn create_test_label(
    db: &DatabaseConnection,
    profile_id: i64,
    name: &str,
) -> Result<entities::label::Model> {
    label::create_label(db, profile_id, name.to_string(), "#3478f6".to_string()).await
}

/// Builds a plain transaction `Model` literal for pure-function tests.
///
/// # Defaults
/// Expense of 50.0 dated 2023-10-01, unpaid, no labels, no flags set.
pub fn sample_transaction(id: i64, profile_id: i64) -> entities::transaction::Model {
    entities::transaction::Model {
        id,
        profile_id,
        subprofile_id: None,
        kind: TransactionKind::Expense,
        description: format!("Sample transaction {id}"),
        planned: 50.0,
        actual: 50.0,
        date: NaiveDate::from_ymd_opt(2023, 10, 1).expect("valid date"),
        due_date: None,
        payment_date: None,
        paid: false,
        notes: None,
        label_ids: Default::default(),
        is_shared: false,
        is_recurring: false,
        is_apportioned: false,
        series_id: None,
        current_installment: None,
        total_installments: None,
        parent_id: None,
        skipped_in_months: Default::default(),
    }
}

/// Builds a plain label `Model` literal for pure-function tests.
pub fn sample_label(id: i64, profile_id: i64, name: &str) -> entities::label::Model {
    entities::label::Model {
        id,
        profile_id,
        name: name.to_string(),
        color: "#3478f6".to_string(),
        status: EntityStatus::Active,
        created_at: chrono::Utc::now(),
    }
}
