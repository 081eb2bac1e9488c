//! Database configuration module.
//!
//! Handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the database schema always matches
//! the Rust struct definitions without manual SQL.

use crate::entities::{Label, Profile, ProfileMetadata, Transaction};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the environment or returns the default
/// `SQLite` path.
///
/// Looks for `DATABASE_URL` and falls back to a local `SQLite` file.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/homeledger.sqlite".to_string())
}

/// Establishes a connection to the database.
///
/// Uses [`get_database_url`], so `DATABASE_URL` overrides the default local
/// file.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables from the entity definitions.
///
/// Creates tables for profiles, transactions, labels, and profile metadata.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let profile_table = schema.create_table_from_entity(Profile);
    let transaction_table = schema.create_table_from_entity(Transaction);
    let label_table = schema.create_table_from_entity(Label);
    let metadata_table = schema.create_table_from_entity(ProfileMetadata);

    db.execute(builder.build(&profile_table)).await?;
    db.execute(builder.build(&transaction_table)).await?;
    db.execute(builder.build(&label_table)).await?;
    db.execute(builder.build(&metadata_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{
        label::Model as LabelModel, profile::Model as ProfileModel,
        profile_metadata::Model as ProfileMetadataModel, transaction::Model as TransactionModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<ProfileModel> = Profile::find().limit(1).all(&db).await?;
        let _: Vec<TransactionModel> = Transaction::find().limit(1).all(&db).await?;
        let _: Vec<LabelModel> = Label::find().limit(1).all(&db).await?;
        let _: Vec<ProfileMetadataModel> = ProfileMetadata::find().limit(1).all(&db).await?;

        Ok(())
    }
}
