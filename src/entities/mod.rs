//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the document collections and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod label;
pub mod profile;
pub mod profile_metadata;
pub mod transaction;

// Re-export specific types to avoid conflicts
pub use label::{Column as LabelColumn, Entity as Label, Model as LabelModel};
pub use profile::{
    Column as ProfileColumn, Entity as Profile, EntityStatus, Model as ProfileModel, Subprofile,
    SubprofileList,
};
pub use profile_metadata::{
    Column as ProfileMetadataColumn, Entity as ProfileMetadata, Model as ProfileMetadataModel,
};
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, LabelIdSet, Model as TransactionModel,
    MonthSet, TransactionKind,
};
