//! Unified error types and result handling.
//!
//! Validation rejections carry a user-facing message in their `Display`
//! output and are returned, never panicked; the caller surfaces them and
//! takes no further action. Store failures propagate as [`Error::Database`]
//! with no engine-side retry.

use thiserror::Error;

/// All errors the engine can return.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or parsing problem
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// A precondition on the requested operation does not hold
    #[error("{message}")]
    Validation {
        /// User-facing explanation of the rejected operation
        message: String,
    },

    /// Amount is zero, negative where disallowed, or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending amount
        amount: f64,
    },

    /// Month key is not of the form `"YYYY-MM"`
    #[error("Invalid month '{month}': expected YYYY-MM")]
    InvalidMonth {
        /// The offending month key
        month: String,
    },

    /// The enclosing month is closed; skipped entries cannot be reactivated
    #[error("Month {month} is closed and cannot be modified")]
    MonthClosed {
        /// The closed month key
        month: String,
    },

    /// Skip was requested on a transaction that is neither recurring nor
    /// part of an installment series
    #[error("'{description}' is not recurring and cannot be skipped")]
    NotRecurring {
        /// Description of the offending transaction
        description: String,
    },

    /// The transaction is derived and can only be managed through its origin
    #[error("'{description}' is managed through its originating transaction")]
    ManagedByOrigin {
        /// Description of the offending transaction
        description: String,
    },

    /// No profile with the given id
    #[error("Profile {id} not found")]
    ProfileNotFound {
        /// The missing profile id
        id: i64,
    },

    /// The referenced subprofile is not embedded in the owning profile
    #[error("Subprofile {id} not found in its profile")]
    SubprofileNotFound {
        /// The missing subprofile id
        id: String,
    },

    /// No label with the given id
    #[error("Label {id} not found")]
    LabelNotFound {
        /// The missing label id
        id: i64,
    },

    /// The label is still referenced by at least one transaction
    #[error("Label '{name}' is in use and cannot be archived")]
    LabelInUse {
        /// Name of the referenced label
        name: String,
    },

    /// Error from the underlying store
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
