//! Core business logic - framework-agnostic engine functions.
//!
//! Pure decision functions (apportionment, batch validation, grouping,
//! skip predicate, difference indicator) plus async mutations that delegate
//! I/O to the store. The presentation layer calls these directly and
//! re-derives its views from pushed snapshots.

/// Proportional apportionment of shared transactions across subprofiles
pub mod apportion;
/// Bulk-operation gating over client selections
pub mod batch;
/// Stable partitioning of transaction lists into display groups
pub mod grouping;
/// Label creation, listing, and lifecycle
pub mod label;
/// Archive, restore, and cascading purge for profiles and subprofiles
pub mod lifecycle;
/// Month registry maintenance and month-key helpers
pub mod months;
/// Profile and subprofile creation and retrieval
pub mod profile;
/// Per-month skip/unskip state for recurring and installment transactions
pub mod recurrence;
/// Transaction CRUD, paid toggling, and the difference indicator
pub mod transaction;
