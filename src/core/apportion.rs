//! Apportionment business logic.
//!
//! Splits a shared transaction's realized value across a profile's active
//! subprofiles, proportional to each one's revenue contribution. The
//! calculation is pure and runs on every render of a shared transaction, so
//! it stays O(number of subprofiles) and allocates only the output vector.
//! The sum of shares equals the transaction's `actual` to within
//! floating-point rounding; no cent-rebalancing is performed.

use std::collections::HashMap;

use crate::{
    entities::{SubprofileList, transaction},
    errors::{Error, Result},
};

/// One subprofile's monetary share of a shared transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ApportionedShare {
    /// The subprofile receiving this share
    pub subprofile_id: String,
    /// Monetary amount, `actual * proportion`
    pub amount: f64,
}

/// Derives each active subprofile's proportion from its revenue.
///
/// Proportions are `revenue / total_revenue` over the profile's active
/// subprofiles and sum to 1. Returns an empty map when there are no active
/// subprofiles or the total revenue is zero.
pub fn revenue_proportions(subprofiles: &SubprofileList) -> HashMap<String, f64> {
    let total: f64 = subprofiles.active().map(|s| s.revenue).sum();
    if total <= 0.0 {
        return HashMap::new();
    }

    subprofiles
        .active()
        .map(|s| (s.id.clone(), s.revenue / total))
        .collect()
}

/// Computes each active subprofile's monetary share of a shared transaction.
///
/// `share(sub) = transaction.actual * proportion(sub)`. A subprofile with no
/// entry in the proportion map gets a zero share rather than an error, so
/// orphaned or newly added subprofiles never break rendering.
///
/// # Errors
/// * [`Error::Validation`] if the transaction is not shared
/// * [`Error::Validation`] if any proportion is negative or not finite
pub fn apportion(
    transaction: &transaction::Model,
    proportions: &HashMap<String, f64>,
    subprofiles: &SubprofileList,
) -> Result<Vec<ApportionedShare>> {
    if !transaction.is_shared {
        return Err(Error::Validation {
            message: format!("'{}' is not a shared transaction", transaction.description),
        });
    }

    if proportions.values().any(|p| !p.is_finite() || *p < 0.0) {
        return Err(Error::Validation {
            message: "Apportionment proportions must be non-negative".to_string(),
        });
    }

    let shares = subprofiles
        .active()
        .map(|sub| {
            let proportion = proportions.get(&sub.id).copied().unwrap_or(0.0);
            ApportionedShare {
                subprofile_id: sub.id.clone(),
                amount: transaction.actual * proportion,
            }
        })
        .collect();

    Ok(shares)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::{EntityStatus, Subprofile};
    use crate::test_utils::*;

    fn subprofiles(revenues: &[(&str, f64)]) -> SubprofileList {
        SubprofileList(
            revenues
                .iter()
                .map(|(id, revenue)| Subprofile {
                    id: (*id).to_string(),
                    name: (*id).to_string(),
                    status: EntityStatus::Active,
                    revenue: *revenue,
                })
                .collect(),
        )
    }

    #[test]
    fn test_revenue_proportions() {
        let subs = subprofiles(&[("a", 2000.0), ("b", 1000.0), ("c", 1000.0)]);
        let proportions = revenue_proportions(&subs);

        assert_eq!(proportions["a"], 0.5);
        assert_eq!(proportions["b"], 0.25);
        assert_eq!(proportions["c"], 0.25);

        let total: f64 = proportions.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_revenue_proportions_skips_archived() {
        let mut subs = subprofiles(&[("a", 1000.0), ("b", 1000.0)]);
        subs.0[1].status = EntityStatus::Archived;

        let proportions = revenue_proportions(&subs);
        assert_eq!(proportions.len(), 1);
        assert_eq!(proportions["a"], 1.0);
    }

    #[test]
    fn test_revenue_proportions_zero_total() {
        let subs = subprofiles(&[("a", 0.0), ("b", 0.0)]);
        assert!(revenue_proportions(&subs).is_empty());
    }

    #[test]
    fn test_shares_sum_to_actual() {
        let subs = subprofiles(&[("a", 3100.0), ("b", 1700.0), ("c", 450.0)]);
        let proportions = revenue_proportions(&subs);

        let mut tx = sample_transaction(1, 1);
        tx.is_shared = true;
        tx.actual = 123.45;

        let shares = apportion(&tx, &proportions, &subs).unwrap();
        assert_eq!(shares.len(), 3);

        let total: f64 = shares.iter().map(|s| s.amount).sum();
        assert!((total - tx.actual).abs() < 1e-9);
    }

    #[test]
    fn test_missing_proportion_entry_is_zero_share() {
        let subs = subprofiles(&[("a", 1000.0), ("b", 1000.0)]);
        let mut proportions = revenue_proportions(&subs);
        proportions.remove("b");

        let mut tx = sample_transaction(1, 1);
        tx.is_shared = true;
        tx.actual = 80.0;

        let shares = apportion(&tx, &proportions, &subs).unwrap();
        let share_b = shares.iter().find(|s| s.subprofile_id == "b").unwrap();
        assert_eq!(share_b.amount, 0.0);
    }

    #[test]
    fn test_rejects_non_shared_transaction() {
        let subs = subprofiles(&[("a", 1000.0)]);
        let proportions = revenue_proportions(&subs);

        let tx = sample_transaction(1, 1);
        assert!(!tx.is_shared);

        let result = apportion(&tx, &proportions, &subs);
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_rejects_negative_proportion() {
        let subs = subprofiles(&[("a", 1000.0)]);
        let mut proportions = HashMap::new();
        proportions.insert("a".to_string(), -0.5);

        let mut tx = sample_transaction(1, 1);
        tx.is_shared = true;

        let result = apportion(&tx, &proportions, &subs);
        assert!(matches!(result, Err(Error::Validation { .. })));
    }
}
