//! Grouping business logic.
//!
//! Partitions an ordered transaction list into named buckets for display.
//! The partition is stable: group keys appear in first-seen order and each
//! transaction keeps its relative position within its bucket. The engine
//! never pre-sorts groups; presentation order is the caller's concern.

use crate::entities::{EntityStatus, label, transaction};

/// Bucket key for transactions with no matching active label.
pub const UNLABELED_GROUP: &str = "Unlabeled";
/// Display label for the income bucket in kind mode.
pub const INCOME_GROUP: &str = "Income";
/// Display label for the expense bucket in kind mode.
pub const EXPENSE_GROUP: &str = "Expenses";

/// How to partition a transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingMode {
    /// No grouping; the caller renders a flat list
    None,
    /// Group by the first matching label's name
    Label,
    /// Group by the transaction date, formatted `DD/MM/YYYY`
    Date,
    /// Group by income vs expense
    Kind,
}

/// A named bucket of transactions, in first-seen key order.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionGroup<'a> {
    /// Group key shown as the bucket header
    pub key: String,
    /// Members in their original relative order
    pub members: Vec<&'a transaction::Model>,
}

/// Partitions `transactions` into named groups.
///
/// Returns `None` for [`GroupingMode::None`] so the caller renders the flat
/// list unchanged. In label mode the key is the name of the first label (in
/// `labels` order) present in a transaction's label set; transactions with
/// no matching active label land in the reserved [`UNLABELED_GROUP`] bucket.
pub fn group<'a>(
    transactions: &'a [transaction::Model],
    mode: GroupingMode,
    labels: &[label::Model],
) -> Option<Vec<TransactionGroup<'a>>> {
    if mode == GroupingMode::None {
        return None;
    }

    let mut groups: Vec<TransactionGroup<'a>> = Vec::new();
    for tx in transactions {
        let key = group_key(tx, mode, labels);
        match groups.iter_mut().find(|g| g.key == key) {
            Some(existing) => existing.members.push(tx),
            None => groups.push(TransactionGroup {
                key,
                members: vec![tx],
            }),
        }
    }

    Some(groups)
}

fn group_key(tx: &transaction::Model, mode: GroupingMode, labels: &[label::Model]) -> String {
    match mode {
        GroupingMode::None => unreachable!("flat mode never reaches key computation"),
        GroupingMode::Label => labels
            .iter()
            .filter(|l| l.status == EntityStatus::Active)
            .find(|l| tx.label_ids.contains(l.id))
            .map_or_else(|| UNLABELED_GROUP.to_string(), |l| l.name.clone()),
        GroupingMode::Date => tx.date.format("%d/%m/%Y").to_string(),
        GroupingMode::Kind => match tx.kind {
            transaction::TransactionKind::Income => INCOME_GROUP.to_string(),
            transaction::TransactionKind::Expense => EXPENSE_GROUP.to_string(),
        },
    }
}
