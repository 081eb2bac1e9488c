//! Snapshot subscription - push-based delivery of entity sets to the UI.
//!
//! The store itself has no change streams, so pushes are explicit: after a
//! caller awaits a mutation, it asks the hub to `publish`, which re-queries
//! the profile's entity set and fans a fresh [`ProfileSnapshot`] out to
//! every subscriber over a `tokio::sync::watch` channel. Subscribers
//! recompute their derived views (grouping, apportionment) as pure
//! projections over each received snapshot; the hub caches nothing derived.

use std::collections::HashMap;
use std::sync::Mutex;

use sea_orm::{DatabaseConnection, EntityTrait};
use tokio::sync::watch;
use tracing::debug;

use crate::{
    core::{label::get_labels_for_profile, transaction::get_transactions_for_profile},
    entities::{Profile, label, profile, transaction},
    errors::Result,
};

/// One consistent view of a profile's entity set.
///
/// `profile` is `None` once the profile has been purged, so readers observe
/// not-found rather than a stale document.
#[derive(Debug, Clone, Default)]
pub struct ProfileSnapshot {
    /// The profile document, or `None` after a purge
    pub profile: Option<profile::Model>,
    /// All transactions of the profile, newest first
    pub transactions: Vec<transaction::Model>,
    /// All labels of the profile, in creation order
    pub labels: Vec<label::Model>,
}

/// Fan-out point for profile snapshots.
///
/// One watch channel per subscribed profile id. Dropping all receivers does
/// not tear the channel down; an unused channel just holds the last
/// snapshot.
#[derive(Debug, Default)]
pub struct SnapshotHub {
    channels: Mutex<HashMap<i64, watch::Sender<ProfileSnapshot>>>,
}

impl SnapshotHub {
    /// Creates an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to a profile's snapshot stream.
    ///
    /// Loads the current entity set so the receiver starts with a fresh
    /// value instead of waiting for the first mutation.
    pub async fn subscribe(
        &self,
        db: &DatabaseConnection,
        profile_id: i64,
    ) -> Result<watch::Receiver<ProfileSnapshot>> {
        let snapshot = load_snapshot(db, profile_id).await?;

        let mut channels = self.channels.lock().expect("snapshot hub lock poisoned");
        let receiver = match channels.get(&profile_id) {
            Some(sender) => {
                sender.send_replace(snapshot);
                sender.subscribe()
            }
            None => {
                let (sender, receiver) = watch::channel(snapshot);
                channels.insert(profile_id, sender);
                receiver
            }
        };
        Ok(receiver)
    }

    /// Re-queries a profile's entity set and pushes it to subscribers.
    ///
    /// Called by the presentation layer after awaiting any mutation. A
    /// profile nobody subscribed to is skipped without a query.
    pub async fn publish(&self, db: &DatabaseConnection, profile_id: i64) -> Result<()> {
        let has_channel = {
            let channels = self.channels.lock().expect("snapshot hub lock poisoned");
            channels.contains_key(&profile_id)
        };
        if !has_channel {
            debug!("publish for profile {profile_id} with no subscribers");
            return Ok(());
        }

        let snapshot = load_snapshot(db, profile_id).await?;

        let channels = self.channels.lock().expect("snapshot hub lock poisoned");
        if let Some(sender) = channels.get(&profile_id) {
            sender.send_replace(snapshot);
        }
        Ok(())
    }
}

async fn load_snapshot(db: &DatabaseConnection, profile_id: i64) -> Result<ProfileSnapshot> {
    let profile = Profile::find_by_id(profile_id).one(db).await?;
    let transactions = get_transactions_for_profile(db, profile_id).await?;
    let labels = get_labels_for_profile(db, profile_id).await?;

    Ok(ProfileSnapshot {
        profile,
        transactions,
        labels,
    })
}
