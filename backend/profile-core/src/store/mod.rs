//! Client-side profile cache.
//!
//! The host owns the profiles; this store holds the UI's replica plus the
//! active-profile marker. It is the single source of truth for rendering.
//!
//! # Writers
//!
//! Exactly two components mutate the store: the event ingestor (folding
//! host events) and the command dispatcher (optimistic activation and
//! direct-result merges). The interaction surface only reads.
//!
//! # Invariants
//!
//! - At most one profile is active at any time.
//! - Ids are unique; duplicate ids inside a snapshot keep the first
//!   occurrence.
//! - The store never fabricates a profile; every entry originates from a
//!   host-confirmed creation or a full-list synchronization.

use crate::error::store::StoreError;

use common::ErrorLocation;

use models::Profile;

use std::panic::Location;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct StoreInner {
    profiles: Vec<Profile>,
    active_id: Option<String>,
}

/// Cache of host-owned profiles plus the active marker.
///
/// Cloneable handle; all clones share the same state. Mutations apply
/// immediately under the write lock and are visible to the next read.
#[derive(Clone, Default)]
pub struct ProfileStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl ProfileStore {
    /// Create an empty store. Populated by the first successful list
    /// synchronization.
    pub fn new() -> Self {
        Self::default()
    }

    /// Profiles in insertion order.
    pub async fn list(&self) -> Vec<Profile> {
        self.inner.read().await.profiles.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Profile> {
        self.inner
            .read()
            .await
            .profiles
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub async fn active_id(&self) -> Option<String> {
        self.inner.read().await.active_id.clone()
    }

    pub async fn is_active(&self, id: &str) -> bool {
        self.inner.read().await.active_id.as_deref() == Some(id)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.profiles.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.profiles.is_empty()
    }

    /// Mark `id` active. The profile must already be present - the store
    /// never fabricates entries.
    pub async fn set_active(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;

        if !inner.profiles.iter().any(|p| p.id == id) {
            return Err(StoreError::UnknownProfile {
                id: id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if inner.active_id.as_deref() == Some(id) {
            debug!("Profile {id} is already active");
            return Ok(());
        }

        info!("Active profile: {:?} -> {id}", inner.active_id.as_deref());
        inner.active_id = Some(id.to_string());
        Ok(())
    }

    pub async fn clear_active(&self) {
        let mut inner = self.inner.write().await;
        if let Some(old) = inner.active_id.take() {
            info!("Cleared active profile (was {old})");
        }
    }

    /// Replace the entire collection with a host snapshot.
    ///
    /// Full-list semantics: entries absent from the snapshot disappear from
    /// the view, and there is no tombstone memory - a later snapshot can
    /// bring an id back. The active marker survives only if its id is still
    /// present.
    pub async fn apply_snapshot(&self, profiles: Vec<Profile>) {
        let mut inner = self.inner.write().await;

        let mut deduped: Vec<Profile> = Vec::with_capacity(profiles.len());
        for profile in profiles {
            if deduped.iter().any(|p| p.id == profile.id) {
                warn!(
                    "Snapshot contains duplicate profile id {}, keeping first occurrence",
                    profile.id
                );
                continue;
            }
            deduped.push(profile);
        }

        if let Some(active) = inner.active_id.clone() {
            if !deduped.iter().any(|p| p.id == active) {
                info!("Active profile {active} absent from snapshot, clearing marker");
                inner.active_id = None;
            }
        }

        info!("Applied profile snapshot ({} profiles)", deduped.len());
        inner.profiles = deduped;
    }

    /// Insert a host-confirmed profile, or replace the entry with the same
    /// id in place.
    pub async fn upsert(&self, profile: Profile) {
        let mut inner = self.inner.write().await;

        match inner.profiles.iter().position(|p| p.id == profile.id) {
            Some(index) => {
                debug!("Replacing profile {}", profile.id);
                inner.profiles[index] = profile;
            }
            None => {
                debug!("Inserting profile {} ({})", profile.id, profile.name);
                inner.profiles.push(profile);
            }
        }
    }

    /// Remove by id, clearing the active marker when the removed profile
    /// was active. Returns whether anything was removed.
    pub async fn remove(&self, id: &str) -> bool {
        let mut inner = self.inner.write().await;

        let before = inner.profiles.len();
        inner.profiles.retain(|p| p.id != id);
        let removed = inner.profiles.len() != before;

        if removed {
            debug!("Removed profile {id}");
            if inner.active_id.as_deref() == Some(id) {
                info!("Removed profile {id} was active, clearing marker");
                inner.active_id = None;
            }
        } else {
            debug!("Remove requested for unknown profile {id}");
        }

        removed
    }
}
