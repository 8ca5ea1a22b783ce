//! Event ingestion: folds asynchronous host events into the profile store.
//!
//! The ingestor is the serialization point for host-pushed state. It runs
//! as a dedicated task draining the transport's event channel and applies
//! events strictly in arrival order - no reordering, no batching.

use crate::proto::HostEvent;
use crate::store::ProfileStore;
use crate::surface::notice::NoticeCenter;

use models::Profile;

use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Folds host events into local state.
///
/// Together with the command dispatcher's optimistic updates, this is the
/// only writer the store has.
#[derive(Clone)]
pub struct EventIngestor {
    store: ProfileStore,
    notices: NoticeCenter,
}

impl EventIngestor {
    pub fn new(store: ProfileStore, notices: NoticeCenter) -> Self {
        Self { store, notices }
    }

    /// Spawn the ingestion task. Runs until the event channel closes.
    pub fn spawn(self, mut events: mpsc::Receiver<HostEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            debug!("Event ingestor started");
            while let Some(event) = events.recv().await {
                self.apply(event).await;
            }
            debug!("Event ingestor stopped: event channel closed");
        })
    }

    /// Fold one event into local state.
    ///
    /// | Event kind | Effect |
    /// |---|---|
    /// | `ProfilesList` | replace the collection; active marker cleared if absent |
    /// | `ProfileAdded` | insert if absent; duplicate ignored |
    /// | `ProfileRemoved` | remove by id; clear active marker if it was active |
    /// | `Error` | no store mutation; surfaced as a notice |
    /// | unknown | logged and ignored |
    pub async fn apply(&self, event: HostEvent) {
        match event {
            HostEvent::ProfilesList { profiles } => {
                info!("Received profile list snapshot ({} profiles)", profiles.len());
                let profiles = profiles.into_iter().map(Profile::from).collect();
                self.store.apply_snapshot(profiles).await;
            }
            HostEvent::ProfileAdded { profile } => {
                let profile = Profile::from(profile);
                if self.store.get(&profile.id).await.is_some() {
                    debug!("Duplicate profile-added for {}, ignoring", profile.id);
                } else {
                    info!("Profile added: {} ({})", profile.name, profile.id);
                    self.store.upsert(profile).await;
                }
            }
            HostEvent::ProfileRemoved { id } => {
                info!("Profile removed: {id}");
                self.store.remove(&id).await;
            }
            HostEvent::Error { message } => {
                warn!("Host reported error: {message}");
                self.notices.error(message);
            }
            HostEvent::Unknown => {
                debug!("Ignoring unknown event kind");
            }
        }
    }
}
