//! Command dispatch: local intents to host commands.
//!
//! The dispatcher translates what the user did into outbound host commands
//! and folds direct results back into the store. Under the call/response
//! binding a command resolves to a value; under the post/receive binding
//! the same command resolves to nothing and the host answers later with an
//! event the ingestor picks up.
//!
//! # Activation ordering
//!
//! Activation requests are serialized by a monotonically increasing
//! sequence: the newest request owns the outcome. An older in-flight
//! request that finds itself superseded when its result finally arrives
//! discards that result, success or failure - last request wins.

mod pending;

pub use pending::PendingCommand;

use crate::DEFAULT_COMMAND_TIMEOUT;
use crate::error::dispatch::DispatchError;
use crate::error::transport::TransportError;
use crate::proto::{HostCommand, ProfileRecord};
use crate::store::ProfileStore;
use crate::surface::notice::NoticeCenter;
use crate::transport::Transport;

use common::ErrorLocation;

use models::{Profile, ProfileDraft};

use std::panic::Location;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use tokio::time::timeout as TokioTimeout;

#[derive(Clone)]
pub struct CommandDispatcher {
    transport: Arc<dyn Transport>,
    store: ProfileStore,
    notices: NoticeCenter,
    command_timeout: Duration,
    activation_seq: Arc<AtomicU64>,
    last_confirmed_active: Arc<RwLock<Option<String>>>,
}

impl CommandDispatcher {
    pub fn new(transport: Arc<dyn Transport>, store: ProfileStore, notices: NoticeCenter) -> Self {
        Self::with_timeout(transport, store, notices, DEFAULT_COMMAND_TIMEOUT)
    }

    /// Custom per-command timeout (config-driven, or shortened for tests).
    pub fn with_timeout(
        transport: Arc<dyn Transport>,
        store: ProfileStore,
        notices: NoticeCenter,
        command_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            store,
            notices,
            command_timeout,
            activation_seq: Arc::new(AtomicU64::new(0)),
            last_confirmed_active: Arc::new(RwLock::new(None)),
        }
    }

    /// Ask the host for the full profile list.
    ///
    /// A direct result replaces the entire store - full-list semantics, not
    /// a merge, so profiles absent from the result disappear from the view.
    /// Under the event-driven binding the replacement happens when the
    /// `ProfilesList` event reaches the ingestor instead.
    pub async fn request_profile_list(&self) -> Result<(), DispatchError> {
        if let Some(value) = self.issue(HostCommand::GetProfiles).await? {
            let records: Vec<ProfileRecord> = parse_result(value)?;
            info!("Host returned {} profiles", records.len());
            let profiles: Vec<Profile> = records.into_iter().map(Profile::from).collect();
            self.store.apply_snapshot(profiles).await;
        }
        Ok(())
    }

    /// Ask the host to create a profile from a locally validated draft.
    ///
    /// On a direct confirmation the returned profile is merged into the
    /// store and a transient success notice is pushed. On rejection the
    /// error is surfaced as a notice and the store is left untouched.
    pub async fn create_profile(&self, draft: ProfileDraft) -> Result<(), DispatchError> {
        let display_name = draft.name().to_string();
        let (name, url, user_agent, icon_path) = draft.into_parts();

        let command = HostCommand::AddProfile {
            name,
            url,
            icon_path,
            user_agent,
        };

        match self.issue(command).await {
            Ok(Some(value)) => {
                let record: ProfileRecord = parse_result(value)?;
                info!("Host confirmed profile {} ({})", record.name, record.id);
                self.store.upsert(Profile::from(record)).await;
                self.notices
                    .success(format!("Service \"{display_name}\" added"));
                Ok(())
            }
            // Confirmation arrives later as a ProfileAdded event.
            Ok(None) => Ok(()),
            Err(e) => {
                warn!("Profile creation rejected: {e}");
                self.notices
                    .error(format!("Could not add \"{display_name}\": {e}"));
                Err(e)
            }
        }
    }

    /// Switch the visible session to `id`.
    ///
    /// The profile must be present in the store. The active marker is set
    /// optimistically so the toolbar highlights immediately, then the host
    /// call goes out. A newer activation preempts this one: a result that
    /// arrives after being superseded is discarded. A failure that is still
    /// current reverts the marker to the last host-confirmed active id and
    /// surfaces a notice.
    pub async fn activate_profile(&self, id: &str) -> Result<(), DispatchError> {
        if self.store.get(id).await.is_none() {
            return Err(DispatchError::UnknownProfile {
                id: id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let ticket = self.activation_seq.fetch_add(1, Ordering::SeqCst) + 1;

        if self.store.set_active(id).await.is_err() {
            // the profile vanished between the lookup and the marker
            return Err(DispatchError::UnknownProfile {
                id: id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let result = self
            .issue(HostCommand::ShowProfile { id: id.to_string() })
            .await;

        if self.activation_seq.load(Ordering::SeqCst) != ticket {
            debug!("Activation of {id} superseded, discarding late result");
            return Ok(());
        }

        match result {
            Ok(_) => {
                debug!("Host confirmed activation of {id}");
                *self.last_confirmed_active.write().await = Some(id.to_string());
                Ok(())
            }
            Err(e) => {
                warn!("Activation of {id} failed: {e}");
                self.reconcile_active().await;
                self.notices.error(format!("Could not switch profile: {e}"));
                Err(e)
            }
        }
    }

    /// Ask the host to remove a profile.
    ///
    /// A direct result removes it locally; under the event-driven binding
    /// the `ProfileRemoved` event does.
    pub async fn remove_profile(&self, id: &str) -> Result<(), DispatchError> {
        if self.store.get(id).await.is_none() {
            return Err(DispatchError::UnknownProfile {
                id: id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        match self.issue(HostCommand::RemoveProfile { id: id.to_string() }).await {
            Ok(Some(_)) => {
                self.store.remove(id).await;
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => {
                warn!("Profile removal rejected: {e}");
                self.notices.error(format!("Could not remove profile: {e}"));
                Err(e)
            }
        }
    }

    /// Fire-and-forget request to open the host's settings panel.
    ///
    /// No local state changes. A transport failure is logged, not surfaced;
    /// there is nothing the user could do about it from here.
    pub async fn request_settings_panel(&self) {
        if let Err(e) = self.issue(HostCommand::ShowSettings).await {
            warn!("Settings panel request failed: {e}");
        }
    }

    /// Revert the optimistic marker to the last host-confirmed active id.
    async fn reconcile_active(&self) {
        let confirmed = self.last_confirmed_active.read().await.clone();

        match confirmed {
            Some(id) => {
                debug!("Reverting active marker to last confirmed profile {id}");
                if self.store.set_active(&id).await.is_err() {
                    // the confirmed profile is gone too; nothing to restore
                    self.store.clear_active().await;
                }
            }
            None => self.store.clear_active().await,
        }
    }

    /// Run `command` as a pending command bounded by the configured timeout.
    async fn issue(&self, command: HostCommand) -> Result<Option<Value>, DispatchError> {
        let pending = PendingCommand::new(command.kind());

        match TokioTimeout(self.command_timeout, self.transport.send(command)).await {
            Ok(Ok(value)) => {
                pending.resolved();
                Ok(value)
            }
            Ok(Err(e)) => {
                pending.failed(&e);
                Err(DispatchError::Transport(e))
            }
            Err(_) => Err(pending.timed_out(self.command_timeout)),
        }
    }
}

/// Decode a direct host result into the expected shape.
fn parse_result<T: DeserializeOwned>(value: Value) -> Result<T, DispatchError> {
    serde_json::from_value(value)
        .map_err(|e| {
            DispatchError::Transport(TransportError::Decode {
                message: format!("Malformed host result: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })
        })
}
