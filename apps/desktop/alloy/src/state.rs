//! Session wiring: one UI session's store, notices, dispatcher, and the
//! ingestor task behind them.

use crate::host::HostHandle;

use profile_core::config::AppConfig;
use profile_core::dispatch::CommandDispatcher;
use profile_core::ingest::EventIngestor;
use profile_core::store::ProfileStore;
use profile_core::surface::notice::NoticeCenter;
use profile_core::transport::ChannelTransport;

use std::sync::Arc;

use log::info;
use tokio::sync::mpsc;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Everything one UI session holds.
///
/// Constructed once per session; the store starts empty and is discarded
/// with the session - profile persistence is the host's job.
pub struct ShellSession {
    pub store: ProfileStore,
    pub notices: NoticeCenter,
    pub dispatcher: CommandDispatcher,
}

impl ShellSession {
    /// Wire the core over the post/receive binding against `host`.
    pub fn connect(config: &AppConfig, host: HostHandle) -> Self {
        let store = ProfileStore::new();
        let notices = NoticeCenter::with_limit(config.ui.notice_limit);

        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        EventIngestor::new(store.clone(), notices.clone()).spawn(event_rx);

        let transport = Arc::new(ChannelTransport::new(host.commands, host.events, event_tx));
        let dispatcher = CommandDispatcher::with_timeout(
            transport,
            store.clone(),
            notices.clone(),
            config.transport.command_timeout(),
        );

        info!("Shell session wired over the channel binding");

        Self {
            store,
            notices,
            dispatcher,
        }
    }
}
