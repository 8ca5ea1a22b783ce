//! Post/receive transport binding.
//!
//! Commands are serialized to JSON text and posted on an outbound channel;
//! the host pushes JSON text events on an inbound channel. There is no
//! discovery phase - the channel pair is handed over at construction - but
//! inbound frames are parsed defensively: a malformed payload is logged and
//! dropped without touching local state.

use crate::error::transport::TransportError;
use crate::proto::{HostCommand, HostEvent};
use crate::transport::Transport;

use common::ErrorLocation;

use std::panic::Location;

use async_trait::async_trait;
use log::{debug, trace, warn};
use serde_json::Value;
use tokio::sync::mpsc;

pub struct ChannelTransport {
    outbound: mpsc::Sender<String>,
}

impl ChannelTransport {
    /// Wire the binding: commands go out on `outbound` as text frames, and
    /// frames arriving on `inbound` are decoded and forwarded to `events`
    /// (the ingestor's channel).
    ///
    /// The inbound pump runs as a detached task and stops when either side
    /// of its channel pair closes.
    pub fn new(
        outbound: mpsc::Sender<String>,
        inbound: mpsc::Receiver<String>,
        events: mpsc::Sender<HostEvent>,
    ) -> Self {
        tokio::spawn(pump_inbound(inbound, events));
        Self { outbound }
    }
}

async fn pump_inbound(mut inbound: mpsc::Receiver<String>, events: mpsc::Sender<HostEvent>) {
    debug!("Inbound event pump started");

    while let Some(frame) = inbound.recv().await {
        let event = match HostEvent::from_json(&frame) {
            Ok(event) => event,
            Err(e) => {
                warn!("Dropping malformed host message: {e}");
                continue;
            }
        };

        if events.send(event).await.is_err() {
            debug!("Event channel closed, stopping inbound pump");
            return;
        }
    }

    debug!("Inbound event pump stopped: host channel closed");
}

#[async_trait]
impl Transport for ChannelTransport {
    /// The post channel is synchronous and always present; there is no
    /// discovery phase for this binding.
    async fn ready(&self) -> Result<(), TransportError> {
        Ok(())
    }

    fn is_ready(&self) -> bool {
        !self.outbound.is_closed()
    }

    async fn send(&self, command: HostCommand) -> Result<Option<Value>, TransportError> {
        let kind = command.kind();

        let frame = command.to_json().map_err(|e| TransportError::Encode {
            message: format!("Failed to encode {kind}: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        trace!("Posting host command {kind}");

        self.outbound
            .send(frame)
            .await
            .map_err(|e| TransportError::Closed {
                message: format!("Host channel rejected {kind}: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(None)
    }
}
