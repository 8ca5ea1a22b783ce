//! Call/response transport binding.
//!
//! The host exposes a callable bridge, but the bridge may not be installed
//! yet when the UI first runs. Readiness is a bounded polling loop over the
//! known bridge slots: a fixed attempt ceiling with a fixed inter-attempt
//! delay. The outcome - found bridge or permanent unavailability - is
//! memoized so every dependent awaits the same discovery instead of
//! re-polling.

use crate::error::transport::TransportError;
use crate::proto::HostCommand;
use crate::transport::Transport;
use crate::transport::bridge::{BridgeRegistry, HostBridge};
use crate::{DISCOVERY_MAX_ATTEMPTS, DISCOVERY_RETRY_INTERVAL};

use common::ErrorLocation;

use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use backoff::backoff::{Backoff, Constant};
use log::{debug, info, trace, warn};
use serde_json::Value;
use tokio::sync::OnceCell;
use tokio::time::sleep as TokioSleep;

pub struct InvokeTransport {
    registry: Arc<BridgeRegistry>,
    max_attempts: u32,
    retry_interval: Duration,

    /// Discovery outcome, resolved exactly once. `None` means the attempt
    /// ceiling was exhausted - permanent for this session.
    discovered: OnceCell<Option<Arc<dyn HostBridge>>>,
}

impl InvokeTransport {
    pub fn new(registry: Arc<BridgeRegistry>) -> Self {
        Self::with_policy(registry, DISCOVERY_MAX_ATTEMPTS, DISCOVERY_RETRY_INTERVAL)
    }

    /// Custom discovery bounds (config-driven, or shortened for tests).
    pub fn with_policy(
        registry: Arc<BridgeRegistry>,
        max_attempts: u32,
        retry_interval: Duration,
    ) -> Self {
        Self {
            registry,
            max_attempts: max_attempts.max(1),
            retry_interval,
            discovered: OnceCell::new(),
        }
    }

    async fn discover(&self) -> Option<Arc<dyn HostBridge>> {
        debug!(
            "Starting bridge discovery (attempt ceiling {}, interval {:?})",
            self.max_attempts, self.retry_interval
        );

        let mut policy = Constant::new(self.retry_interval);
        let mut attempt = 0u32;

        loop {
            attempt += 1;

            if let Some(bridge) = self.registry.lookup() {
                info!("Host bridge discovered on attempt {attempt}");
                return Some(bridge);
            }

            if attempt >= self.max_attempts {
                warn!(
                    "Bridge discovery exhausted after {attempt} attempts, degrading to offline mode"
                );
                return None;
            }

            if let Some(delay) = policy.next_backoff() {
                trace!("Bridge not yet installed, retrying after {delay:?}");
                TokioSleep(delay).await;
            }
        }
    }

    async fn bridge(&self) -> Result<Arc<dyn HostBridge>, TransportError> {
        let outcome = self.discovered.get_or_init(|| self.discover()).await;

        match outcome {
            Some(bridge) => Ok(Arc::clone(bridge)),
            None => Err(TransportError::Unavailable {
                message: format!(
                    "No host bridge found after {} attempts",
                    self.max_attempts
                ),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

#[async_trait]
impl Transport for InvokeTransport {
    async fn ready(&self) -> Result<(), TransportError> {
        self.bridge().await.map(|_| ())
    }

    fn is_ready(&self) -> bool {
        matches!(self.discovered.get(), Some(Some(_)))
    }

    async fn send(&self, command: HostCommand) -> Result<Option<Value>, TransportError> {
        let bridge = self.bridge().await?;

        let kind = command.kind();
        trace!("Invoking host command {kind}");

        match bridge.invoke(command).await {
            Ok(value) => Ok(Some(value)),
            Err(message) => Err(TransportError::Rejected {
                message,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
