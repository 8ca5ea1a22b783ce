//! Transport boundary between the UI core and the host process.
//!
//! One conceptual protocol, two bindings:
//!
//! - [`InvokeTransport`] - call/response over a host-installed bridge; the
//!   bridge may not exist yet at startup, so readiness is a bounded
//!   discovery loop.
//! - [`ChannelTransport`] - post/receive over text channels; always
//!   present, but inbound frames are parsed defensively.
//!
//! The rest of the core depends only on the [`Transport`] trait.

pub mod bridge;
pub mod channel;
pub mod invoke;

pub use bridge::{BridgeRegistry, HostBridge};
pub use channel::ChannelTransport;
pub use invoke::InvokeTransport;

use crate::error::transport::TransportError;
use crate::proto::HostCommand;

use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Resolve once the channel to the host is usable.
    ///
    /// The outcome is memoized: every dependent awaits the same underlying
    /// readiness signal, and a permanent failure keeps failing fast without
    /// re-polling.
    async fn ready(&self) -> Result<(), TransportError>;

    /// Whether readiness has already resolved successfully.
    fn is_ready(&self) -> bool;

    /// Send a command to the host.
    ///
    /// The call/response binding returns `Some(result)`. The post/receive
    /// binding returns `None`; the outcome, if any, arrives later as a host
    /// event.
    async fn send(&self, command: HostCommand) -> Result<Option<Value>, TransportError>;
}
