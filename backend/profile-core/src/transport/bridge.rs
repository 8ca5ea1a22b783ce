//! Host bridge slots and the discovery-time registry.

use crate::BRIDGE_PROBE_ORDER;
use crate::proto::HostCommand;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::{debug, trace};
use serde_json::Value;

/// Callable surface the host installs once its side of the bridge is up.
///
/// `invoke` carries host-side failures as plain strings, the way the host
/// reports them; the transport maps them into [`TransportError`]
/// (crate::error::transport::TransportError).
#[async_trait]
pub trait HostBridge: Send + Sync {
    async fn invoke(&self, command: HostCommand) -> Result<Value, String>;
}

/// Slots the host may publish its bridge under.
///
/// Hosts have installed the bridge under different names over time, so the
/// discovery loop probes the known slots in preference order: the primary
/// slot, the nested fallback, then the legacy-named global. The registry is
/// created by whoever wires the session and shared with the host - no
/// ambient globals.
#[derive(Default)]
pub struct BridgeRegistry {
    slots: RwLock<HashMap<&'static str, Arc<dyn HostBridge>>>,
}

impl BridgeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a bridge under `slot`. A later install replaces an earlier
    /// one in the same slot.
    pub fn install(&self, slot: &'static str, bridge: Arc<dyn HostBridge>) {
        if let Ok(mut slots) = self.slots.write() {
            debug!("Host bridge installed under slot {slot}");
            slots.insert(slot, bridge);
        }
    }

    /// Remove the bridge published under `slot`, if any.
    pub fn uninstall(&self, slot: &'static str) {
        if let Ok(mut slots) = self.slots.write() {
            if slots.remove(slot).is_some() {
                debug!("Host bridge removed from slot {slot}");
            }
        }
    }

    /// Probe the known slots in preference order. First found wins.
    pub fn lookup(&self) -> Option<Arc<dyn HostBridge>> {
        let slots = self.slots.read().ok()?;

        for slot in BRIDGE_PROBE_ORDER {
            if let Some(bridge) = slots.get(slot) {
                trace!("Found host bridge in slot {slot}");
                return Some(Arc::clone(bridge));
            }
        }

        None
    }
}
