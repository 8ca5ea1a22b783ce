pub mod config;
pub mod dispatch;
pub mod error;
pub mod ingest;
pub mod proto;
pub mod store;
pub mod surface;
pub mod transport;

#[cfg(test)]
mod tests;

use std::time::Duration;

/// Namespace hosts use when publishing their bridge.
pub const BRIDGE_NAMESPACE: &str = "alloy";

/// Preferred bridge slot, populated by current hosts.
pub const BRIDGE_PRIMARY_SLOT: &str = const_format::concatcp!(BRIDGE_NAMESPACE, ".host");

/// Nested fallback slot used by hosts that publish under their module path.
pub const BRIDGE_NESTED_SLOT: &str = const_format::concatcp!(BRIDGE_PRIMARY_SLOT, ".bridge");

/// Legacy-named global kept for hosts predating the namespaced slots.
pub const BRIDGE_LEGACY_SLOT: &str = const_format::concatcp!("__", BRIDGE_NAMESPACE, "_bridge");

/// Order the discovery loop probes the bridge slots in. First found wins.
pub const BRIDGE_PROBE_ORDER: [&str; 3] =
    [BRIDGE_PRIMARY_SLOT, BRIDGE_NESTED_SLOT, BRIDGE_LEGACY_SLOT];

/// Attempt ceiling for bridge discovery.
pub const DISCOVERY_MAX_ATTEMPTS: u32 = 50;

/// Fixed delay between discovery attempts.
pub const DISCOVERY_RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// Default bound on a single request/response command.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);
