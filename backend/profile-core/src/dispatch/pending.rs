//! In-flight request bookkeeping.

use crate::error::dispatch::DispatchError;
use crate::error::transport::TransportError;

use common::ErrorLocation;

use std::panic::Location;
use std::time::Duration;

use log::{debug, warn};
use tokio::time::Instant;
use uuid::Uuid;

/// A dispatched request awaiting its result.
///
/// Created on dispatch, destroyed on resolution, failure, or timeout. The
/// correlation id ties the log lines of one command together.
#[derive(Debug)]
pub struct PendingCommand {
    id: Uuid,
    kind: &'static str,
    issued: Instant,
}

impl PendingCommand {
    pub(crate) fn new(kind: &'static str) -> Self {
        let id = Uuid::new_v4();
        debug!("Command {kind} dispatched (correlation {id})");
        Self {
            id,
            kind,
            issued: Instant::now(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub(crate) fn resolved(&self) {
        debug!(
            "Command {} resolved after {:?} (correlation {})",
            self.kind,
            self.issued.elapsed(),
            self.id
        );
    }

    pub(crate) fn failed(&self, error: &TransportError) {
        warn!(
            "Command {} failed after {:?}: {error} (correlation {})",
            self.kind,
            self.issued.elapsed(),
            self.id
        );
    }

    /// Consume the pending command into a timeout error.
    #[track_caller]
    pub(crate) fn timed_out(self, bound: Duration) -> DispatchError {
        warn!(
            "Command {} gave no result within {:?} (correlation {})",
            self.kind, bound, self.id
        );
        DispatchError::Timeout {
            kind: self.kind,
            elapsed_ms: bound.as_millis() as u64,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
