// Shared fakes for unit tests. Integration tests carry their own copies in
// integration_tests/helpers.rs (separate compilation unit).

use crate::error::transport::TransportError;
use crate::proto::{HostCommand, ProfileRecord};
use crate::transport::Transport;

use models::Profile;

use std::collections::HashMap;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

pub fn profile(id: &str, name: &str) -> Profile {
    Profile {
        id: id.to_string(),
        name: name.to_string(),
        url: format!("https://{}.example", name.to_lowercase()),
        user_agent: None,
        icon_path: None,
    }
}

pub fn record(id: &str, name: &str) -> ProfileRecord {
    ProfileRecord::from(profile(id, name))
}

/// JSON value a host would return from GetProfiles.
pub fn profiles_value(records: &[ProfileRecord]) -> Value {
    serde_json::to_value(records).expect("records serialize")
}

type Responder = dyn Fn(&HostCommand) -> Result<Option<Value>, TransportError> + Send + Sync;

/// Scripted call/response transport for dispatcher tests.
///
/// Records every command it is given and answers through the supplied
/// responder. Activation calls can be delayed per profile id to stage
/// out-of-order confirmations under paused time.
pub struct ScriptedTransport {
    sent: StdMutex<Vec<HostCommand>>,
    activation_delays: StdMutex<HashMap<String, Duration>>,
    responder: Box<Responder>,
}

impl ScriptedTransport {
    pub fn new(
        responder: impl Fn(&HostCommand) -> Result<Option<Value>, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            sent: StdMutex::new(Vec::new()),
            activation_delays: StdMutex::new(HashMap::new()),
            responder: Box::new(responder),
        }
    }

    /// Transport that confirms every command with a null result.
    pub fn accepting() -> Self {
        Self::new(|_| Ok(Some(Value::Null)))
    }

    pub fn delay_activation(&self, id: &str, delay: Duration) {
        self.activation_delays
            .lock()
            .unwrap()
            .insert(id.to_string(), delay);
    }

    pub fn sent(&self) -> Vec<HostCommand> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_kinds(&self) -> Vec<&'static str> {
        self.sent.lock().unwrap().iter().map(HostCommand::kind).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn ready(&self) -> Result<(), TransportError> {
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }

    async fn send(&self, command: HostCommand) -> Result<Option<Value>, TransportError> {
        let delay = match &command {
            HostCommand::ShowProfile { id } => {
                self.activation_delays.lock().unwrap().get(id).copied()
            }
            _ => None,
        };

        self.sent.lock().unwrap().push(command.clone());

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        (self.responder)(&command)
    }
}

/// Transport whose sends never resolve. For timeout tests.
pub struct StalledTransport;

#[async_trait]
impl Transport for StalledTransport {
    async fn ready(&self) -> Result<(), TransportError> {
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }

    async fn send(&self, _command: HostCommand) -> Result<Option<Value>, TransportError> {
        std::future::pending().await
    }
}
