// Shared wiring for integration tests: an in-process fake host for the
// post/receive binding and a bridge-backed fake host for the call/response
// binding.

use profile_core::dispatch::CommandDispatcher;
use profile_core::ingest::EventIngestor;
use profile_core::proto::{HostCommand, HostEvent, ProfileRecord};
use profile_core::store::ProfileStore;
use profile_core::surface::notice::NoticeCenter;
use profile_core::transport::{ChannelTransport, HostBridge};

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;
use uuid::Uuid;

pub fn record(id: &str, name: &str) -> ProfileRecord {
    ProfileRecord {
        id: id.to_string(),
        name: name.to_string(),
        url: format!("https://{}.example", name.to_lowercase()),
        user_agent: None,
        icon_path: None,
    }
}

/// Poll `condition` until it holds or a second passes.
pub async fn wait_until<F, Fut>(mut condition: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
    loop {
        if condition().await {
            return;
        }
        if tokio::time::Instant::now() > deadline {
            panic!("Condition not met within deadline");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Everything a test needs to drive the core over the post/receive binding.
pub struct ChannelSession {
    pub dispatcher: CommandDispatcher,
    pub store: ProfileStore,
    pub notices: NoticeCenter,
    /// The fake host's registry, for staging host-side state directly.
    pub host_profiles: Arc<Mutex<Vec<ProfileRecord>>>,
}

/// Wire a full session against an in-process fake host: channel transport,
/// ingestor task, dispatcher, store.
///
/// The fake host mirrors the real one's message handling: creations mint a
/// uuid and answer with ProfileAdded, removals answer with ProfileRemoved,
/// GetProfiles answers with a full snapshot, and showing an unknown profile
/// answers with an Error event.
pub fn channel_session(seed: Vec<ProfileRecord>) -> ChannelSession {
    let (cmd_tx, cmd_rx) = mpsc::channel::<String>(32);
    let (evt_tx, evt_rx) = mpsc::channel::<String>(32);
    let (ing_tx, ing_rx) = mpsc::channel::<HostEvent>(32);

    let host_profiles = Arc::new(Mutex::new(seed));
    tokio::spawn(run_fake_host(cmd_rx, evt_tx, Arc::clone(&host_profiles)));

    let store = ProfileStore::new();
    let notices = NoticeCenter::new();

    EventIngestor::new(store.clone(), notices.clone()).spawn(ing_rx);

    let transport = Arc::new(ChannelTransport::new(cmd_tx, evt_rx, ing_tx));
    let dispatcher = CommandDispatcher::new(transport, store.clone(), notices.clone());

    ChannelSession {
        dispatcher,
        store,
        notices,
        host_profiles,
    }
}

async fn run_fake_host(
    mut commands: mpsc::Receiver<String>,
    events: mpsc::Sender<String>,
    profiles: Arc<Mutex<Vec<ProfileRecord>>>,
) {
    while let Some(frame) = commands.recv().await {
        let command = HostCommand::from_json(&frame).expect("fake host got malformed command");

        let reply = match command {
            HostCommand::AddProfile {
                name,
                url,
                icon_path,
                user_agent,
            } => {
                let created = ProfileRecord {
                    id: Uuid::new_v4().to_string(),
                    name,
                    url,
                    user_agent,
                    icon_path,
                };
                profiles.lock().unwrap().push(created.clone());
                Some(HostEvent::ProfileAdded { profile: created })
            }
            HostCommand::RemoveProfile { id } => {
                profiles.lock().unwrap().retain(|p| p.id != id);
                Some(HostEvent::ProfileRemoved { id })
            }
            HostCommand::GetProfiles => Some(HostEvent::ProfilesList {
                profiles: profiles.lock().unwrap().clone(),
            }),
            HostCommand::ShowProfile { id } => {
                let known = profiles.lock().unwrap().iter().any(|p| p.id == id);
                if known {
                    None
                } else {
                    Some(HostEvent::Error {
                        message: format!("Profile {id} not found"),
                    })
                }
            }
            HostCommand::ShowSettings => None,
        };

        if let Some(event) = reply {
            let frame = event.to_json().expect("fake host event serializes");
            if events.send(frame).await.is_err() {
                return;
            }
        }
    }
}

/// Call/response fake host: a [`HostBridge`] over the same registry
/// behavior, answering with direct result values.
pub struct FakeHostBridge {
    profiles: Arc<Mutex<Vec<ProfileRecord>>>,
    show_delay_ms: Mutex<Option<u64>>,
}

impl FakeHostBridge {
    pub fn new(seed: Vec<ProfileRecord>) -> Arc<Self> {
        Arc::new(Self {
            profiles: Arc::new(Mutex::new(seed)),
            show_delay_ms: Mutex::new(None),
        })
    }

    /// Delay ShowProfile confirmations to stage overlapping activations.
    pub fn set_show_delay(&self, delay: Duration) {
        *self.show_delay_ms.lock().unwrap() = Some(delay.as_millis() as u64);
    }

    pub fn profiles(&self) -> Vec<ProfileRecord> {
        self.profiles.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostBridge for FakeHostBridge {
    async fn invoke(&self, command: HostCommand) -> Result<Value, String> {
        match command {
            HostCommand::AddProfile {
                name,
                url,
                icon_path,
                user_agent,
            } => {
                if name == "Forbidden" {
                    return Err(String::from("name is reserved"));
                }
                let created = ProfileRecord {
                    id: Uuid::new_v4().to_string(),
                    name,
                    url,
                    user_agent,
                    icon_path,
                };
                self.profiles.lock().unwrap().push(created.clone());
                Ok(serde_json::to_value(created).expect("record serializes"))
            }
            HostCommand::RemoveProfile { id } => {
                self.profiles.lock().unwrap().retain(|p| p.id != id);
                Ok(Value::Null)
            }
            HostCommand::GetProfiles => {
                let listed = self.profiles.lock().unwrap().clone();
                Ok(serde_json::to_value(listed).expect("records serialize"))
            }
            HostCommand::ShowProfile { id } => {
                let delay = *self.show_delay_ms.lock().unwrap();
                if let Some(ms) = delay {
                    tokio::time::sleep(Duration::from_millis(ms)).await;
                }
                let known = self.profiles.lock().unwrap().iter().any(|p| p.id == id);
                if known {
                    Ok(Value::Null)
                } else {
                    Err(format!("Profile {id} not found"))
                }
            }
            HostCommand::ShowSettings => Ok(Value::Null),
        }
    }
}
