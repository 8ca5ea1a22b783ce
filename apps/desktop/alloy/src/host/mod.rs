//! Embedded demo host: the in-process peer for the post/receive binding.
//!
//! The real host owns webview lifecycle, session isolation, and rendering;
//! this one owns only a profile registry with JSON persistence, so the
//! shell has a live counterpart to synchronize against. Message handling
//! mirrors the real host's surface: creations mint an id and answer with
//! `ProfileAdded`, removals answer with `ProfileRemoved`, `GetProfiles`
//! answers with a full snapshot, and unknown targets answer with `Error`.

pub mod persistence;

use profile_core::proto::{HostCommand, HostEvent, ProfileRecord};

use std::path::PathBuf;

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use tokio::sync::mpsc;
use uuid::Uuid;

const CHANNEL_CAPACITY: usize = 64;

/// Starter registry used when demo seeding is requested and nothing is
/// persisted yet.
static DEMO_SEED: Lazy<Vec<ProfileRecord>> = Lazy::new(|| {
    [
        ("demo-whatsapp", "WhatsApp", "https://web.whatsapp.com"),
        ("demo-gmail", "Gmail", "https://mail.google.com"),
        ("demo-slack", "Slack", "https://app.slack.com/client"),
    ]
    .into_iter()
    .map(|(id, name, url)| ProfileRecord {
        id: id.to_string(),
        name: name.to_string(),
        url: url.to_string(),
        user_agent: None,
        icon_path: None,
    })
    .collect()
});

/// UI-side ends of the host's channel pair, ready to hand to
/// `ChannelTransport`.
pub struct HostHandle {
    pub commands: mpsc::Sender<String>,
    pub events: mpsc::Receiver<String>,
}

pub struct HostService {
    data_dir: PathBuf,
    profiles: Vec<ProfileRecord>,
}

impl HostService {
    /// Load the persisted registry and spawn the host loop.
    ///
    /// With `seed_demo` set and nothing persisted, the registry starts with
    /// the demo profiles instead of empty.
    pub fn spawn(data_dir: PathBuf, seed_demo: bool) -> HostHandle {
        let mut profiles = persistence::load_profiles(&data_dir);

        if profiles.is_empty() && seed_demo {
            info!("Seeding demo profiles");
            profiles = DEMO_SEED.clone();
        }

        let (cmd_tx, cmd_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (evt_tx, evt_rx) = mpsc::channel(CHANNEL_CAPACITY);

        let service = Self { data_dir, profiles };
        tokio::spawn(service.run(cmd_rx, evt_tx));

        HostHandle {
            commands: cmd_tx,
            events: evt_rx,
        }
    }

    async fn run(mut self, mut commands: mpsc::Receiver<String>, events: mpsc::Sender<String>) {
        debug!("Demo host started with {} profiles", self.profiles.len());

        while let Some(frame) = commands.recv().await {
            let command = match HostCommand::from_json(&frame) {
                Ok(command) => command,
                Err(e) => {
                    warn!("Demo host dropping malformed command: {e}");
                    continue;
                }
            };

            if let Some(event) = self.handle(command) {
                match event.to_json() {
                    Ok(frame) => {
                        if events.send(frame).await.is_err() {
                            debug!("UI side gone, demo host stopping");
                            return;
                        }
                    }
                    Err(e) => warn!("Demo host failed to encode event: {e}"),
                }
            }
        }

        debug!("Demo host stopped: command channel closed");
    }

    fn handle(&mut self, command: HostCommand) -> Option<HostEvent> {
        match command {
            HostCommand::AddProfile {
                name,
                url,
                icon_path,
                user_agent,
            } => {
                let profile = ProfileRecord {
                    id: Uuid::new_v4().to_string(),
                    name,
                    url,
                    user_agent,
                    icon_path,
                };
                info!("Demo host created profile {} ({})", profile.name, profile.id);
                self.profiles.push(profile.clone());
                self.persist();
                Some(HostEvent::ProfileAdded { profile })
            }
            HostCommand::RemoveProfile { id } => {
                let before = self.profiles.len();
                self.profiles.retain(|p| p.id != id);

                if self.profiles.len() == before {
                    return Some(HostEvent::Error {
                        message: format!("Profile {id} not found"),
                    });
                }

                info!("Demo host removed profile {id}");
                self.persist();
                Some(HostEvent::ProfileRemoved { id })
            }
            HostCommand::GetProfiles => Some(HostEvent::ProfilesList {
                profiles: self.profiles.clone(),
            }),
            HostCommand::ShowProfile { id } => match self.profiles.iter().find(|p| p.id == id) {
                Some(profile) => {
                    // the real host surfaces the isolated webview here
                    info!("Demo host surfacing session {} ({})", profile.name, profile.id);
                    None
                }
                None => Some(HostEvent::Error {
                    message: format!("Profile {id} not found"),
                }),
            },
            HostCommand::ShowSettings => {
                info!("Demo host would open the settings panel");
                None
            }
        }
    }

    fn persist(&self) {
        if let Err(e) = persistence::save_profiles(&self.data_dir, &self.profiles) {
            warn!("Failed to persist profiles: {e}");
        }
    }
}
