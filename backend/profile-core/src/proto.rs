//! Wire protocol between the UI core and the host process.
//!
//! Messages travel as JSON text frames, adjacently tagged:
//! `{"type": "...", "payload": {...}}`. Commands flow UI -> host, events
//! flow host -> UI. The same shapes serve both transport bindings; the
//! call/response binding carries the command as a value instead of a frame.
//!
//! Field names on the wire follow the host's convention. [`ProfileRecord`]
//! is the translation boundary: nothing outside this module touches raw
//! JSON shapes, and the rest of the crate works with [`models::Profile`].

use models::Profile;

use serde::{Deserialize, Serialize};

/// Commands the UI sends to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum HostCommand {
    AddProfile {
        name: String,
        url: String,
        icon_path: Option<String>,
        user_agent: Option<String>,
    },
    ShowProfile {
        id: String,
    },
    RemoveProfile {
        id: String,
    },
    GetProfiles,
    ShowSettings,
}

impl HostCommand {
    /// Parse a command from a JSON text frame.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the command to a JSON text frame.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Stable name used in log lines and timeout errors.
    pub fn kind(&self) -> &'static str {
        match self {
            HostCommand::AddProfile { .. } => "AddProfile",
            HostCommand::ShowProfile { .. } => "ShowProfile",
            HostCommand::RemoveProfile { .. } => "RemoveProfile",
            HostCommand::GetProfiles => "GetProfiles",
            HostCommand::ShowSettings => "ShowSettings",
        }
    }
}

/// Unsolicited events the host pushes to the UI.
///
/// The `Unknown` catch-all absorbs event kinds this build does not know
/// yet; the ingestor logs and ignores them, so newer hosts stay compatible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum HostEvent {
    ProfilesList {
        profiles: Vec<ProfileRecord>,
    },
    ProfileAdded {
        profile: ProfileRecord,
    },
    ProfileRemoved {
        id: String,
    },
    Error {
        message: String,
    },
    #[serde(other)]
    Unknown,
}

impl HostEvent {
    /// Parse an event from a JSON text frame.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the event to a JSON text frame.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Profile as it appears on the wire.
///
/// Optional keys default to `None` so hosts that omit null fields instead
/// of sending them stay parseable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub icon_path: Option<String>,
}

impl From<ProfileRecord> for Profile {
    fn from(record: ProfileRecord) -> Self {
        Profile {
            id: record.id,
            name: record.name,
            url: record.url,
            user_agent: record.user_agent,
            icon_path: record.icon_path,
        }
    }
}

impl From<Profile> for ProfileRecord {
    fn from(profile: Profile) -> Self {
        ProfileRecord {
            id: profile.id,
            name: profile.name,
            url: profile.url,
            user_agent: profile.user_agent,
            icon_path: profile.icon_path,
        }
    }
}
