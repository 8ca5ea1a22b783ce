//! JSON persistence for the demo host's profile registry.

use crate::error::ShellError;

use common::ErrorLocation;

use profile_core::proto::ProfileRecord;

use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

const PROFILES_FILE_NAME: &str = "profiles.json";

pub fn profiles_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join(PROFILES_FILE_NAME)
}

/// Load the persisted registry.
///
/// A missing file starts empty. A corrupt or unreadable file is logged and
/// also starts empty - the host has to come up regardless.
pub fn load_profiles(data_dir: &Path) -> Vec<ProfileRecord> {
    let path = profiles_file_path(data_dir);

    if !path.exists() {
        info!("No profiles file at {}, starting empty", path.display());
        return Vec::new();
    }

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(
                "Failed to read profiles file {}: {e}, starting empty",
                path.display()
            );
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<ProfileRecord>>(&contents) {
        Ok(profiles) => {
            info!("Loaded {} profiles from {}", profiles.len(), path.display());
            profiles
        }
        Err(e) => {
            warn!(
                "Failed to parse profiles file {}: {e}, starting empty",
                path.display()
            );
            Vec::new()
        }
    }
}

/// Persist the registry as pretty JSON using atomic write (temp file +
/// rename).
pub fn save_profiles(data_dir: &Path, profiles: &[ProfileRecord]) -> Result<(), ShellError> {
    std::fs::create_dir_all(data_dir).map_err(|e| ShellError::Host {
        message: format!("Failed to create data directory: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let path = profiles_file_path(data_dir);
    let temp_path = data_dir.join(format!("{}.tmp", PROFILES_FILE_NAME));

    let json = serde_json::to_string_pretty(profiles).map_err(|e| ShellError::Host {
        message: format!("Failed to serialize profiles: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    std::fs::write(&temp_path, json).map_err(|e| ShellError::Host {
        message: format!("Failed to write {}: {e}", temp_path.display()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    std::fs::rename(&temp_path, &path).map_err(|e| ShellError::Host {
        message: format!("Failed to replace {}: {e}", path.display()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    debug!("Persisted {} profiles to {}", profiles.len(), path.display());
    Ok(())
}
