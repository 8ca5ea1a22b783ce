//! Toolbar view-model.

use crate::store::ProfileStore;

use models::Profile;

/// Icon shown on a profile button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonIcon {
    /// Custom icon from the profile's `icon_path`.
    Image(String),
    /// Generated fallback: uppercased first character of the name.
    Glyph(char),
}

/// One toolbar button, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileButton {
    pub id: String,
    pub label: String,
    pub icon: ButtonIcon,
    pub active: bool,
}

impl ProfileButton {
    fn from_profile(profile: &Profile, active: bool) -> Self {
        let icon = match &profile.icon_path {
            Some(path) => ButtonIcon::Image(path.clone()),
            None => ButtonIcon::Glyph(profile.glyph()),
        };

        Self {
            id: profile.id.clone(),
            label: profile.name.clone(),
            icon,
            active,
        }
    }
}

/// Project the store into toolbar buttons, insertion order preserved.
///
/// The button whose id matches the active marker carries the active flag;
/// an empty store renders as an empty toolbar (the degraded state when the
/// transport never became ready).
pub async fn render(store: &ProfileStore) -> Vec<ProfileButton> {
    let active_id = store.active_id().await;

    store
        .list()
        .await
        .iter()
        .map(|profile| {
            let active = active_id.as_deref() == Some(profile.id.as_str());
            ProfileButton::from_profile(profile, active)
        })
        .collect()
}
