pub mod builder;

use serde::{Deserialize, Serialize};

/// Glyph used when a profile name has no usable first character.
const FALLBACK_GLYPH: char = '?';

/// A named, isolated web-session descriptor.
///
/// Profiles are owned by the host process; the UI holds a read-mostly
/// replica. Every instance originates from a host-confirmed creation or a
/// full-list synchronization - the UI never fabricates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Opaque identifier minted by the host. Stable across sessions.
    pub id: String,

    /// Display label. Non-empty.
    pub name: String,

    /// Address the isolated session navigates to.
    pub url: String,

    /// Optional user-agent override for the session.
    pub user_agent: Option<String>,

    /// Optional path/URI to a custom icon. Absence triggers the generated
    /// fallback glyph.
    pub icon_path: Option<String>,
}

impl Profile {
    /// Fallback toolbar glyph: the first character of the name, uppercased.
    ///
    /// Used whenever `icon_path` is `None`. Names are non-empty by
    /// invariant, but an empty name still yields a placeholder rather
    /// than a panic.
    pub fn glyph(&self) -> char {
        self.name
            .chars()
            .next()
            .and_then(|first| first.to_uppercase().next())
            .unwrap_or(FALLBACK_GLYPH)
    }

    /// Whether the profile carries a custom icon.
    pub fn has_icon(&self) -> bool {
        self.icon_path.is_some()
    }
}
