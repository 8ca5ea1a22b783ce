//! Per-profile context menu.

use crate::dispatch::CommandDispatcher;
use crate::surface::notice::NoticeCenter;

use log::debug;

/// Where a pointer event landed, as far as the menu cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    ProfileButton(String),
    Menu,
    Outside,
}

/// Keys the menu reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Cancel,
    Other,
}

/// Menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Edit,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenMenu {
    profile_id: String,
    x: i32,
    y: i32,
}

/// Context menu state machine.
///
/// Opens on secondary-click over a profile button, pinned to the cursor
/// coordinates. Closes on a click outside both the menu and any profile
/// button, or on the cancel key.
#[derive(Debug, Default)]
pub struct ContextMenu {
    open: Option<OpenMenu>,
}

impl ContextMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Profile the open menu points at, if any.
    pub fn target_profile(&self) -> Option<&str> {
        self.open.as_ref().map(|m| m.profile_id.as_str())
    }

    /// Cursor coordinates the open menu is pinned to.
    pub fn position(&self) -> Option<(i32, i32)> {
        self.open.as_ref().map(|m| (m.x, m.y))
    }

    /// Secondary-click: over a profile button opens the menu at the cursor;
    /// anywhere else closes it.
    pub fn handle_secondary_click(&mut self, target: PointerTarget, x: i32, y: i32) {
        match target {
            PointerTarget::ProfileButton(profile_id) => {
                debug!("Context menu opened for profile {profile_id} at ({x}, {y})");
                self.open = Some(OpenMenu { profile_id, x, y });
            }
            _ => self.close(),
        }
    }

    /// Primary click: closes the menu unless the click landed on the menu
    /// itself or on a profile button.
    pub fn handle_click(&mut self, target: &PointerTarget) {
        if self.open.is_some() && matches!(target, PointerTarget::Outside) {
            self.close();
        }
    }

    pub fn handle_key(&mut self, key: MenuKey) {
        if matches!(key, MenuKey::Cancel) {
            self.close();
        }
    }

    pub fn close(&mut self) {
        if self.open.take().is_some() {
            debug!("Context menu closed");
        }
    }

    /// Run a menu entry against its target profile. Always closes the menu.
    pub async fn select(
        &mut self,
        action: MenuAction,
        dispatcher: &CommandDispatcher,
        notices: &NoticeCenter,
    ) {
        let Some(menu) = self.open.take() else {
            return;
        };

        match action {
            MenuAction::Edit => {
                // the edit workflow is still a stub in the host
                notices.info("Editing profiles is not yet implemented");
            }
            MenuAction::Remove => {
                if let Err(e) = dispatcher.remove_profile(&menu.profile_id).await {
                    debug!("Remove from context menu failed: {e}");
                }
            }
        }
    }
}
