// Unit tests for the context-menu state machine.

use crate::dispatch::CommandDispatcher;
use crate::proto::HostCommand;
use crate::store::ProfileStore;
use crate::surface::menu::{ContextMenu, MenuAction, MenuKey, PointerTarget};
use crate::surface::notice::{NoticeCenter, NoticeLevel};
use crate::tests::support::{ScriptedTransport, profile};

use std::sync::Arc;

fn open_menu_for(id: &str) -> ContextMenu {
    let mut menu = ContextMenu::new();
    menu.handle_secondary_click(PointerTarget::ProfileButton(id.to_string()), 40, 80);
    menu
}

/// **VALUE**: Verifies the menu opens pinned to the cursor over a profile
/// button.
#[test]
fn given_secondary_click_on_button_when_handled_then_menu_opens_at_cursor() {
    // GIVEN/WHEN: Secondary click on profile "a" at (40, 80)
    let menu = open_menu_for("a");

    // THEN: Open, targeting "a", pinned to the coordinates
    assert!(menu.is_open());
    assert_eq!(menu.target_profile(), Some("a"));
    assert_eq!(menu.position(), Some((40, 80)));
}

/// Secondary click anywhere else closes an open menu.
#[test]
fn given_open_menu_when_secondary_click_elsewhere_then_closed() {
    let mut menu = open_menu_for("a");

    menu.handle_secondary_click(PointerTarget::Outside, 5, 5);

    assert!(!menu.is_open());
}

/// **VALUE**: Verifies the close rules - outside clicks close, clicks on the
/// menu or any profile button do not.
///
/// **BUG THIS CATCHES**: Would catch the menu closing the instant the user
/// clicks one of its own entries.
#[test]
fn given_open_menu_when_clicks_handled_then_only_outside_closes() {
    // GIVEN: An open menu
    let mut menu = open_menu_for("a");

    // WHEN/THEN: Click on the menu keeps it open
    menu.handle_click(&PointerTarget::Menu);
    assert!(menu.is_open());

    // WHEN/THEN: Click on a profile button keeps it open
    menu.handle_click(&PointerTarget::ProfileButton(String::from("b")));
    assert!(menu.is_open());

    // WHEN/THEN: Click outside closes it
    menu.handle_click(&PointerTarget::Outside);
    assert!(!menu.is_open());
}

/// The cancel key closes the menu; other keys do nothing.
#[test]
fn given_open_menu_when_keys_handled_then_cancel_closes() {
    let mut menu = open_menu_for("a");

    menu.handle_key(MenuKey::Other);
    assert!(menu.is_open());

    menu.handle_key(MenuKey::Cancel);
    assert!(!menu.is_open());
}

/// Re-opening over another button retargets the menu.
#[test]
fn given_open_menu_when_secondary_click_on_other_button_then_retargeted() {
    let mut menu = open_menu_for("a");

    menu.handle_secondary_click(PointerTarget::ProfileButton(String::from("b")), 10, 20);

    assert_eq!(menu.target_profile(), Some("b"));
    assert_eq!(menu.position(), Some((10, 20)));
}

/// **VALUE**: Verifies the edit entry is a stub - it surfaces a
/// not-yet-implemented notice and performs no host call.
#[tokio::test]
async fn given_open_menu_when_edit_selected_then_stub_notice_and_no_dispatch() {
    // GIVEN: An open menu over a populated store
    let transport = Arc::new(ScriptedTransport::accepting());
    let store = ProfileStore::new();
    store.apply_snapshot(vec![profile("a", "Mail")]).await;
    let notices = NoticeCenter::new();
    let dispatcher =
        CommandDispatcher::new(Arc::clone(&transport) as Arc<_>, store, notices.clone());
    let mut menu = open_menu_for("a");

    // WHEN: Selecting Edit
    menu.select(MenuAction::Edit, &dispatcher, &notices).await;

    // THEN: Menu closed, stub notice queued, no command sent
    assert!(!menu.is_open());
    let drained = notices.drain();
    assert_eq!(drained.len(), 1);
    assert_eq!(drained[0].level, NoticeLevel::Info);
    assert!(drained[0].message.contains("not yet implemented"));
    assert!(transport.sent().is_empty());
}

/// The remove entry dispatches a removal for the menu's target profile.
#[tokio::test]
async fn given_open_menu_when_remove_selected_then_removal_dispatched() {
    let transport = Arc::new(ScriptedTransport::accepting());
    let store = ProfileStore::new();
    store.apply_snapshot(vec![profile("a", "Mail")]).await;
    let notices = NoticeCenter::new();
    let dispatcher = CommandDispatcher::new(
        Arc::clone(&transport) as Arc<_>,
        store.clone(),
        notices.clone(),
    );
    let mut menu = open_menu_for("a");

    menu.select(MenuAction::Remove, &dispatcher, &notices).await;

    assert!(!menu.is_open());
    assert_eq!(
        transport.sent(),
        vec![HostCommand::RemoveProfile {
            id: String::from("a")
        }]
    );
    assert!(store.is_empty().await);
}

/// Selecting with no open menu is a no-op.
#[tokio::test]
async fn given_closed_menu_when_action_selected_then_nothing_happens() {
    let transport = Arc::new(ScriptedTransport::accepting());
    let notices = NoticeCenter::new();
    let dispatcher = CommandDispatcher::new(
        Arc::clone(&transport) as Arc<_>,
        ProfileStore::new(),
        notices.clone(),
    );
    let mut menu = ContextMenu::new();

    menu.select(MenuAction::Remove, &dispatcher, &notices).await;

    assert!(transport.sent().is_empty());
    assert!(notices.is_empty());
}
