// End-to-end synchronization over the post/receive binding: UI core on one
// side, fake host task on the other, events flowing through the real
// transport pump and ingestor.

use crate::helpers::{channel_session, record, wait_until};

use profile_core::surface::form::AddProfileForm;
use profile_core::surface::menu::{ContextMenu, MenuAction, PointerTarget};
use profile_core::surface::notice::NoticeLevel;
use profile_core::surface::toolbar::{self, ButtonIcon};

/// **VALUE**: Verifies the bootstrap round-trip - request goes out as a
/// frame, the snapshot event comes back, the ingestor populates the store,
/// and the toolbar renders with the glyph fallback.
///
/// **WHY THIS MATTERS**: This is the path every session starts with. It
/// exercises serialization, the inbound pump, the ingestor task, and the
/// store together.
#[tokio::test]
async fn given_seeded_host_when_list_requested_then_store_synchronized() {
    // GIVEN: A host seeded with one profile
    let session = channel_session(vec![record("a", "Mail")]);

    // WHEN: Bootstrapping
    session
        .dispatcher
        .request_profile_list()
        .await
        .expect("post succeeds");

    // THEN: The snapshot lands in the store
    wait_until(|| {
        let store = session.store.clone();
        async move { store.len().await == 1 }
    })
    .await;

    // AND: The toolbar renders the glyph fallback for the icon-less profile
    let buttons = toolbar::render(&session.store).await;
    assert_eq!(buttons[0].label, "Mail");
    assert_eq!(buttons[0].icon, ButtonIcon::Glyph('M'));
}

/// **VALUE**: Verifies creation through the whole stack - form submit,
/// command frame, host registry, ProfileAdded event, store upsert.
#[tokio::test]
async fn given_empty_host_when_form_submitted_then_profile_synchronized() {
    // GIVEN: An empty host and a filled form
    let session = channel_session(Vec::new());
    let mut form = AddProfileForm::new();
    form.set_name("Chat");
    form.set_url("https://chat.example");

    // WHEN: Submitting
    form.submit(&session.dispatcher).await.expect("post succeeds");

    // THEN: The host minted an id and the event round-trip stored it
    wait_until(|| {
        let store = session.store.clone();
        async move { store.len().await == 1 }
    })
    .await;

    let created = &session.store.list().await[0];
    assert_eq!(created.name, "Chat");
    assert!(!created.id.is_empty(), "Host assigns the id");
    assert_eq!(session.host_profiles.lock().unwrap().len(), 1);
}

/// **VALUE**: Verifies removal through the context menu - command frame,
/// host registry update, ProfileRemoved event, store removal.
#[tokio::test]
async fn given_synchronized_profile_when_removed_via_menu_then_gone_everywhere() {
    // GIVEN: A synchronized session with one profile
    let session = channel_session(vec![record("a", "Mail")]);
    session
        .dispatcher
        .request_profile_list()
        .await
        .expect("post succeeds");
    wait_until(|| {
        let store = session.store.clone();
        async move { store.len().await == 1 }
    })
    .await;

    // WHEN: Removing through the context menu
    let mut menu = ContextMenu::new();
    menu.handle_secondary_click(PointerTarget::ProfileButton(String::from("a")), 12, 34);
    menu.select(MenuAction::Remove, &session.dispatcher, &session.notices)
        .await;

    // THEN: Both sides drop it
    wait_until(|| {
        let store = session.store.clone();
        async move { store.is_empty().await }
    })
    .await;
    assert!(session.host_profiles.lock().unwrap().is_empty());
}

/// **VALUE**: Verifies a host error event surfaces as a notice without
/// mutating the store.
#[tokio::test]
async fn given_profile_unknown_to_host_when_activated_then_error_notice() {
    // GIVEN: A synchronized profile the host then forgets
    let session = channel_session(vec![record("a", "Mail")]);
    session
        .dispatcher
        .request_profile_list()
        .await
        .expect("post succeeds");
    wait_until(|| {
        let store = session.store.clone();
        async move { store.len().await == 1 }
    })
    .await;
    session.host_profiles.lock().unwrap().clear();

    // WHEN: Activating it (the post binding reports failures as events)
    session
        .dispatcher
        .activate_profile("a")
        .await
        .expect("the post itself succeeds");

    // THEN: The host's Error event becomes an error notice
    wait_until(|| {
        let notices = session.notices.clone();
        async move { !notices.is_empty() }
    })
    .await;
    let drained = session.notices.drain();
    assert_eq!(drained[0].level, NoticeLevel::Error);
    assert!(drained[0].message.contains("not found"));

    // AND: The local list is untouched by the error event
    assert_eq!(session.store.len().await, 1);
}

/// Snapshots replace: a second bootstrap after host-side changes leaves
/// exactly the host's current list.
#[tokio::test]
async fn given_host_side_changes_when_list_requested_again_then_replaced() {
    let session = channel_session(vec![record("a", "Mail"), record("b", "Chat")]);
    session
        .dispatcher
        .request_profile_list()
        .await
        .expect("post succeeds");
    wait_until(|| {
        let store = session.store.clone();
        async move { store.len().await == 2 }
    })
    .await;

    // Host replaces its registry behind the UI's back
    *session.host_profiles.lock().unwrap() = vec![record("c", "Tasks")];

    session
        .dispatcher
        .request_profile_list()
        .await
        .expect("post succeeds");

    wait_until(|| {
        let store = session.store.clone();
        async move {
            let ids: Vec<String> = store.list().await.into_iter().map(|p| p.id).collect();
            ids == vec!["c"]
        }
    })
    .await;
}
