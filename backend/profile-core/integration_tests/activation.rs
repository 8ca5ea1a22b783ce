// End-to-end activation over the call/response binding: bridge discovery,
// direct results, last-request-wins, and failure reconciliation.

use crate::helpers::{FakeHostBridge, record};

use profile_core::BRIDGE_PRIMARY_SLOT;
use profile_core::dispatch::CommandDispatcher;
use profile_core::store::ProfileStore;
use profile_core::surface::notice::{NoticeCenter, NoticeLevel};
use profile_core::transport::{BridgeRegistry, InvokeTransport, Transport};

use std::sync::Arc;
use std::time::Duration;

fn session_over(
    bridge: Arc<FakeHostBridge>,
) -> (CommandDispatcher, ProfileStore, NoticeCenter) {
    let registry = Arc::new(BridgeRegistry::new());
    registry.install(BRIDGE_PRIMARY_SLOT, bridge);

    let store = ProfileStore::new();
    let notices = NoticeCenter::new();
    let transport = Arc::new(InvokeTransport::new(registry));
    let dispatcher = CommandDispatcher::new(transport, store.clone(), notices.clone());

    (dispatcher, store, notices)
}

/// **VALUE**: Verifies the full call/response session: late bridge install,
/// discovery, direct-result synchronization, creation, activation.
///
/// **WHY THIS MATTERS**: This is the binding where results come back
/// directly instead of as events; the dispatcher does the folding the
/// ingestor does elsewhere. The two paths must agree.
#[tokio::test]
async fn given_late_bridge_when_session_bootstraps_then_full_flow_works() {
    // GIVEN: A registry whose bridge appears a few polls in
    let registry = Arc::new(BridgeRegistry::new());
    let bridge = FakeHostBridge::new(vec![record("a", "Mail")]);
    tokio::spawn({
        let registry = Arc::clone(&registry);
        let bridge = Arc::clone(&bridge);
        async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            registry.install(BRIDGE_PRIMARY_SLOT, bridge);
        }
    });

    let store = ProfileStore::new();
    let notices = NoticeCenter::new();
    let transport = Arc::new(InvokeTransport::with_policy(
        Arc::clone(&registry),
        50,
        Duration::from_millis(10),
    ));
    let dispatcher =
        CommandDispatcher::new(Arc::clone(&transport) as Arc<_>, store.clone(), notices.clone());

    // WHEN: Waiting for readiness and bootstrapping
    transport.ready().await.expect("bridge installed late");
    dispatcher
        .request_profile_list()
        .await
        .expect("direct result");

    // THEN: The direct result populated the store synchronously
    assert_eq!(store.len().await, 1);

    // AND: Creation folds the host-minted profile straight in
    let draft = models::ProfileDraft::builder()
        .with_name("Chat")
        .with_url("https://chat.example")
        .build()
        .expect("valid draft");
    dispatcher.create_profile(draft).await.expect("creation confirmed");
    assert_eq!(store.len().await, 2);
    assert_eq!(notices.drain()[0].level, NoticeLevel::Success);

    // AND: Activation confirms and sticks
    let chat_id = store
        .list()
        .await
        .iter()
        .find(|p| p.name == "Chat")
        .expect("chat present")
        .id
        .clone();
    dispatcher.activate_profile(&chat_id).await.expect("confirmed");
    assert!(store.is_active(&chat_id).await);
}

/// **VALUE**: Verifies last-request-wins through the real transport: the
/// first activation's confirmation arrives after the second was issued and
/// is discarded.
#[tokio::test]
async fn given_slow_confirmations_when_switching_fast_then_last_request_wins() {
    // GIVEN: A host that confirms activations slowly
    let bridge = FakeHostBridge::new(vec![record("x", "Mail"), record("y", "Chat")]);
    bridge.set_show_delay(Duration::from_millis(50));
    let (dispatcher, store, _) = session_over(Arc::clone(&bridge));
    dispatcher.request_profile_list().await.expect("direct result");

    // WHEN: Activating x then y while x is still pending
    let first = tokio::spawn({
        let dispatcher = dispatcher.clone();
        async move { dispatcher.activate_profile("x").await }
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    let second = tokio::spawn({
        let dispatcher = dispatcher.clone();
        async move { dispatcher.activate_profile("y").await }
    });

    first.await.expect("task completes").expect("discarded, not an error");
    second.await.expect("task completes").expect("confirmed");

    // THEN: The profile activated last is the one marked active
    assert!(store.is_active("y").await);
}

/// **VALUE**: Verifies reconciliation against a real rejection: the marker
/// falls back to the last confirmed profile and the failure surfaces.
#[tokio::test]
async fn given_confirmed_profile_when_next_activation_rejected_then_marker_reverts() {
    // GIVEN: "a" confirmed active; "ghost" exists locally but not host-side
    let bridge = FakeHostBridge::new(vec![record("a", "Mail")]);
    let (dispatcher, store, notices) = session_over(bridge);
    dispatcher.request_profile_list().await.expect("direct result");
    dispatcher.activate_profile("a").await.expect("confirmed");

    store
        .upsert(models::Profile {
            id: String::from("ghost"),
            name: String::from("Ghost"),
            url: String::from("https://ghost.example"),
            user_agent: None,
            icon_path: None,
        })
        .await;

    // WHEN: Activating the profile the host rejects
    let result = dispatcher.activate_profile("ghost").await;

    // THEN: Failure surfaced, marker back on the confirmed profile
    assert!(result.is_err());
    assert!(store.is_active("a").await);
    assert_eq!(notices.drain()[0].level, NoticeLevel::Error);
}

/// A host-rejected creation surfaces a notice and leaves both sides
/// unchanged.
#[tokio::test]
async fn given_reserved_name_when_created_then_rejected_without_mutation() {
    let bridge = FakeHostBridge::new(Vec::new());
    let (dispatcher, store, notices) = session_over(Arc::clone(&bridge));

    let draft = models::ProfileDraft::builder()
        .with_name("Forbidden")
        .with_url("https://forbidden.example")
        .build()
        .expect("locally valid");

    let result = dispatcher.create_profile(draft).await;

    assert!(result.is_err());
    assert!(store.is_empty().await);
    assert!(bridge.profiles().is_empty());
    assert_eq!(notices.drain()[0].level, NoticeLevel::Error);
}
