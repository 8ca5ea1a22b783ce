// Degraded-mode behavior: the bridge never appears and the UI must render
// empty instead of crashing.

use profile_core::dispatch::CommandDispatcher;
use profile_core::error::dispatch::DispatchError;
use profile_core::error::transport::TransportError;
use profile_core::store::ProfileStore;
use profile_core::surface::notice::NoticeCenter;
use profile_core::surface::toolbar;
use profile_core::transport::{BridgeRegistry, InvokeTransport, Transport};

use std::sync::Arc;
use std::time::Duration;

/// **VALUE**: Verifies the degraded bootstrap: discovery exhausts its
/// ceiling, the list request resolves with a transport error, and the
/// toolbar renders zero profiles without panicking.
///
/// **WHY THIS MATTERS**: A missing host must never crash the UI. The
/// observed failure mode is an empty, read-only toolbar plus a diagnostic
/// log line - nothing more.
#[tokio::test(start_paused = true)]
async fn given_absent_bridge_when_bootstrapping_then_degraded_empty_toolbar() {
    // GIVEN: A registry no host ever populates
    let registry = Arc::new(BridgeRegistry::new());
    let store = ProfileStore::new();
    let notices = NoticeCenter::new();
    let transport = Arc::new(InvokeTransport::with_policy(
        registry,
        50,
        Duration::from_millis(100),
    ));
    let dispatcher =
        CommandDispatcher::new(Arc::clone(&transport) as Arc<_>, store.clone(), notices);

    // WHEN: Bootstrapping
    let readiness = transport.ready().await;
    let listing = dispatcher.request_profile_list().await;

    // THEN: Readiness reports permanent unavailability
    assert!(matches!(readiness, Err(TransportError::Unavailable { .. })));
    assert!(!transport.is_ready());

    // AND: The list request resolves with the same degraded error
    assert!(matches!(
        listing,
        Err(DispatchError::Transport(TransportError::Unavailable { .. }))
    ));

    // AND: The surface renders zero profiles
    assert!(toolbar::render(&store).await.is_empty());
}

/// Actions after exhaustion fail fast - no second 5-second polling loop.
#[tokio::test(start_paused = true)]
async fn given_exhausted_discovery_when_acting_again_then_fails_fast() {
    let registry = Arc::new(BridgeRegistry::new());
    let store = ProfileStore::new();
    let transport = Arc::new(InvokeTransport::with_policy(
        registry,
        5,
        Duration::from_millis(100),
    ));
    let dispatcher = CommandDispatcher::new(
        Arc::clone(&transport) as Arc<_>,
        store,
        NoticeCenter::new(),
    );

    dispatcher.request_profile_list().await.expect_err("degraded");

    // The memoized outcome answers without another polling loop.
    let before = tokio::time::Instant::now();
    dispatcher.request_profile_list().await.expect_err("degraded");
    assert_eq!(before.elapsed(), Duration::ZERO);
}
