// Unit tests for the toolbar view-model.

use crate::store::ProfileStore;
use crate::surface::toolbar::{self, ButtonIcon};
use crate::tests::support::profile;

use models::Profile;

/// **VALUE**: Verifies the icon fallback - no icon_path means the uppercased
/// first character of the name.
///
/// **WHY THIS MATTERS**: This is the documented rendering rule for every
/// profile created without a custom icon, which is most of them.
#[tokio::test]
async fn given_profile_without_icon_when_rendered_then_glyph_button() {
    // GIVEN: A store with one icon-less profile named "Mail"
    let store = ProfileStore::new();
    store.apply_snapshot(vec![profile("a", "Mail")]).await;

    // WHEN: Rendering the toolbar
    let buttons = toolbar::render(&store).await;

    // THEN: One button, glyph 'M', not active
    assert_eq!(buttons.len(), 1);
    assert_eq!(buttons[0].label, "Mail");
    assert_eq!(buttons[0].icon, ButtonIcon::Glyph('M'));
    assert!(!buttons[0].active);
}

/// A custom icon path renders as an image button.
#[tokio::test]
async fn given_profile_with_icon_when_rendered_then_image_button() {
    let store = ProfileStore::new();
    store
        .apply_snapshot(vec![Profile {
            icon_path: Some(String::from("/icons/mail.png")),
            ..profile("a", "Mail")
        }])
        .await;

    let buttons = toolbar::render(&store).await;

    assert_eq!(
        buttons[0].icon,
        ButtonIcon::Image(String::from("/icons/mail.png"))
    );
}

/// **VALUE**: Verifies exactly the active profile's button carries the
/// active marker.
#[tokio::test]
async fn given_active_profile_when_rendered_then_only_its_button_marked() {
    // GIVEN: Two profiles, "b" active
    let store = ProfileStore::new();
    store
        .apply_snapshot(vec![profile("a", "Mail"), profile("b", "Chat")])
        .await;
    store.set_active("b").await.expect("b is present");

    // WHEN: Rendering
    let buttons = toolbar::render(&store).await;

    // THEN: Only "b" is marked active
    let flags: Vec<(String, bool)> = buttons.into_iter().map(|b| (b.id, b.active)).collect();
    assert_eq!(
        flags,
        vec![
            (String::from("a"), false),
            (String::from("b"), true)
        ]
    );
}

/// An empty store renders an empty toolbar - the degraded state when the
/// transport never became ready.
#[tokio::test]
async fn given_empty_store_when_rendered_then_no_buttons() {
    let store = ProfileStore::new();
    assert!(toolbar::render(&store).await.is_empty());
}
