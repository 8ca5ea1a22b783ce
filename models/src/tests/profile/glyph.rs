use crate::Profile;

fn profile(name: &str, icon_path: Option<&str>) -> Profile {
    Profile {
        id: String::from("p-1"),
        name: name.to_string(),
        url: String::from("https://example.com"),
        user_agent: None,
        icon_path: icon_path.map(str::to_string),
    }
}

/// **VALUE**: Verifies the generated fallback glyph is the uppercased first character.
///
/// **WHY THIS MATTERS**: Profiles without a custom icon render as a single letter on
/// the toolbar. If this breaks, every icon-less button shows the wrong label.
#[test]
fn given_lowercase_name_when_glyph_requested_then_returns_uppercased_first_char() {
    // GIVEN: A profile named with a lowercase first letter
    let p = profile("mail", None);

    // WHEN/THEN: Glyph is the uppercased first character
    assert_eq!(p.glyph(), 'M');
}

/// Non-ASCII first characters uppercase through their Unicode mapping.
#[test]
fn given_unicode_name_when_glyph_requested_then_uses_unicode_uppercase() {
    let p = profile("ümlaut", None);
    assert_eq!(p.glyph(), 'Ü');
}

/// An empty name yields the placeholder glyph instead of panicking.
#[test]
fn given_empty_name_when_glyph_requested_then_returns_placeholder() {
    let p = profile("", None);
    assert_eq!(p.glyph(), '?');
}

#[test]
fn given_icon_path_when_has_icon_checked_then_reports_presence() {
    assert!(profile("Mail", Some("/icons/mail.png")).has_icon());
    assert!(!profile("Mail", None).has_icon());
}
