use crate::{ModelError, ProfileDraft};

/// **VALUE**: Verifies that builder validation rejects an empty profile name.
///
/// **WHY THIS MATTERS**: The dispatcher only accepts `ProfileDraft` values, so this
/// check is what guarantees an empty submission is rejected locally before any
/// transport round-trip happens.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - Name validation is accidentally removed or bypassed
/// - Whitespace-only names start slipping through after a refactor
#[test]
fn given_empty_name_when_building_draft_then_returns_validation_error() {
    // GIVEN: Builder with an empty name
    let builder = ProfileDraft::builder()
        .with_name("")
        .with_url("https://mail.example");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    assert!(result.is_err());
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "Profile name cannot be empty");
        }
    }
}

/// Whitespace-only names count as empty.
#[test]
fn given_whitespace_name_when_building_draft_then_returns_validation_error() {
    // GIVEN: Builder with a whitespace-only name
    let result = ProfileDraft::builder()
        .with_name("   ")
        .with_url("https://mail.example")
        .build();

    // THEN: Should return validation error
    assert!(result.is_err(), "Whitespace-only name should be rejected");
}

/// **VALUE**: Verifies that builder validation rejects a missing or empty URL.
///
/// **BUG THIS CATCHES**: Would catch if the URL requirement is dropped, letting the
/// host receive a creation command it can only reject.
#[test]
fn given_missing_url_when_building_draft_then_returns_validation_error() {
    // GIVEN: Builder without a URL
    let result = ProfileDraft::builder().with_name("Mail").build();

    // THEN: Should return validation error
    assert!(result.is_err());
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "Profile URL cannot be empty");
        }
    }
}

/// **VALUE**: Verifies that non-http(s) schemes are rejected.
///
/// **BUG THIS CATCHES**: Would catch if scheme validation is removed, allowing
/// file:// or ftp:// targets into a web-session profile.
#[test]
fn given_non_http_scheme_when_building_draft_then_returns_validation_error() {
    // GIVEN: Builder with an ftp URL
    let result = ProfileDraft::builder()
        .with_name("Mail")
        .with_url("ftp://mail.example")
        .build();

    // THEN: Should return validation error
    let err = result.unwrap_err();
    let rendered = format!("{err}");
    assert!(
        rendered.contains("Unsupported URL scheme"),
        "Error should name the scheme problem: {rendered}"
    );
}

/// Unparseable URLs surface the parser's reason.
#[test]
fn given_garbage_url_when_building_draft_then_returns_validation_error() {
    // GIVEN: Builder with a non-URL string
    let result = ProfileDraft::builder()
        .with_name("Mail")
        .with_url("not a url")
        .build();

    // THEN: Should return validation error
    assert!(result.is_err(), "Garbage URL should be rejected");
}

/// **VALUE**: Verifies the happy path keeps all fields and normalizes blanks.
///
/// **WHY THIS MATTERS**: Blank form controls submit empty strings; the draft must
/// carry those as `None` so the wire payload matches what the host expects.
#[test]
fn given_complete_input_when_building_draft_then_carries_all_fields() {
    // GIVEN: Builder with every field set, icon path left blank
    let draft = ProfileDraft::builder()
        .with_name("Mail")
        .with_url("https://mail.example")
        .with_user_agent("Mozilla/5.0 (X11; Linux x86_64)")
        .with_icon_path("")
        .build()
        .expect("valid draft");

    // THEN: Required fields kept verbatim, blank optional normalized to None
    assert_eq!(draft.name(), "Mail");
    assert_eq!(draft.url(), "https://mail.example");
    assert_eq!(draft.user_agent(), Some("Mozilla/5.0 (X11; Linux x86_64)"));
    assert_eq!(draft.icon_path(), None);
}

/// Surrounding whitespace on required fields is trimmed, not rejected.
#[test]
fn given_padded_input_when_building_draft_then_trims_required_fields() {
    // GIVEN: Builder with padded name and URL
    let draft = ProfileDraft::builder()
        .with_name("  Mail ")
        .with_url(" https://mail.example ")
        .build()
        .expect("valid draft");

    // THEN: Both come out trimmed
    assert_eq!(draft.name(), "Mail");
    assert_eq!(draft.url(), "https://mail.example");
}
