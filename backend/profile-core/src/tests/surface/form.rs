// Unit tests for the add-profile form.

use crate::dispatch::CommandDispatcher;
use crate::error::dispatch::DispatchError;
use crate::proto::HostCommand;
use crate::store::ProfileStore;
use crate::surface::form::AddProfileForm;
use crate::surface::notice::NoticeCenter;
use crate::tests::support::{ScriptedTransport, record};

use std::sync::Arc;

use serde_json::Value;

fn dispatcher(transport: &Arc<ScriptedTransport>) -> CommandDispatcher {
    CommandDispatcher::new(
        Arc::clone(transport) as Arc<_>,
        ProfileStore::new(),
        NoticeCenter::new(),
    )
}

/// **VALUE**: Verifies an empty submission is rejected locally, with zero
/// transport calls.
///
/// **WHY THIS MATTERS**: Client-side validation is the contract - the host
/// must never see a creation command for an empty form.
///
/// **BUG THIS CATCHES**: Would catch the form dispatching first and
/// validating after, which would leak a doomed round-trip per empty submit.
#[tokio::test]
async fn given_empty_name_when_submitted_then_rejected_before_transport() {
    // GIVEN: A form with a URL but no name
    let transport = Arc::new(ScriptedTransport::accepting());
    let dispatcher = dispatcher(&transport);
    let mut form = AddProfileForm::new();
    form.set_url("https://x.example");

    // WHEN: Submitting
    let result = form.submit(&dispatcher).await;

    // THEN: Local validation error, nothing sent
    assert!(matches!(result, Err(DispatchError::Validation { .. })));
    assert!(transport.sent().is_empty());
}

/// Empty URL is the same local rejection.
#[tokio::test]
async fn given_empty_url_when_submitted_then_rejected_before_transport() {
    let transport = Arc::new(ScriptedTransport::accepting());
    let dispatcher = dispatcher(&transport);
    let mut form = AddProfileForm::new();
    form.set_name("Mail");

    let result = form.submit(&dispatcher).await;

    assert!(matches!(result, Err(DispatchError::Validation { .. })));
    assert!(transport.sent().is_empty());
}

/// **VALUE**: Verifies a valid submission dispatches AddProfile with the
/// form's fields, and the form resets for the next open.
#[tokio::test]
async fn given_valid_form_when_submitted_then_add_profile_dispatched_and_form_reset() {
    // GIVEN: A fully filled form over a confirming transport
    let transport = Arc::new(ScriptedTransport::new(|command| match command {
        HostCommand::AddProfile { .. } => {
            Ok(Some(serde_json::to_value(record("a", "Mail")).unwrap()))
        }
        _ => Ok(Some(Value::Null)),
    }));
    let dispatcher = dispatcher(&transport);
    let mut form = AddProfileForm::new();
    form.set_name("Mail");
    form.set_url("https://mail.example");
    form.set_user_agent("agent/1.0");

    // WHEN: Submitting
    form.submit(&dispatcher).await.expect("submission succeeds");

    // THEN: The command carried the fields; blank icon became None
    match &transport.sent()[0] {
        HostCommand::AddProfile {
            name,
            url,
            user_agent,
            icon_path,
        } => {
            assert_eq!(name, "Mail");
            assert_eq!(url, "https://mail.example");
            assert_eq!(user_agent.as_deref(), Some("agent/1.0"));
            assert_eq!(*icon_path, None);
        }
        other => panic!("Expected AddProfile, got {other:?}"),
    }

    // AND: The form is blank again
    assert!(form.validate().is_err(), "Reset form should fail validation");
}

/// Failed submissions keep the field values so the user can correct them.
#[tokio::test]
async fn given_rejected_submission_when_submitted_then_fields_kept() {
    use crate::error::transport::TransportError;
    use common::ErrorLocation;
    use std::panic::Location;

    let transport = Arc::new(ScriptedTransport::new(|_| {
        Err(TransportError::Rejected {
            message: String::from("duplicate name"),
            location: ErrorLocation::from(Location::caller()),
        })
    }));
    let dispatcher = dispatcher(&transport);
    let mut form = AddProfileForm::new();
    form.set_name("Mail");
    form.set_url("https://mail.example");

    let result = form.submit(&dispatcher).await;

    assert!(result.is_err());
    assert!(form.validate().is_ok(), "Fields survive a host rejection");
}
