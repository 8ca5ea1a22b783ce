//! Add-profile form.

use crate::dispatch::CommandDispatcher;
use crate::error::dispatch::DispatchError;

use models::{ModelError, ProfileDraft};

use log::debug;

/// Form state for the add-profile modal.
///
/// Collects raw field values and validates locally on submit; an empty
/// name or URL is rejected before any transport round-trip happens.
#[derive(Debug, Default, Clone)]
pub struct AddProfileForm {
    name: String,
    url: String,
    user_agent: String,
    icon_path: String,
}

impl AddProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_url(&mut self, value: impl Into<String>) {
        self.url = value.into();
    }

    pub fn set_user_agent(&mut self, value: impl Into<String>) {
        self.user_agent = value.into();
    }

    pub fn set_icon_path(&mut self, value: impl Into<String>) {
        self.icon_path = value.into();
    }

    /// Clear all fields. Closing the modal resets the form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate the current field values without dispatching.
    pub fn validate(&self) -> Result<ProfileDraft, ModelError> {
        ProfileDraft::builder()
            .with_name(self.name.clone())
            .with_url(self.url.clone())
            .with_user_agent(self.user_agent.clone())
            .with_icon_path(self.icon_path.clone())
            .build()
    }

    /// Submit the form: validate locally, then dispatch the creation.
    ///
    /// The locally rejected path performs no transport call. Fields reset
    /// on success so the modal reopens blank.
    pub async fn submit(&mut self, dispatcher: &CommandDispatcher) -> Result<(), DispatchError> {
        let draft = self.validate().map_err(DispatchError::from)?;

        debug!("Submitting add-profile form for \"{}\"", draft.name());
        dispatcher.create_profile(draft).await?;

        self.reset();
        Ok(())
    }
}
