use crate::error::model_error::ModelError;

use common::ErrorLocation;

use std::panic::Location;

use url::Url;

/// A validated profile-creation payload.
///
/// Holding a `ProfileDraft` proves local validation already passed: the
/// name is non-empty and the URL parsed with an http(s) scheme. The
/// dispatcher only accepts drafts, so an empty submission can never reach
/// the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    name: String,
    url: String,
    user_agent: Option<String>,
    icon_path: Option<String>,
}

impl ProfileDraft {
    pub fn builder() -> ProfileDraftBuilder {
        ProfileDraftBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    pub fn icon_path(&self) -> Option<&str> {
        self.icon_path.as_deref()
    }

    /// Decompose into `(name, url, user_agent, icon_path)`.
    pub fn into_parts(self) -> (String, String, Option<String>, Option<String>) {
        (self.name, self.url, self.user_agent, self.icon_path)
    }
}

/// Builder for creating validated ProfileDraft instances.
///
/// Provides a fluent API for collecting form input. Empty optional fields
/// are normalized to `None`, matching what a blank form control submits.
#[derive(Debug, Default)]
pub struct ProfileDraftBuilder {
    name: Option<String>,
    url: Option<String>,
    user_agent: Option<String>,
    icon_path: Option<String>,
}

impl ProfileDraftBuilder {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_icon_path(mut self, icon_path: impl Into<String>) -> Self {
        self.icon_path = Some(icon_path.into());
        self
    }

    /// Build the ProfileDraft with validation.
    #[track_caller]
    pub fn build(self) -> Result<ProfileDraft, ModelError> {
        let name = self.name.unwrap_or_default();
        let name = name.trim();

        if name.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Profile name cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let url = self.url.unwrap_or_default();
        let url = url.trim();

        if url.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Profile URL cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let parsed = Url::parse(url).map_err(|e| ModelError::Validation {
            message: format!("Invalid profile URL '{url}': {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ModelError::Validation {
                message: format!("Unsupported URL scheme '{}'", parsed.scheme()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(ProfileDraft {
            name: name.to_string(),
            url: url.to_string(),
            user_agent: normalize_optional(self.user_agent),
            icon_path: normalize_optional(self.icon_path),
        })
    }
}

/// Blank form controls submit empty strings; treat those as absent.
fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
