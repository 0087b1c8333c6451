use herald_core::MessageParameters;
use serde::Deserialize;

use crate::constants::ParameterKey;

/// Default base URL of the SendGrid API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.sendgrid.com";

/// Configuration for the SendGrid provider.
///
/// Nothing here is validated: an empty API key surfaces later as a transport
/// rejection, and an empty default sender only matters when a message has no
/// `From` address of its own.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SendGridOptions {
    /// SendGrid API key, sent as a bearer token.
    pub api_key: String,

    /// `From` address used when a message does not carry one.
    pub default_from_address: String,

    /// Base URL for the SendGrid API. Override this for testing against a
    /// mock server.
    pub api_base_url: String,
}

impl std::fmt::Debug for SendGridOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendGridOptions")
            .field("api_key", &"[REDACTED]")
            .field("default_from_address", &self.default_from_address)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl Default for SendGridOptions {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            default_from_address: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
        }
    }
}

impl SendGridOptions {
    /// Create options with the given API key and no default sender.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Read the namespaced option keys from `parameters`.
    ///
    /// Absent keys fall back to an empty string; the base URL is not part of
    /// the parameter convention and stays at its default.
    pub fn from_parameters(parameters: &MessageParameters) -> Self {
        let read = |key: ParameterKey| parameters.get(key.as_str()).unwrap_or_default().to_owned();
        Self {
            api_key: read(ParameterKey::ApiKey),
            default_from_address: read(ParameterKey::DefaultFromAddress),
            ..Self::default()
        }
    }

    /// Write both namespaced option keys, empty or not.
    pub fn to_parameters(&self) -> MessageParameters {
        [
            (ParameterKey::ApiKey.as_str(), self.api_key.as_str()),
            (
                ParameterKey::DefaultFromAddress.as_str(),
                self.default_from_address.as_str(),
            ),
        ]
        .into_iter()
        .collect()
    }

    /// Set the default `From` address.
    #[must_use]
    pub fn with_default_from_address(mut self, address: impl Into<String>) -> Self {
        self.default_from_address = address.into();
        self
    }

    /// Override the API base URL (useful for testing).
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// The default `From` address if one is configured.
    pub fn default_sender(&self) -> Option<&str> {
        Some(self.default_from_address.as_str()).filter(|a| !a.is_empty())
    }
}
