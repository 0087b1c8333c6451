use std::time::Duration;

use herald_provider::ProviderError;
use thiserror::Error;

/// Errors specific to the SendGrid provider.
///
/// These are internal errors that get converted into [`ProviderError`] at the
/// public API boundary. Vendor rejections are not errors here; they come
/// back as a [`TransportResponse`](crate::TransportResponse) with a
/// non-accepted status.
#[derive(Debug, Error)]
pub enum SendGridError {
    /// An HTTP-level transport error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request exceeded the client's configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The provider or its client was set up with unusable settings.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl From<SendGridError> for ProviderError {
    fn from(err: SendGridError) -> Self {
        match err {
            SendGridError::Http(e) => ProviderError::Connection(e.to_string()),
            SendGridError::Timeout(after) => ProviderError::Timeout(after),
            SendGridError::Configuration(msg) => ProviderError::Configuration(msg),
        }
    }
}
