use std::time::Duration;

use thiserror::Error;

/// Errors that escape a provider instead of being folded into a
/// [`NotificationResult`](herald_core::NotificationResult).
///
/// Locally detectable problems (a missing sender, a vendor rejection) are
/// reported as failed results. This type covers faults below that level,
/// such as the transport never producing a response at all.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The transport did not respond within the allowed duration.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// A network or transport-level error occurred.
    #[error("connection error: {0}")]
    Connection(String),

    /// The provider was given invalid configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// Returns `true` if the error is transient and the send may succeed
    /// on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Connection(_))
    }
}
