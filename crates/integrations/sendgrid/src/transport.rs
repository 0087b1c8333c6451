use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::SendGridError;
use crate::types::SendGridMail;

/// Raw answer from the email transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    /// Response body, verbatim.
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` when SendGrid queued the message (HTTP 202).
    pub fn is_accepted(&self) -> bool {
        self.status == StatusCode::ACCEPTED
    }
}

/// Capability that delivers a single [`SendGridMail`].
///
/// Implementations hold only static credentials, so one instance can serve
/// any number of concurrent sends. The
/// [`SendGridProvider`](crate::SendGridProvider) invokes
/// [`send_email`](Self::send_email) exactly once per send and never retries.
#[async_trait]
pub trait EmailTransport: Send + Sync + std::fmt::Debug {
    /// Submit `mail` and return whatever status and body came back.
    ///
    /// `Err` is reserved for faults where no response was obtained.
    async fn send_email(&self, mail: &SendGridMail) -> Result<TransportResponse, SendGridError>;

    /// Perform a health check to verify the transport is usable.
    async fn health_check(&self) -> Result<(), SendGridError> {
        Ok(())
    }
}
