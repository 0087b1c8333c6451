use std::sync::Arc;

use herald_core::{MessageParameters, NotificationResult};
use herald_provider::{Provider, ProviderError};
use tracing::{debug, instrument};

use crate::client::SendGridClient;
use crate::config::SendGridOptions;
use crate::constants::SENDGRID_PROVIDER_NAME;
use crate::message::SendGridMessage;
use crate::transport::EmailTransport;
use crate::types::SendGridMail;

/// Error reported when neither the message nor the options name a sender.
pub const MISSING_FROM_ADDRESS: &str = "From Address should not be empty";

/// SendGrid provider that sends one email per call through an
/// [`EmailTransport`].
///
/// Implements the [`Provider`] trait so a notification façade can route to it
/// by the name `"sendgrid"`. A send either succeeds, or fails with a single
/// error: the missing-sender message, or the vendor's response body verbatim.
/// Transport faults (nothing came back) are returned as
/// [`ProviderError::Connection`] or [`ProviderError::Timeout`].
///
/// Each send emits two `debug` events, `"sending email start"` before the
/// network call and `"sending email end"` after an accepted one, both carrying
/// the `subject` and the `to` list.
pub struct SendGridProvider {
    options: SendGridOptions,
    transport: Arc<dyn EmailTransport>,
}

impl std::fmt::Debug for SendGridProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendGridProvider")
            .field("options", &self.options)
            .field("transport", &self.transport)
            .finish()
    }
}

impl SendGridProvider {
    /// Create a provider with an explicit transport.
    pub fn new(options: SendGridOptions, transport: Arc<dyn EmailTransport>) -> Self {
        Self { options, transport }
    }

    /// Create a provider that talks to SendGrid over HTTP using the API key
    /// and base URL in `options`.
    pub fn from_options(options: SendGridOptions) -> Result<Self, ProviderError> {
        let client = SendGridClient::from_options(&options)?;
        Ok(Self::new(options, Arc::new(client)))
    }

    pub fn options(&self) -> &SendGridOptions {
        &self.options
    }

    /// Serialize `message` into parameters and [`send`](Provider::send) it.
    pub async fn send_message(
        &self,
        message: &SendGridMessage,
    ) -> Result<NotificationResult, ProviderError> {
        Provider::send(self, &message.to_parameters()).await
    }
}

impl Provider for SendGridProvider {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        SENDGRID_PROVIDER_NAME
    }

    #[instrument(skip(self, parameters), fields(provider = "sendgrid"))]
    async fn send(
        &self,
        parameters: &MessageParameters,
    ) -> Result<NotificationResult, ProviderError> {
        let message = SendGridMessage::from_parameters(parameters);

        let Some(from) = message.sender().or_else(|| self.options.default_sender()) else {
            return Ok(NotificationResult::error(MISSING_FROM_ADDRESS));
        };

        let mail = SendGridMail::to_multiple_recipients(
            from,
            &message.to_addresses,
            message.subject.as_deref(),
            message.plain_content.as_deref(),
            message.html_content.as_deref(),
        );

        let subject = message.subject.as_deref().unwrap_or_default();
        debug!(subject, to = ?message.to_addresses, "sending email start");

        let response = self.transport.send_email(&mail).await?;

        if response.is_accepted() {
            debug!(subject, to = ?message.to_addresses, "sending email end");
            return Ok(NotificationResult::success());
        }

        Ok(NotificationResult::error(response.body))
    }

    #[instrument(skip(self), fields(provider = "sendgrid"))]
    async fn health_check(&self) -> Result<(), ProviderError> {
        self.transport.health_check().await?;
        Ok(())
    }
}
