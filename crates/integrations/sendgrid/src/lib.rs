//! SendGrid email provider for the Herald notification dispatcher.
//!
//! This crate implements the [`Provider`](herald_provider::Provider) trait,
//! turning the generic [`MessageParameters`](herald_core::MessageParameters)
//! bag into a single call against the
//! [SendGrid v3 Mail Send API](https://www.twilio.com/docs/sendgrid/api-reference/mail-send/mail-send)
//! and mapping the answer back into a
//! [`NotificationResult`](herald_core::NotificationResult).
//!
//! # Quick start
//!
//! ```rust,no_run
//! use herald_sendgrid::{SendGridMessage, SendGridOptions, SendGridProvider};
//!
//! # async fn run() -> Result<(), herald_provider::ProviderError> {
//! let options = SendGridOptions::new("SG.xxxxx")
//!     .with_default_from_address("noreply@example.com");
//! let provider = SendGridProvider::from_options(options)?;
//!
//! let message = SendGridMessage::new()
//!     .with_to_addresses(["user@example.com"])
//!     .with_subject("Welcome")
//!     .with_plain_content("Hello!");
//! let result = provider.send_message(&message).await?;
//! assert!(result.is_success());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod message;
pub mod provider;
pub mod transport;
pub mod types;

pub use client::SendGridClient;
pub use config::SendGridOptions;
pub use constants::{ParameterKey, SENDGRID_PROVIDER_NAME};
pub use error::SendGridError;
pub use message::SendGridMessage;
pub use provider::{MISSING_FROM_ADDRESS, SendGridProvider};
pub use transport::{EmailTransport, TransportResponse};
pub use types::{SendGridAddress, SendGridContent, SendGridMail, SendGridPersonalization};
