use herald_core::MessageParameters;

use crate::constants::ParameterKey;

/// Typed view over the SendGrid subset of a [`MessageParameters`] bag.
///
/// Reading is lenient: absent keys leave the field at its default and nothing
/// is validated. Writing omits empty fields entirely, so a round-trip never
/// introduces keys that were not there. Recipients travel as one
/// comma-joined value, which means an individual address must not contain a
/// comma.
///
/// # Examples
///
/// ```
/// use herald_sendgrid::SendGridMessage;
///
/// let message = SendGridMessage::new()
///     .with_from_address("sender@example.com")
///     .with_to_addresses(["a@x.com", "b@x.com"])
///     .with_subject("Hi");
///
/// let params = message.to_parameters();
/// assert_eq!(params.get("sendgrid_ToAddresses"), Some("a@x.com,b@x.com"));
/// assert!(!params.contains_key("sendgrid_PlainContent"));
///
/// assert_eq!(SendGridMessage::from_parameters(&params), message);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendGridMessage {
    /// The `From` address. Falls back to the provider's default when empty.
    pub from_address: Option<String>,
    /// The `To` addresses, in order.
    pub to_addresses: Vec<String>,
    pub subject: Option<String>,
    /// Plain-text body.
    pub plain_content: Option<String>,
    /// HTML body.
    pub html_content: Option<String>,
}

impl SendGridMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the SendGrid keys out of `parameters`, ignoring foreign keys.
    pub fn from_parameters(parameters: &MessageParameters) -> Self {
        let read = |key: ParameterKey| parameters.get(key.as_str()).map(str::to_owned);

        let to_addresses = parameters
            .get(ParameterKey::ToAddresses.as_str())
            .map(|csv| csv.split(',').map(str::to_owned).collect())
            .unwrap_or_default();

        Self {
            from_address: read(ParameterKey::FromAddress),
            to_addresses,
            subject: read(ParameterKey::Subject),
            plain_content: read(ParameterKey::PlainContent),
            html_content: read(ParameterKey::HtmlContent),
        }
    }

    /// Serialize the non-empty fields into a fresh parameter bag.
    pub fn to_parameters(&self) -> MessageParameters {
        let mut parameters = MessageParameters::new();

        if let Some(from) = non_empty(self.from_address.as_deref()) {
            parameters.insert(ParameterKey::FromAddress.as_str(), from);
        }
        if !self.to_addresses.is_empty() {
            parameters.insert(
                ParameterKey::ToAddresses.as_str(),
                self.to_addresses.join(","),
            );
        }
        if let Some(subject) = non_empty(self.subject.as_deref()) {
            parameters.insert(ParameterKey::Subject.as_str(), subject);
        }
        if let Some(plain) = non_empty(self.plain_content.as_deref()) {
            parameters.insert(ParameterKey::PlainContent.as_str(), plain);
        }
        if let Some(html) = non_empty(self.html_content.as_deref()) {
            parameters.insert(ParameterKey::HtmlContent.as_str(), html);
        }

        parameters
    }

    /// The `From` address if one is set and non-empty.
    pub fn sender(&self) -> Option<&str> {
        non_empty(self.from_address.as_deref())
    }

    #[must_use]
    pub fn with_from_address(mut self, from: impl Into<String>) -> Self {
        self.from_address = Some(from.into());
        self
    }

    #[must_use]
    pub fn with_to_addresses<I, S>(mut self, to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.to_addresses = to.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn with_plain_content(mut self, content: impl Into<String>) -> Self {
        self.plain_content = Some(content.into());
        self
    }

    #[must_use]
    pub fn with_html_content(mut self, content: impl Into<String>) -> Self {
        self.html_content = Some(content.into());
        self
    }
}

impl From<&MessageParameters> for SendGridMessage {
    fn from(parameters: &MessageParameters) -> Self {
        Self::from_parameters(parameters)
    }
}

impl From<&SendGridMessage> for MessageParameters {
    fn from(message: &SendGridMessage) -> Self {
        message.to_parameters()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
