use serde::{Deserialize, Serialize};

/// JSON body for the SendGrid v3 `mail/send` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendGridMail {
    /// One entry per envelope; each gets its own copy of the email.
    pub personalizations: Vec<SendGridPersonalization>,

    /// Sender address.
    pub from: SendGridAddress,

    /// Message bodies, plain text before HTML.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<SendGridContent>,
}

/// A single envelope within a [`SendGridMail`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendGridPersonalization {
    pub to: Vec<SendGridAddress>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// An email address as SendGrid expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendGridAddress {
    pub email: String,
}

impl SendGridAddress {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// One MIME body part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendGridContent {
    /// MIME type, e.g. `"text/plain"`.
    #[serde(rename = "type")]
    pub content_type: String,

    pub value: String,
}

impl SendGridContent {
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            content_type: "text/plain".to_owned(),
            value: value.into(),
        }
    }

    pub fn html(value: impl Into<String>) -> Self {
        Self {
            content_type: "text/html".to_owned(),
            value: value.into(),
        }
    }
}

impl SendGridMail {
    /// Build one email addressed to several recipients who cannot see each
    /// other.
    ///
    /// Every recipient gets a personalization of its own carrying the
    /// subject. Recipients are neither validated nor deduplicated, and an
    /// empty list yields no personalizations. Empty bodies are left out.
    pub fn to_multiple_recipients<I, S>(
        from: impl Into<String>,
        to: I,
        subject: Option<&str>,
        plain_content: Option<&str>,
        html_content: Option<&str>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let personalizations = to
            .into_iter()
            .map(|address| SendGridPersonalization {
                to: vec![SendGridAddress::new(address)],
                subject: subject.map(str::to_owned),
            })
            .collect();

        let mut content = Vec::with_capacity(2);
        if let Some(plain) = plain_content.filter(|c| !c.is_empty()) {
            content.push(SendGridContent::plain(plain));
        }
        if let Some(html) = html_content.filter(|c| !c.is_empty()) {
            content.push(SendGridContent::html(html));
        }

        Self {
            personalizations,
            from: SendGridAddress::new(from),
            content,
        }
    }

    /// Recipient addresses across all personalizations, in order.
    pub fn recipients(&self) -> impl Iterator<Item = &str> {
        self.personalizations
            .iter()
            .flat_map(|p| p.to.iter().map(|a| a.email.as_str()))
    }
}
