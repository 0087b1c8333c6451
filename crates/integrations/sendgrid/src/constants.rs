/// Routing name of the SendGrid provider.
pub const SENDGRID_PROVIDER_NAME: &str = "sendgrid";

/// Namespaced parameter keys owned by the SendGrid provider.
///
/// Every key is `"sendgrid_<Field>"` so that one
/// [`MessageParameters`](herald_core::MessageParameters) bag can be shared
/// with other providers without collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKey {
    FromAddress,
    ToAddresses,
    Subject,
    PlainContent,
    HtmlContent,
    ApiKey,
    DefaultFromAddress,
}

impl ParameterKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FromAddress => "sendgrid_FromAddress",
            Self::ToAddresses => "sendgrid_ToAddresses",
            Self::Subject => "sendgrid_Subject",
            Self::PlainContent => "sendgrid_PlainContent",
            Self::HtmlContent => "sendgrid_HtmlContent",
            Self::ApiKey => "sendgrid_Apikey",
            Self::DefaultFromAddress => "sendgrid_DefaultFromAddress",
        }
    }
}

impl std::fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
