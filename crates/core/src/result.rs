use serde::{Deserialize, Serialize};

/// Uniform outcome of a provider send.
///
/// A success carries no errors; a failure carries one or more human-readable
/// error strings, the first of which is the actionable one. There is no
/// partial success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResult {
    is_success: bool,
    #[serde(default)]
    errors: Vec<String>,
}

impl NotificationResult {
    /// A successful result with an empty error list.
    #[must_use]
    pub fn success() -> Self {
        Self {
            is_success: true,
            errors: Vec::new(),
        }
    }

    /// A failed result carrying the given errors.
    #[must_use]
    pub fn failure<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            is_success: false,
            errors: errors.into_iter().map(Into::into).collect(),
        }
    }

    /// A failed result with exactly one error.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            errors: vec![message.into()],
        }
    }

    pub fn is_success(&self) -> bool {
        self.is_success
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}
