use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CheckupError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// The reason a probe reported itself as unhealthy.
///
/// A failure may carry no message at all, in which case the report entry for
/// the check has no reason.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("{}", .message.as_deref().unwrap_or("probe failed without a message"))]
pub struct ProbeFailure {
    message: Option<String>,
}

impl ProbeFailure {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: (!message.is_empty()).then_some(message),
        }
    }

    /// A failure without a message.
    pub fn silent() -> Self {
        Self { message: None }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn into_message(self) -> Option<String> {
        self.message
    }
}

impl From<String> for ProbeFailure {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ProbeFailure {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
