use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Missing or unresolvable caller input. The message is shown to the caller as-is.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The marketplace or completion API failed or returned a non-success status.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The completion reply is not valid JSON, even after fence stripping.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The counter store could not be reached or answered with an error.
    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Message safe to return to an HTTP caller, if this error carries one.
    pub fn caller_message(&self) -> Option<&str> {
        match self {
            Self::Validation(msg) => Some(msg),
            _ => None,
        }
    }
}
