use async_trait::async_trait;

use crate::domain::DomainError;

/// One system turn plus one user turn, with fixed sampling settings.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub user: &'a str,
    pub temperature: f32,
    /// Ask the provider to constrain the reply to a JSON object, where the
    /// client supports it.
    pub expect_json: bool,
}

/// An interface for sending chat-style prompts to an LLM and receiving text responses.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Return the assistant's reply text. An empty reply is an error.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, DomainError>;
}
