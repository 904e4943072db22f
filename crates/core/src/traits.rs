use crate::{ChatError, ConversationTurn};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub system_instruction: &'a str,
    pub history: &'a [ConversationTurn],
    pub prompt: &'a str,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Returns the assistant reply. Transport, auth, rate-limit and
    /// malformed-response failures all surface as [`ChatError::Request`].
    async fn complete(&self, request: &ChatRequest<'_>) -> Result<String, ChatError>;
}
