use async_trait::async_trait;
use crate::types::{ChatMessage, CompletionOptions};
use crate::Result;

#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Returns the name of the completion provider
    fn name(&self) -> &str;

    /// Generate a completion for an ordered chat message sequence
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: CompletionOptions,
    ) -> Result<String>;
}
