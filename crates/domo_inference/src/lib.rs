pub mod assistant;
pub mod citations;
pub mod models;
pub mod prompt;

pub use assistant::{AssistantReply, ChatAssistant};
pub use models::OpenRouterModel;

/// Completion provider configuration, built once at process start.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: Option<String>,
    pub site_url: Option<String>,
}

pub mod prelude {
    pub use super::{AssistantReply, ChatAssistant, Config, OpenRouterModel};
    pub use domo_core::{ChatMessage, CompletionModel, Error, Result};
}
