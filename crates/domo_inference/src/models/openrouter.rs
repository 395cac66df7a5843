use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use domo_core::types::{ChatMessage, CompletionOptions};
use domo_core::{CompletionModel, Error, Result};

use crate::Config;

pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "mistralai/mistral-small-24b-instruct-2501:free";
const DEFAULT_SITE_URL: &str = "http://localhost:3000";
const APP_TITLE: &str = "Blog Domotique IA Assistant";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

pub struct OpenRouterModel {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    model: String,
    site_url: String,
}

impl OpenRouterModel {
    pub fn new(config: Config) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::Configuration(
                "OpenRouter API key is required".to_string(),
            ));
        }
        Ok(Self {
            client: Arc::new(Client::new()),
            api_key: config.api_key,
            base_url: OPENROUTER_BASE_URL.to_string(),
            model: config.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            site_url: config
                .site_url
                .unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
        })
    }

    /// Points the client at another chat-completions endpoint. Used by tests
    /// to target a local stub server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl fmt::Debug for OpenRouterModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRouterModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl CompletionModel for OpenRouterModel {
    fn name(&self) -> &str {
        "OpenRouter"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: CompletionOptions,
    ) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("HTTP-Referer", &self.site_url)
            .header("X-Title", APP_TITLE)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "completion request failed with status {}",
                response.status()
            )));
        }

        let payload = response.json::<ChatResponse>().await?;
        let choice = payload
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Upstream("no completion choices returned".to_string()))?;

        Ok(choice.message.content)
    }
}
