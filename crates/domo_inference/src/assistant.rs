use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use domo_core::types::{ArticleMetadata, ChatMessage, CompletionOptions};
use domo_core::{CompletionModel, ContentStore, Error, Result};

use crate::citations::extract_citations;
use crate::prompt::build_system_prompt;

/// What one conversation turn produces: display-clean text plus the corpus
/// entries the model cited.
#[derive(Debug, Clone, Serialize)]
pub struct AssistantReply {
    pub response: String,
    pub articles: Vec<ArticleMetadata>,
}

/// Runs the full per-request pipeline: catalog load, prompt construction,
/// completion call, citation resolution. Holds no per-request state.
#[derive(Clone)]
pub struct ChatAssistant {
    store: Arc<dyn ContentStore>,
    model: Arc<dyn CompletionModel>,
}

impl ChatAssistant {
    pub fn new(store: Arc<dyn ContentStore>, model: Arc<dyn CompletionModel>) -> Self {
        Self { store, model }
    }

    pub async fn handle(&self, message: &str, history: &[ChatMessage]) -> Result<AssistantReply> {
        if message.is_empty() {
            return Err(Error::Validation("Message invalide".to_string()));
        }

        // The same catalog feeds the prompt and the citation lookup, so the
        // model can only cite slugs it was shown.
        let catalog = self.store.metadata().await?;
        let system_prompt = build_system_prompt(&catalog);

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(system_prompt));
        messages.extend_from_slice(history);
        messages.push(ChatMessage::user(message));

        let raw = self
            .model
            .complete(&messages, CompletionOptions::default())
            .await?;
        debug!("completion returned {} chars", raw.len());

        let extract = extract_citations(&raw, &catalog);
        Ok(AssistantReply {
            response: extract.text,
            articles: extract.articles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use domo_core::types::{Article, ChatRole};
    use std::sync::Mutex;

    struct MockStore;

    #[async_trait]
    impl ContentStore for MockStore {
        async fn list_slugs(&self) -> Result<Vec<String>> {
            Ok(vec!["install-guide".to_string()])
        }

        async fn load(&self, slug: &str) -> Result<Article> {
            Err(Error::NotFound(slug.to_string()))
        }

        async fn load_all(&self) -> Result<Vec<Article>> {
            Ok(Vec::new())
        }

        async fn metadata(&self) -> Result<Vec<ArticleMetadata>> {
            Ok(vec![ArticleMetadata {
                slug: "install-guide".to_string(),
                title: "Guide".to_string(),
                excerpt: "...".to_string(),
                keywords: vec!["ha".to_string()],
            }])
        }
    }

    struct MockModel {
        reply: String,
        seen: Mutex<Vec<ChatMessage>>,
    }

    impl MockModel {
        fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionModel for MockModel {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            messages: &[ChatMessage],
            _options: CompletionOptions,
        ) -> Result<String> {
            *self.seen.lock().unwrap() = messages.to_vec();
            Ok(self.reply.clone())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl CompletionModel for FailingModel {
        fn name(&self) -> &str {
            "failing"
        }

        async fn complete(
            &self,
            _messages: &[ChatMessage],
            _options: CompletionOptions,
        ) -> Result<String> {
            Err(Error::Upstream("provider unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        let assistant = ChatAssistant::new(
            Arc::new(MockStore),
            Arc::new(MockModel::replying("Bonjour !")),
        );
        let result = assistant.handle("", &[]).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_citations_are_resolved_against_catalog() {
        let assistant = ChatAssistant::new(
            Arc::new(MockStore),
            Arc::new(MockModel::replying(
                "Bonjour [ARTICLE:install-guide] voici",
            )),
        );
        let reply = assistant.handle("Comment installer ?", &[]).await.unwrap();
        assert_eq!(reply.response, "Bonjour  voici");
        assert_eq!(reply.articles.len(), 1);
        assert_eq!(reply.articles[0].slug, "install-guide");
    }

    #[tokio::test]
    async fn test_unknown_marker_is_stripped_without_reference() {
        let assistant = ChatAssistant::new(
            Arc::new(MockStore),
            Arc::new(MockModel::replying("Voir [ARTICLE:unknown-slug].")),
        );
        let reply = assistant.handle("Question", &[]).await.unwrap();
        assert_eq!(reply.response, "Voir .");
        assert!(reply.articles.is_empty());
    }

    #[tokio::test]
    async fn test_message_order_is_system_history_user() {
        let model = Arc::new(MockModel::replying("ok"));
        let assistant = ChatAssistant::new(Arc::new(MockStore), model.clone());

        let history = vec![
            ChatMessage::user("Première question"),
            ChatMessage::assistant("Première réponse"),
        ];
        assistant.handle("Seconde question", &history).await.unwrap();

        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0].role, ChatRole::System);
        assert!(seen[0].content.contains("install-guide"));
        assert_eq!(seen[1].content, "Première question");
        assert_eq!(seen[2].content, "Première réponse");
        assert_eq!(seen[3].content, "Seconde question");
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let assistant = ChatAssistant::new(Arc::new(MockStore), Arc::new(FailingModel));
        let result = assistant.handle("Question", &[]).await;
        assert!(matches!(result, Err(Error::Upstream(_))));
    }
}
