use async_trait::async_trait;
use crate::types::{Article, ArticleMetadata};
use crate::Result;

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// List the slug of every document in the corpus
    async fn list_slugs(&self) -> Result<Vec<String>>;

    /// Load a single article by slug
    async fn load(&self, slug: &str) -> Result<Article>;

    /// Load every parseable article, newest first
    async fn load_all(&self) -> Result<Vec<Article>>;

    /// Project the corpus to the metadata view used as AI context
    async fn metadata(&self) -> Result<Vec<ArticleMetadata>> {
        Ok(self
            .load_all()
            .await?
            .iter()
            .map(ArticleMetadata::from)
            .collect())
    }
}
