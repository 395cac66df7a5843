use std::path::PathBuf;

use async_trait::async_trait;
use tracing::warn;

use domo_core::types::{Article, ArticleCategory};
use domo_core::{ContentStore, Error, Result};

use crate::frontmatter::split_document;

const DOCUMENT_EXT: &str = "md";
const WORDS_PER_MINUTE: u32 = 200;

/// Content store backed by a directory of markdown documents.
///
/// Every call re-reads the directory; the corpus is small enough that the
/// simplicity is worth more than a cache.
pub struct FsContentStore {
    dir: PathBuf,
}

impl FsContentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn document_path(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", slug, DOCUMENT_EXT))
    }

    /// Articles in the given category, newest first.
    pub async fn by_category(&self, category: ArticleCategory) -> Result<Vec<Article>> {
        Ok(self
            .load_all()
            .await?
            .into_iter()
            .filter(|article| article.category == category)
            .collect())
    }

    /// Articles carrying the given tag (case-insensitive), newest first.
    pub async fn by_tag(&self, tag: &str) -> Result<Vec<Article>> {
        let wanted = tag.to_lowercase();
        Ok(self
            .load_all()
            .await?
            .into_iter()
            .filter(|article| article.tags.iter().any(|t| t.to_lowercase() == wanted))
            .collect())
    }
}

fn reading_time(content: &str) -> u32 {
    let words = content.split_whitespace().count() as u32;
    words.div_ceil(WORDS_PER_MINUTE)
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn list_slugs(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut slugs = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(DOCUMENT_EXT) {
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    slugs.push(stem.to_string());
                }
            }
        }
        slugs.sort();
        Ok(slugs)
    }

    async fn load(&self, slug: &str) -> Result<Article> {
        let path = self.document_path(slug);
        if !path.exists() {
            return Err(Error::NotFound(format!("no article for slug: {}", slug)));
        }

        let raw = std::fs::read_to_string(&path)?;
        let (front, content) = split_document(&raw)?;

        Ok(Article {
            slug: slug.to_string(),
            title: front.title,
            excerpt: front.excerpt,
            date: front.date,
            cover_image: front.cover_image,
            category: front.category,
            tags: front.tags,
            keywords: front.keywords,
            author: front.author,
            reading_time: reading_time(&content),
            content,
        })
    }

    async fn load_all(&self) -> Result<Vec<Article>> {
        let mut articles = Vec::new();
        for slug in self.list_slugs().await? {
            match self.load(&slug).await {
                Ok(article) => articles.push(article),
                Err(e) => warn!("skipping article {}: {}", slug, e),
            }
        }
        // Stable sort: equal dates keep enumeration order.
        articles.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_document(dir: &TempDir, slug: &str, date: &str, words: usize) {
        let body = vec!["mot"; words].join(" ");
        let document = format!(
            "---\ntitle: \"Article {slug}\"\nexcerpt: \"Extrait de {slug}.\"\ndate: {date}\ncoverImage: \"/images/{slug}.jpg\"\ncategory: installation\ntags:\n  - test\nkeywords:\n  - ha\n---\n{body}\n"
        );
        let mut file = std::fs::File::create(dir.path().join(format!("{}.md", slug))).unwrap();
        file.write_all(document.as_bytes()).unwrap();
    }

    #[tokio::test]
    async fn test_missing_directory_is_empty_corpus() {
        let store = FsContentStore::new("/nonexistent/content/dir");
        assert!(store.list_slugs().await.unwrap().is_empty());
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_computes_reading_time() {
        let dir = TempDir::new().unwrap();
        write_document(&dir, "install-guide", "2024-03-10", 400);

        let store = FsContentStore::new(dir.path());
        let article = store.load("install-guide").await.unwrap();
        assert_eq!(article.reading_time, 2);
        assert_eq!(article.title, "Article install-guide");
    }

    #[tokio::test]
    async fn test_reading_time_floor() {
        let dir = TempDir::new().unwrap();
        write_document(&dir, "court", "2024-03-10", 1);

        let store = FsContentStore::new(dir.path());
        let article = store.load("court").await.unwrap();
        assert_eq!(article.reading_time, 1);
    }

    #[tokio::test]
    async fn test_load_all_sorts_by_date_descending() {
        let dir = TempDir::new().unwrap();
        write_document(&dir, "ancien", "2023-01-05", 10);
        write_document(&dir, "recent", "2024-06-01", 10);
        write_document(&dir, "moyen", "2023-11-20", 10);

        let store = FsContentStore::new(dir.path());
        let articles = store.load_all().await.unwrap();
        let slugs: Vec<&str> = articles.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, vec!["recent", "moyen", "ancien"]);
    }

    #[tokio::test]
    async fn test_malformed_document_is_skipped() {
        let dir = TempDir::new().unwrap();
        write_document(&dir, "valide", "2024-03-10", 10);
        std::fs::write(dir.path().join("cassé.md"), "pas de front matter").unwrap();

        let store = FsContentStore::new(dir.path());
        let articles = store.load_all().await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].slug, "valide");

        let result = store.load("cassé").await;
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[tokio::test]
    async fn test_unknown_slug_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = FsContentStore::new(dir.path());
        let result = store.load("fantome").await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_metadata_preserves_corpus_order() {
        let dir = TempDir::new().unwrap();
        write_document(&dir, "premier", "2024-05-01", 10);
        write_document(&dir, "second", "2024-04-01", 10);

        let store = FsContentStore::new(dir.path());
        let metadata = store.metadata().await.unwrap();
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata[0].slug, "premier");
        assert_eq!(metadata[1].slug, "second");
        assert_eq!(metadata[0].keywords, vec!["ha".to_string()]);
    }

    #[tokio::test]
    async fn test_by_tag_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        write_document(&dir, "tagge", "2024-03-10", 10);

        let store = FsContentStore::new(dir.path());
        let articles = store.by_tag("TEST").await.unwrap();
        assert_eq!(articles.len(), 1);
        assert!(store.by_tag("zigbee").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_by_category_filters() {
        let dir = TempDir::new().unwrap();
        write_document(&dir, "install", "2024-03-10", 10);

        let store = FsContentStore::new(dir.path());
        assert_eq!(
            store
                .by_category(ArticleCategory::Installation)
                .await
                .unwrap()
                .len(),
            1
        );
        assert!(store
            .by_category(ArticleCategory::Automation)
            .await
            .unwrap()
            .is_empty());
    }
}
