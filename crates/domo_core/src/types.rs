use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closed set of article categories used by the corpus and its listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleCategory {
    Installation,
    Integration,
    Automation,
}

/// The YAML header at the top of every article document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    pub title: String,
    pub excerpt: String,
    pub date: NaiveDate,
    pub cover_image: String,
    pub category: ArticleCategory,
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub date: NaiveDate,
    pub cover_image: String,
    pub category: ArticleCategory,
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
    pub author: Option<String>,
    pub content: String,
    /// Estimated reading time in minutes, computed at load time.
    pub reading_time: u32,
}

/// Compact per-article view injected into the assistant's context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleMetadata {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub keywords: Vec<String>,
}

impl From<&Article> for ArticleMetadata {
    fn from(article: &Article) -> Self {
        Self {
            slug: article.slug.clone(),
            title: article.title.clone(),
            excerpt: article.excerpt.clone(),
            keywords: article.keywords.clone(),
        }
    }
}

/// A `##` or `###` heading extracted from an article body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub id: String,
    pub text: String,
    pub level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Generation parameters forwarded verbatim to the completion provider.
#[derive(Debug, Clone, Copy)]
pub struct CompletionOptions {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.7,
        }
    }
}
