pub mod error;
pub mod models;
pub mod store;
pub mod types;

pub use error::Error;
pub use models::CompletionModel;
pub use store::ContentStore;
pub use types::{
    Article, ArticleCategory, ArticleMetadata, ChatMessage, ChatRole, CompletionOptions,
    FrontMatter, Heading,
};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::{Article, ArticleMetadata, ChatMessage, Error, Result};
    pub use crate::{CompletionModel, ContentStore};
}
