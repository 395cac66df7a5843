pub mod frontmatter;
pub mod headings;
mod store;

pub use store::FsContentStore;

pub mod prelude {
    pub use super::headings::extract_headings;
    pub use super::FsContentStore;
    pub use domo_core::{Article, ContentStore, Error, Result};
}
