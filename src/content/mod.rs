//! Content module - articles, assets and the index the home query runs against

mod article;
mod frontmatter;
mod index;
pub mod loader;
mod markdown;

pub use article::{normalize_path, ArticleFrontmatter, ArticleRecord};
pub use frontmatter::FrontMatter;
pub use index::ContentIndex;
pub use markdown::MarkdownRenderer;
