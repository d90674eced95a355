//! Records a query alias can resolve to

use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

use super::ImageOptions;
use crate::config::SiteConfig;
use crate::content::ArticleRecord;

/// Result of executing a query: alias -> record, `None` when nothing matched.
/// Keys equal the query's aliases, in query order.
pub type QueryResult = IndexMap<String, Option<Record>>;

/// One resolved alias
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    Site(SiteMetadata),
    File(CoverAsset),
    Article(ArticleRecord),
}

/// Site-wide metadata, read-only for the home page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteMetadata {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub url: String,
}

impl SiteMetadata {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            url: config.url.clone(),
        }
    }

    /// Metadata with only a title set
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: String::new(),
            url: String::new(),
        }
    }
}

/// Image asset selected by a `file` selector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverAsset {
    /// Path relative to the source directory, `/`-separated
    pub relative_path: String,
    /// File on disk
    pub source: PathBuf,
    /// Presentation hints from the query, passed through untouched
    pub image: ImageOptions,
}
