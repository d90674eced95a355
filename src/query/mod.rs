//! Home page content query
//!
//! A query is an ordered set of aliases, each naming one record in the
//! content index: the site metadata, an asset file, or an article selected
//! by its front-matter path. Executing it yields a [`QueryResult`] whose keys
//! are exactly the requested aliases; [`HomeData::from_result`] then shapes
//! that mapping into what the home page renders.

mod adapter;
mod record;

pub use adapter::HomeData;
pub use record::{CoverAsset, QueryResult, Record, SiteMetadata};

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::content::{normalize_path, ContentIndex};

lazy_static! {
    static ref ALIAS_RE: Regex = Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").unwrap();
}

/// Errors raised while validating, executing or adapting a query
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Invalid query alias {0:?}: aliases must match [_A-Za-z][_0-9A-Za-z]*")]
    InvalidAlias(String),

    #[error("Query selects site metadata more than once ({first} and {second})")]
    DuplicateSite { first: String, second: String },

    #[error("Query selects more than one cover file ({first} and {second})")]
    MultipleCovers { first: String, second: String },

    #[error("Query alias `{alias}` resolved to no record ({selector})")]
    MissingRecord { alias: String, selector: String },

    #[error("Query result contains no site metadata")]
    MissingSiteMetadata,
}

/// What to do with aliases that resolve to no record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Abort the build, naming the alias
    #[default]
    Fail,
    /// Drop the alias and keep going
    Skip,
}

/// What an alias asks the content index for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Selector {
    Site,
    File {
        relative_path: String,
        #[serde(default)]
        image: ImageOptions,
    },
    Article {
        path: String,
    },
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Site => write!(f, "site metadata"),
            Selector::File { relative_path, .. } => write!(f, "file `{}`", relative_path),
            Selector::Article { path } => write!(f, "article with path `{}`", path),
        }
    }
}

/// Presentation hints for an image asset. Not interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub crop_focus: Option<String>,
    pub quality: Option<u8>,
    pub duotone: Option<Duotone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Duotone {
    pub highlight: String,
    pub shadow: String,
    #[serde(default)]
    pub opacity: Option<u8>,
}

/// Ordered alias -> selector mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentQuery {
    selectors: IndexMap<String, Selector>,
}

impl ContentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; a repeated alias replaces the earlier selector in place
    pub fn with(mut self, alias: &str, selector: Selector) -> Self {
        self.selectors.insert(alias.to_string(), selector);
        self
    }

    pub fn site(self, alias: &str) -> Self {
        self.with(alias, Selector::Site)
    }

    pub fn file(self, alias: &str, relative_path: &str) -> Self {
        self.with(
            alias,
            Selector::File {
                relative_path: relative_path.to_string(),
                image: ImageOptions::default(),
            },
        )
    }

    pub fn article(self, alias: &str, path: &str) -> Self {
        self.with(
            alias,
            Selector::Article {
                path: path.to_string(),
            },
        )
    }

    pub fn get(&self, alias: &str) -> Option<&Selector> {
        self.selectors.get(alias)
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.selectors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Selector)> {
        self.selectors.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Check alias syntax and that site metadata and cover are selected at most once
    pub fn validate(&self) -> Result<(), QueryError> {
        let mut site: Option<&str> = None;
        let mut cover: Option<&str> = None;

        for (alias, selector) in self.iter() {
            if !ALIAS_RE.is_match(alias) {
                return Err(QueryError::InvalidAlias(alias.to_string()));
            }
            match selector {
                Selector::Site => {
                    if let Some(first) = site {
                        return Err(QueryError::DuplicateSite {
                            first: first.to_string(),
                            second: alias.to_string(),
                        });
                    }
                    site = Some(alias);
                }
                Selector::File { .. } => {
                    if let Some(first) = cover {
                        return Err(QueryError::MultipleCovers {
                            first: first.to_string(),
                            second: alias.to_string(),
                        });
                    }
                    cover = Some(alias);
                }
                Selector::Article { .. } => {}
            }
        }

        Ok(())
    }

    /// Resolve every alias against the index
    pub fn execute(&self, index: &ContentIndex) -> Result<QueryResult, QueryError> {
        self.validate()?;

        let result: QueryResult = self
            .iter()
            .map(|(alias, selector)| (alias.to_string(), resolve(selector, index)))
            .collect();

        tracing::debug!(
            "Query resolved {}/{} aliases",
            result.values().filter(|r| r.is_some()).count(),
            result.len()
        );
        Ok(result)
    }
}

fn resolve(selector: &Selector, index: &ContentIndex) -> Option<Record> {
    match selector {
        Selector::Site => Some(Record::Site(index.site().clone())),
        Selector::File {
            relative_path,
            image,
        } => index.file(relative_path).map(|source| {
            Record::File(CoverAsset {
                relative_path: relative_path.trim_start_matches('/').to_string(),
                source: source.to_path_buf(),
                image: image.clone(),
            })
        }),
        Selector::Article { path } => index
            .article_by_path(&normalize_path(path))
            .cloned()
            .map(Record::Article),
    }
}
