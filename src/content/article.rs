//! Article record model

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// An article as seen by the home query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleRecord {
    /// Source path relative to the source directory, `/`-separated
    pub id: String,
    pub frontmatter: ArticleFrontmatter,
    /// Rendered summary HTML
    pub excerpt: Option<String>,
}

/// Resolved front-matter of an article
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleFrontmatter {
    pub title: String,
    pub path: String,
    pub category: Option<String>,
    pub date: Option<DateTime<FixedOffset>>,
    pub cover: Option<String>,
    pub tags: Vec<String>,
    pub description: Option<String>,
}

impl ArticleRecord {
    /// Create a record with just the fields the home page needs
    pub fn new(id: &str, title: &str, path: &str, category: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            frontmatter: ArticleFrontmatter {
                title: title.to_string(),
                path: normalize_path(path),
                category: category.map(str::to_string),
                date: None,
                cover: None,
                tags: Vec::new(),
                description: None,
            },
            excerpt: None,
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.frontmatter.category.as_deref()
    }
}

/// Normalise a URL path to a leading `/` and, for directory-like paths, a
/// trailing `/`
///
/// # Examples
/// ```ignore
/// normalize_path("articles/kafka") // -> "/articles/kafka/"
/// normalize_path("/feed.xml")      // -> "/feed.xml"
/// ```
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }

    let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
    if last.contains('.') {
        format!("/{}", trimmed)
    } else {
        format!("/{}/", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("articles/kafka"), "/articles/kafka/");
        assert_eq!(normalize_path("/articles/kafka/"), "/articles/kafka/");
        assert_eq!(normalize_path(" /articles/kafka "), "/articles/kafka/");
        assert_eq!(normalize_path("/feed.xml"), "/feed.xml");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_new_record_normalizes_path() {
        let a = ArticleRecord::new("_posts/a.md", "A", "articles/a", Some("scala"));
        assert_eq!(a.frontmatter.path, "/articles/a/");
        assert_eq!(a.category(), Some("scala"));
    }
}
