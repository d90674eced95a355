//! In-memory content store the home query runs against

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use super::article::normalize_path;
use super::ArticleRecord;
use crate::query::SiteMetadata;

/// Indexed snapshot of the source directory
#[derive(Debug, Clone)]
pub struct ContentIndex {
    site: SiteMetadata,
    articles: Vec<ArticleRecord>,
    /// Normalised front-matter path -> position in `articles`
    by_path: HashMap<String, usize>,
    /// Relative asset path -> file on disk
    files: BTreeMap<String, PathBuf>,
}

impl ContentIndex {
    pub fn new(site: SiteMetadata) -> Self {
        Self {
            site,
            articles: Vec::new(),
            by_path: HashMap::new(),
            files: BTreeMap::new(),
        }
    }

    /// Add an article. When two articles share a path the first one wins.
    pub fn add_article(&mut self, article: ArticleRecord) {
        let key = normalize_path(&article.frontmatter.path);
        if let Some(&existing) = self.by_path.get(&key) {
            tracing::warn!(
                "Articles {:?} and {:?} share path {}, keeping the first",
                self.articles[existing].id,
                article.id,
                key
            );
        } else {
            self.by_path.insert(key, self.articles.len());
        }
        self.articles.push(article);
    }

    /// Add a non-markdown asset under its `/`-separated relative path
    pub fn add_file(&mut self, relative_path: &str, path: PathBuf) {
        self.files
            .insert(relative_path.trim_start_matches('/').to_string(), path);
    }

    pub fn site(&self) -> &SiteMetadata {
        &self.site
    }

    /// All articles in load order
    pub fn articles(&self) -> &[ArticleRecord] {
        &self.articles
    }

    /// Look an article up by its front-matter path
    pub fn article_by_path(&self, path: &str) -> Option<&ArticleRecord> {
        self.by_path
            .get(&normalize_path(path))
            .map(|&i| &self.articles[i])
    }

    /// Look an asset up by its path relative to the source directory
    pub fn file(&self, relative_path: &str) -> Option<&Path> {
        self.files
            .get(relative_path.trim_start_matches('/'))
            .map(PathBuf::as_path)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> ContentIndex {
        ContentIndex::new(SiteMetadata::titled("Test"))
    }

    #[test]
    fn test_article_lookup_normalizes_path() {
        let mut index = index();
        index.add_article(ArticleRecord::new(
            "_posts/kafka.md",
            "Kafka",
            "/articles/kafka/",
            Some("kafka"),
        ));

        assert!(index.article_by_path("/articles/kafka/").is_some());
        assert!(index.article_by_path("articles/kafka").is_some());
        assert!(index.article_by_path("/articles/scala/").is_none());
    }

    #[test]
    fn test_duplicate_path_keeps_first() {
        let mut index = index();
        index.add_article(ArticleRecord::new("_posts/a.md", "A", "/same/", None));
        index.add_article(ArticleRecord::new("_posts/b.md", "B", "/same/", None));

        assert_eq!(index.articles().len(), 2);
        assert_eq!(index.article_by_path("/same/").unwrap().id, "_posts/a.md");
    }

    #[test]
    fn test_file_lookup() {
        let mut index = index();
        index.add_file("images/cover.jpg", PathBuf::from("/tmp/source/images/cover.jpg"));

        assert_eq!(
            index.file("/images/cover.jpg"),
            Some(Path::new("/tmp/source/images/cover.jpg"))
        );
        assert!(index.file("cover.jpg").is_none());
        assert_eq!(index.file_count(), 1);
    }
}
