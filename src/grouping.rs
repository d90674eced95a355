//! Category grouping for the home page

use indexmap::IndexMap;
use std::fmt;

use crate::content::ArticleRecord;

/// Group key: a category name, or the single bucket for articles without one
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    Named(String),
    Uncategorized,
}

impl CategoryKey {
    pub fn of(article: &ArticleRecord) -> Self {
        match article.category().map(str::trim) {
            Some(name) if !name.is_empty() => CategoryKey::Named(name.to_string()),
            _ => CategoryKey::Uncategorized,
        }
    }

    /// Display label, using `uncategorized` for the catch-all bucket
    pub fn label<'a>(&'a self, uncategorized: &'a str) -> &'a str {
        match self {
            CategoryKey::Named(name) => name,
            CategoryKey::Uncategorized => uncategorized,
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label("uncategorized"))
    }
}

/// Articles grouped by category. Groups iterate in the order their category
/// first appeared; members keep their input order.
#[derive(Debug, Clone, Default)]
pub struct CategoryGroups<'a> {
    groups: IndexMap<CategoryKey, Vec<&'a ArticleRecord>>,
}

// IndexMap equality ignores order; group order is part of the value here.
impl PartialEq for CategoryGroups<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<'a> CategoryGroups<'a> {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &CategoryKey) -> Option<&[&'a ArticleRecord]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &CategoryKey> {
        self.groups.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryKey, &[&'a ArticleRecord])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Total number of grouped articles
    pub fn article_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Group articles by `frontmatter.category`
pub fn group_by_category(articles: &[ArticleRecord]) -> CategoryGroups<'_> {
    let mut groups: IndexMap<CategoryKey, Vec<&ArticleRecord>> = IndexMap::new();
    for article in articles {
        groups.entry(CategoryKey::of(article)).or_default().push(article);
    }
    CategoryGroups { groups }
}
