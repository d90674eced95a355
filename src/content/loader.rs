//! Content loader - indexes articles and assets from the source directory

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{ArticleRecord, ContentIndex, FrontMatter, MarkdownRenderer};
use crate::query::SiteMetadata;
use crate::Site;

/// Loads content from the source directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
    skip: Vec<glob::Pattern>,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Result<Self> {
        let skip = site
            .config
            .skip_render
            .iter()
            .map(|p| {
                glob::Pattern::new(p).with_context(|| format!("Invalid skip_render pattern {:?}", p))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            site,
            renderer: MarkdownRenderer::new(),
            skip,
        })
    }

    /// Walk the source directory and build the content index
    pub fn load(&self) -> Result<ContentIndex> {
        let mut index = ContentIndex::new(SiteMetadata::from_config(&self.site.config));
        let source_dir = &self.site.source_dir;

        if !source_dir.exists() {
            tracing::warn!("Source directory {:?} does not exist", source_dir);
            return Ok(index);
        }

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = relative_path(path, source_dir);
            if self.skip.iter().any(|p| p.matches(&relative)) {
                tracing::debug!("Skipping {}", relative);
                continue;
            }

            if is_markdown_file(path) {
                if !self.is_article(&relative) {
                    continue;
                }
                match self.load_article(path, &relative) {
                    Ok(Some(article)) => index.add_article(article),
                    Ok(None) => tracing::debug!("Skipping unpublished {}", relative),
                    Err(e) => tracing::warn!("Failed to load article {:?}: {:#}", path, e),
                }
            } else if !is_hidden(&relative) {
                index.add_file(&relative, path.to_path_buf());
            }
        }

        tracing::debug!(
            "Indexed {} articles and {} files",
            index.articles().len(),
            index.file_count()
        );
        Ok(index)
    }

    fn is_article(&self, relative: &str) -> bool {
        let posts_dir = self.site.config.posts_dir.trim_matches('/');
        relative
            .strip_prefix(posts_dir)
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Load a single article; `None` when it is not published
    fn load_article(&self, path: &Path, relative: &str) -> Result<Option<ArticleRecord>> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        if !fm.published {
            return Ok(None);
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled");

        let title = fm.title.clone().unwrap_or_else(|| stem.to_string());

        let article_path = match fm.path.as_deref() {
            Some(p) => p.to_string(),
            None => format!("/{}/", slug::slugify(stem)),
        };

        let tz = self.site.config.tz();
        let date = fm.parse_date(&tz).or_else(|| {
            fs::metadata(path)
                .and_then(|m| m.modified())
                .ok()
                .map(|t| DateTime::<Local>::from(t).fixed_offset())
        });

        let excerpt = MarkdownRenderer::excerpt(body).map(|md| self.renderer.render(&md));

        let category = fm.category();
        let mut article = ArticleRecord::new(relative, &title, &article_path, category.as_deref());
        article.frontmatter.date = date;
        article.frontmatter.cover = fm.cover;
        article.frontmatter.tags = fm.tags;
        article.frontmatter.description = fm.description;
        article.excerpt = excerpt;

        Ok(Some(article))
    }
}

/// Path relative to `base`, always `/`-separated
fn relative_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Files under `_`/`.` prefixed directories or with such names stay private
fn is_hidden(relative: &str) -> bool {
    relative
        .split('/')
        .any(|part| part.starts_with('_') || part.starts_with('.'))
}
