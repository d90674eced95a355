//! Generator module - renders the home page using the built-in Tera templates

use anyhow::{Context as _, Result};
use std::fs;
use std::path::PathBuf;

use tera::Context;

use crate::content::{ArticleRecord, ContentIndex, MarkdownRenderer};
use crate::grouping::{group_by_category, CategoryGroups};
use crate::helpers::{date_xml, escape_html, format_date, full_url_for, strip_html, url_for};
use crate::query::{ContentQuery, CoverAsset, HomeData};
use crate::templates::{
    ArticleData, ConfigData, CoverData, GroupData, LayoutData, SiteData, SocialData, TagData,
    TemplateRenderer,
};
use crate::Site;

/// What a generation run produced
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateReport {
    pub output: PathBuf,
    pub groups: usize,
    pub articles: usize,
    pub cover: Option<PathBuf>,
}

/// Home page generator
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::new(),
        })
    }

    /// Run the home query against `index` and write `index.html`
    pub fn generate(&self, index: &ContentIndex) -> Result<GenerateReport> {
        let home = self.home_data(index)?;
        let groups = group_by_category(&home.articles);
        tracing::info!(
            "Home page: {} articles in {} categories",
            groups.article_count(),
            groups.len()
        );

        let html = self.render_home(&home, &groups)?;

        // The page goes last so a failed build never leaves a fresh index.html
        fs::create_dir_all(&self.site.public_dir)?;
        let cover = match &home.cover {
            Some(asset) => Some(self.copy_cover(asset)?),
            None => None,
        };

        let output = self.site.public_dir.join("index.html");
        fs::write(&output, html).with_context(|| format!("Failed to write {:?}", output))?;
        tracing::debug!("Generated: {:?}", output);

        Ok(GenerateReport {
            output,
            groups: groups.len(),
            articles: groups.article_count(),
            cover,
        })
    }

    /// Execute the configured query and adapt its result
    pub fn home_data(&self, index: &ContentIndex) -> Result<HomeData> {
        let query = home_query(&self.site, index);
        let result = query.execute(index)?;
        Ok(HomeData::from_result(
            result,
            &query,
            self.site.config.home.on_missing,
        )?)
    }

    /// Render the home page for already-grouped articles
    pub fn render_home(&self, home: &HomeData, groups: &CategoryGroups<'_>) -> Result<String> {
        let config = &self.site.config;
        let mut context = Context::new();

        context.insert(
            "site",
            &SiteData {
                title: escape_html(&home.site.title),
                subtitle: escape_html(&home.site.subtitle),
                description: escape_html(&strip_html(&home.site.description)),
            },
        );
        context.insert(
            "config",
            &ConfigData {
                language: escape_html(&config.language),
                author: escape_html(&config.author),
                bio: escape_html(&config.bio),
                canonical_url: full_url_for(config, "/"),
            },
        );
        context.insert("layout", &self.build_layout_data());
        context.insert(
            "page_title",
            &format!("{} | Home", escape_html(home.site_title())),
        );
        context.insert(
            "cover",
            &home.cover.as_ref().map(|c| self.build_cover_data(c, home)),
        );
        context.insert(
            "intro",
            &config
                .home
                .intro
                .as_deref()
                .map(|md| self.markdown.render(md)),
        );
        context.insert("lead", &escape_html(&config.home.lead));
        context.insert("groups", &self.build_group_data(groups));

        self.renderer.render("home.html", &context)
    }

    fn build_layout_data(&self) -> LayoutData {
        let config = &self.site.config;
        let layout = &config.layout;
        LayoutData {
            avatar: layout
                .avatar
                .as_deref()
                .map(|a| escape_html(&url_for(config, a))),
            avatar_link: escape_html(
                &layout
                    .avatar_link
                    .clone()
                    .unwrap_or_else(|| url_for(config, "/")),
            ),
            subscribe_action: layout.subscribe_action.as_deref().map(escape_html),
            index_url: url_for(config, "/"),
            social: layout
                .social
                .iter()
                .map(|s| SocialData {
                    name: escape_html(&s.name),
                    url: escape_html(&s.url),
                })
                .collect(),
            scroll_up: layout.scroll_up,
        }
    }

    fn build_cover_data(&self, cover: &CoverAsset, home: &HomeData) -> CoverData {
        let image = &cover.image;
        let mut style = Vec::new();
        if let Some(focus) = &image.crop_focus {
            style.push(format!(
                "object-fit: cover; object-position: {}",
                focus.to_lowercase()
            ));
        }
        if let Some(duotone) = &image.duotone {
            style.push(format!(
                "background: linear-gradient({}, {})",
                duotone.highlight, duotone.shadow
            ));
        }

        CoverData {
            url: url_for(&self.site.config, &cover.relative_path),
            alt: escape_html(home.site_title()),
            max_width: image.max_width,
            max_height: image.max_height,
            style: (!style.is_empty()).then(|| escape_html(&style.join("; "))),
        }
    }

    fn build_group_data(&self, groups: &CategoryGroups<'_>) -> Vec<GroupData> {
        let uncategorized = self.site.config.uncategorized_label();
        groups
            .iter()
            .map(|(key, articles)| {
                let label = key.label(uncategorized);
                GroupData {
                    label: escape_html(label),
                    heading: format!("# About {}", escape_html(label)),
                    anchor: format!("about-{}", slug::slugify(label)),
                    articles: articles.iter().map(|a| self.build_article_data(a)).collect(),
                }
            })
            .collect()
    }

    fn build_article_data(&self, article: &ArticleRecord) -> ArticleData {
        let config = &self.site.config;
        let fm = &article.frontmatter;

        let summary = match &fm.description {
            Some(description) => Some(format!("<p>{}</p>", escape_html(description))),
            None => article.excerpt.clone(),
        };

        ArticleData {
            id: escape_html(&article.id),
            title: escape_html(&fm.title),
            url: url_for(config, &fm.path),
            category: fm.category.as_deref().map(escape_html),
            date: fm.date.as_ref().map(|d| format_date(d, &config.date_format)),
            datetime: fm.date.as_ref().map(date_xml),
            tags: fm
                .tags
                .iter()
                .map(|tag| TagData {
                    name: escape_html(tag),
                    url: url_for(config, &format!("tags/{}/", slug::slugify(tag))),
                })
                .collect(),
            summary,
        }
    }

    /// Copy the cover image next to `index.html`, keeping its relative path
    fn copy_cover(&self, cover: &CoverAsset) -> Result<PathBuf> {
        let dest = self.site.public_dir.join(&cover.relative_path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&cover.source, &dest)
            .with_context(|| format!("Failed to copy cover {:?} to {:?}", cover.source, dest))?;
        tracing::debug!("Copied cover: {:?}", dest);
        Ok(dest)
    }
}

/// The query the home page runs: `home.query`, or every article when it is empty
pub fn home_query(site: &Site, index: &ContentIndex) -> ContentQuery {
    let query = &site.config.home.query;
    if query.is_empty() {
        tracing::warn!("home.query is empty, selecting every article");
        select_everything(index)
    } else {
        query.clone()
    }
}

/// Site metadata plus every article reachable by its path, newest first.
/// Articles shadowed by an earlier one with the same path are left out.
fn select_everything(index: &ContentIndex) -> ContentQuery {
    let mut articles: Vec<_> = index
        .articles()
        .iter()
        .filter(|a| {
            index
                .article_by_path(&a.frontmatter.path)
                .is_some_and(|found| found.id == a.id)
        })
        .collect();
    articles.sort_by(|a, b| b.frontmatter.date.cmp(&a.frontmatter.date));

    articles
        .into_iter()
        .enumerate()
        .fold(ContentQuery::new().site("site"), |query, (i, article)| {
            query.article(&format!("article{}", i + 1), &article.frontmatter.path)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SiteConfig, SocialLink};
    use crate::query::{MissingPolicy, QueryError, Selector, SiteMetadata};

    fn site(config: SiteConfig) -> Site {
        Site::with_config("/tmp/frontpage-test", config)
    }

    fn article(id: &str, category: Option<&str>) -> ArticleRecord {
        ArticleRecord::new(id, &format!("Article {}", id), &format!("/articles/{}/", id), category)
    }

    fn index() -> ContentIndex {
        let mut index = ContentIndex::new(SiteMetadata::titled("Chtefi <dev>"));
        index.add_article(article("1", Some("scala")));
        index.add_article(article("2", Some("kafka")));
        index.add_article(article("3", Some("scala")));
        index.add_article(article("4", None));
        index
    }

    fn query() -> ContentQuery {
        ContentQuery::new()
            .site("site")
            .article("back1", "/articles/1/")
            .article("data1", "/articles/2/")
            .article("back2", "/articles/3/")
    }

    #[test]
    fn test_render_groups_in_first_seen_order() {
        let mut config = SiteConfig::default();
        config.home.query = query();
        let generator = Generator::new(&site(config)).unwrap();

        let home = generator.home_data(&index()).unwrap();
        let groups = group_by_category(&home.articles);
        let html = generator.render_home(&home, &groups).unwrap();

        assert!(html.contains("<title>Chtefi &lt;dev&gt; | Home</title>"));
        let scala = html.find("<h3># About scala</h3>").unwrap();
        let kafka = html.find("<h3># About kafka</h3>").unwrap();
        assert!(scala < kafka);

        let one = html.find(r#"href="/articles/1/""#).unwrap();
        let three = html.find(r#"href="/articles/3/""#).unwrap();
        assert!(one < three && three < kafka);
        assert!(!html.contains("/articles/4/"));
    }

    #[test]
    fn test_uncategorized_label() {
        let mut config = SiteConfig::default();
        config.home.query = query().article("other", "/articles/4/");
        config.home.uncategorized_label = Some("everything else".to_string());
        let generator = Generator::new(&site(config)).unwrap();

        let home = generator.home_data(&index()).unwrap();
        let groups = group_by_category(&home.articles);
        let html = generator.render_home(&home, &groups).unwrap();

        assert!(html.contains("# About everything else"));
        assert!(html.contains(r#"id="about-everything-else""#));
    }

    #[test]
    fn test_missing_alias_fails_by_default() {
        let mut config = SiteConfig::default();
        config.home.query = query().article("gone", "/articles/removed/");
        let generator = Generator::new(&site(config)).unwrap();

        let err = generator.home_data(&index()).unwrap_err();
        let err = err.downcast::<QueryError>().unwrap();
        assert!(matches!(err, QueryError::MissingRecord { ref alias, .. } if alias == "gone"));
    }

    #[test]
    fn test_missing_alias_skipped_when_configured() {
        let mut config = SiteConfig::default();
        config.home.query = query().article("gone", "/articles/removed/");
        config.home.on_missing = MissingPolicy::Skip;
        let generator = Generator::new(&site(config)).unwrap();

        let home = generator.home_data(&index()).unwrap();
        assert_eq!(home.articles.len(), 3);
    }

    #[test]
    fn test_empty_query_selects_everything() {
        let generator = Generator::new(&site(SiteConfig::default())).unwrap();
        let home = generator.home_data(&index()).unwrap();
        assert_eq!(home.articles.len(), 4);
        assert_eq!(home.site_title(), "Chtefi <dev>");
    }

    #[test]
    fn test_empty_query_skips_shadowed_articles() {
        let mut index = index();
        index.add_article(ArticleRecord::new(
            "5",
            "Shadowed",
            "/articles/1/",
            Some("java"),
        ));
        let generator = Generator::new(&site(SiteConfig::default())).unwrap();

        let home = generator.home_data(&index).unwrap();
        let mut ids: Vec<_> = home.articles.iter().map(|a| a.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_home_query_prefers_configured_query() {
        let mut config = SiteConfig::default();
        config.home.query = query();
        assert_eq!(home_query(&site(config), &index()), query());

        let fallback = home_query(&site(SiteConfig::default()), &index());
        assert_eq!(fallback.len(), 5);
        assert_eq!(fallback.get("site"), Some(&Selector::Site));
    }

    #[test]
    fn test_layout_links_are_escaped() {
        let mut config = SiteConfig::default();
        config.layout.avatar_link = Some("/about/?a=1&b=2".to_string());
        config.layout.subscribe_action = Some("https://list.example/post?u=1&id=2".to_string());
        config.layout.social = vec![SocialLink {
            name: "GitHub".to_string(),
            url: r#"https://github.com/x" onclick="y"#.to_string(),
        }];
        let layout = Generator::new(&site(config)).unwrap().build_layout_data();

        assert_eq!(layout.avatar_link, "/about/?a=1&amp;b=2");
        assert_eq!(
            layout.subscribe_action.as_deref(),
            Some("https://list.example/post?u=1&amp;id=2")
        );
        assert_eq!(
            layout.social[0].url,
            "https://github.com/x&quot; onclick=&quot;y"
        );
    }

    #[test]
    fn test_failed_cover_copy_writes_no_page() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.home.query = query().file("cover", "missing.jpg");
        let site = Site::with_config(dir.path(), config);

        let mut index = index();
        index.add_file("missing.jpg", dir.path().join("source/missing.jpg"));

        let generator = Generator::new(&site).unwrap();
        assert!(generator.generate(&index).is_err());
        assert!(!site.public_dir.join("index.html").exists());
    }

    #[test]
    fn test_article_summary_prefers_description() {
        let generator = Generator::new(&site(SiteConfig::default())).unwrap();
        let mut a = article("1", Some("scala"));
        a.excerpt = Some("<p>excerpt</p>".to_string());
        a.frontmatter.description = Some("Parsers & monads".to_string());
        a.frontmatter.tags = vec!["Scala Cats".to_string()];

        let data = generator.build_article_data(&a);
        assert_eq!(data.summary.as_deref(), Some("<p>Parsers &amp; monads</p>"));
        assert_eq!(data.tags[0].url, "/tags/scala-cats/");
    }
}
