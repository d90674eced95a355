//! Site configuration (_config.yml / _config.toml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::query::{ContentQuery, MissingPolicy};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub bio: String,
    pub language: String,
    /// IANA zone name used for front-matter dates without an offset
    pub timezone: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    pub posts_dir: String,
    #[serde(default)]
    pub skip_render: Vec<String>,

    // Writing
    pub default_category: String,
    pub date_format: String,

    // Home page
    #[serde(default)]
    pub home: HomeConfig,

    // Layout chrome
    #[serde(default)]
    pub layout: LayoutConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            bio: String::new(),
            language: "en".to_string(),
            timezone: "UTC".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),
            posts_dir: "_posts".to_string(),
            skip_render: Vec::new(),

            default_category: "uncategorized".to_string(),
            date_format: "MMMM DD, YYYY".to_string(),

            home: HomeConfig::default(),
            layout: LayoutConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML or TOML file, chosen by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&content)?,
            _ => Self::from_yaml(&content)?,
        };
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse the configured timezone, falling back to UTC
    pub fn tz(&self) -> chrono_tz::Tz {
        match self.timezone.parse::<chrono_tz::Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                if !self.timezone.is_empty() {
                    tracing::warn!("Unknown timezone {:?}, using UTC", self.timezone);
                }
                chrono_tz::UTC
            }
        }
    }

    /// Label shown for articles without a category
    pub fn uncategorized_label(&self) -> &str {
        self.home
            .uncategorized_label
            .as_deref()
            .unwrap_or(&self.default_category)
    }
}

/// Home page configuration: the content query and page copy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    /// Aliased selection of records rendered on the home page
    pub query: ContentQuery,
    /// What to do when an alias resolves to no record
    pub on_missing: MissingPolicy,
    /// Markdown shown above the article selection
    pub intro: Option<String>,
    /// Lead-in shown right before the category groups
    pub lead: String,
    pub uncategorized_label: Option<String>,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            query: ContentQuery::default(),
            on_missing: MissingPolicy::Fail,
            intro: None,
            lead: "Below is a small selection of the most read articles, grouped by theme."
                .to_string(),
            uncategorized_label: None,
        }
    }
}

/// Static header/footer chrome around the page content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Avatar image path, relative to the site root
    pub avatar: Option<String>,
    /// Where the avatar links to
    pub avatar_link: Option<String>,
    /// Mailing-list form action; the form is omitted when unset
    pub subscribe_action: Option<String>,
    pub social: Vec<SocialLink>,
    /// Show the "back to top" anchor
    pub scroll_up: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Selector;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.default_category, "uncategorized");
        assert_eq!(config.home.on_missing, MissingPolicy::Fail);
        assert!(config.home.query.is_empty());
    }

    #[test]
    fn test_parse_yaml_query_keeps_order() {
        let yaml = r#"
title: Chtefi's Blog
timezone: Europe/Paris
home:
  on_missing: skip
  query:
    site: { kind: site }
    cover:
      kind: file
      relative_path: DSC00806.jpg
      image:
        max_height: 220
        max_width: 1000
    data1: { kind: article, path: /articles/2017/08/07/kafka/ }
    back1: { kind: article, path: /articles/2018/06/15/state-monad/ }
"#;
        let config = SiteConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.title, "Chtefi's Blog");
        assert_eq!(config.tz(), chrono_tz::Europe::Paris);
        assert_eq!(config.home.on_missing, MissingPolicy::Skip);

        let aliases: Vec<_> = config.home.query.aliases().collect();
        assert_eq!(aliases, vec!["site", "cover", "data1", "back1"]);
        assert!(matches!(
            config.home.query.get("data1"),
            Some(Selector::Article { path }) if path == "/articles/2017/08/07/kafka/"
        ));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
title = "Toml Blog"
default_category = "misc"

[home.query.site]
kind = "site"

[home.query.one]
kind = "article"
path = "/one/"
"#;
        let config = SiteConfig::from_toml(toml).unwrap();
        assert_eq!(config.title, "Toml Blog");
        assert_eq!(config.uncategorized_label(), "misc");
        assert_eq!(config.home.query.len(), 2);
    }

    #[test]
    fn test_unknown_timezone_falls_back_to_utc() {
        let config = SiteConfig {
            timezone: "Mars/Olympus".to_string(),
            ..Default::default()
        };
        assert_eq!(config.tz(), chrono_tz::UTC);
    }
}
