//! Built-in home page templates using the Tera template engine
//!
//! Templates are embedded in the binary. Every string placed in a view is
//! already HTML-escaped (or is trusted rendered markdown), so autoescaping
//! is off.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

/// Template renderer with the embedded home page theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Views carry pre-escaped text; Tera would also escape `/` in URLs
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("frontpage/layout.html")),
            ("home.html", include_str!("frontpage/home.html")),
            (
                "partials/header.html",
                include_str!("frontpage/partials/header.html"),
            ),
            (
                "partials/category.html",
                include_str!("frontpage/partials/category.html"),
            ),
            (
                "partials/article.html",
                include_str!("frontpage/partials/article.html"),
            ),
            (
                "partials/bio.html",
                include_str!("frontpage/partials/bio.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(crate::helpers::strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub language: String,
    pub author: String,
    pub bio: String,
    pub canonical_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutData {
    pub avatar: Option<String>,
    pub avatar_link: String,
    pub subscribe_action: Option<String>,
    pub index_url: String,
    pub social: Vec<SocialData>,
    pub scroll_up: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialData {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverData {
    pub url: String,
    pub alt: String,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Inline style hints (crop focus, duotone) from the query
    pub style: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupData {
    pub label: String,
    pub heading: String,
    pub anchor: String,
    pub articles: Vec<ArticleData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleData {
    pub id: String,
    pub title: String,
    pub url: String,
    pub category: Option<String>,
    pub date: Option<String>,
    pub datetime: Option<String>,
    pub tags: Vec<TagData>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagData {
    pub name: String,
    pub url: String,
}
