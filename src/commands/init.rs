//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# Site
title: My Blog
subtitle: ''
description: ''
author: John Doe
bio: ''
language: en
timezone: UTC

# URL
url: http://example.com
root: /

# Directory
source_dir: source
public_dir: public
posts_dir: _posts
skip_render: []

# Writing
default_category: uncategorized
date_format: MMMM DD, YYYY

# Home page
home:
  # fail: abort when an alias matches nothing; skip: leave it out
  on_missing: fail
  intro: |
    # Hi!

    Check below for a selection of articles.
  query:
    site: { kind: site }
    first: { kind: article, path: /articles/hello-world/ }
    second: { kind: article, path: /articles/grouping-by-category/ }

# Layout
layout:
  scroll_up: true
  social: []
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    fs::create_dir_all(target_dir.join("source/_posts"))?;
    fs::write(&config_path, CONFIG_TEMPLATE)?;

    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let samples = [
        (
            "hello-world.md",
            format!(
                "---\ntitle: Hello World\npath: /articles/hello-world/\ncategory: meta\ndate: {}\ntags: [welcome]\n---\n\nWelcome! This article is part of the home page selection.\n",
                now
            ),
        ),
        (
            "grouping-by-category.md",
            format!(
                "---\ntitle: Grouping by category\npath: /articles/grouping-by-category/\ncategory: meta\ndate: {}\n---\n\nArticles sharing a category are listed under the same heading.\n",
                now
            ),
        ),
    ];
    for (name, content) in samples {
        fs::write(target_dir.join("source/_posts").join(name), content)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Site;

    #[test]
    fn test_init_then_generate() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.home.query.len(), 3);

        let report = site.generate().unwrap();
        assert_eq!(report.groups, 1);
        assert_eq!(report.articles, 2);
        let html = fs::read_to_string(report.output).unwrap();
        assert!(html.contains("# About meta"));
        assert!(html.contains("<h1>Hi!</h1>"));
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
