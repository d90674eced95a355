//! Create a new article

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Write a new article skeleton into the posts directory
pub fn create_article(
    site: &Site,
    title: &str,
    category: Option<&str>,
    path: Option<&str>,
) -> Result<PathBuf> {
    let now = chrono::Local::now();
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let posts_dir = site.source_dir.join(&site.config.posts_dir);
    fs::create_dir_all(&posts_dir)?;

    let file_path = posts_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let article_path = match path {
        Some(p) => p.to_string(),
        None => format!("/articles/{}/{}/", now.format("%Y/%m/%d"), slug),
    };

    let mut content = String::from("---\n");
    content.push_str(&format!("title: {}\n", yaml_string(title)));
    content.push_str(&format!("path: {}\n", article_path));
    if let Some(category) = category {
        content.push_str(&format!("category: {}\n", yaml_string(category)));
    }
    content.push_str(&format!("date: {}\n", now.format("%Y-%m-%d %H:%M:%S")));
    content.push_str("---\n\n");

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Quote a scalar so titles like `Kafka: offsets` stay valid YAML
fn yaml_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
