//! List site content

use anyhow::Result;
use std::io::Write;

use crate::content::loader::ContentLoader;
use crate::content::ContentIndex;
use crate::generator::home_query;
use crate::grouping::group_by_category;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let index = ContentLoader::new(site)?.load()?;
    let stdout = std::io::stdout();
    write_listing(site, &index, content_type, &mut stdout.lock())
}

fn write_listing<W: Write>(
    site: &Site,
    index: &ContentIndex,
    content_type: &str,
    out: &mut W,
) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            writeln!(out, "Articles ({}):", index.articles().len())?;
            for article in index.articles() {
                let fm = &article.frontmatter;
                writeln!(
                    out,
                    "  {} - {} {} [{}]",
                    fm.date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "----------".to_string()),
                    fm.title,
                    fm.path,
                    article.id
                )?;
            }
        }
        "category" | "categories" => {
            let groups = group_by_category(index.articles());
            writeln!(out, "Categories ({}):", groups.len())?;
            for (key, articles) in groups.iter() {
                writeln!(
                    out,
                    "  {} ({})",
                    key.label(site.config.uncategorized_label()),
                    articles.len()
                )?;
            }
        }
        "query" => {
            let query = home_query(site, index);
            let result = query.execute(index)?;
            writeln!(out, "Query ({} aliases):", result.len())?;
            for (alias, selector) in query.iter() {
                let status = match result.get(alias) {
                    Some(Some(_)) => "ok",
                    _ => "MISSING",
                };
                writeln!(out, "  {:<8} {} -> {}", status, alias, selector)?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category, query",
                content_type
            );
        }
    }

    Ok(())
}
