//! Shapes a raw query result into the home page's inputs

use super::{ContentQuery, CoverAsset, MissingPolicy, QueryError, QueryResult, Record, SiteMetadata};
use crate::content::ArticleRecord;

/// Everything the home page renders, taken from one query result
#[derive(Debug, Clone, PartialEq)]
pub struct HomeData {
    pub site: SiteMetadata,
    pub cover: Option<CoverAsset>,
    /// Selected articles in query order
    pub articles: Vec<ArticleRecord>,
}

impl HomeData {
    pub fn site_title(&self) -> &str {
        &self.site.title
    }

    /// Split a query result into site metadata, cover and articles.
    ///
    /// Records are recognised by kind, so alias names and positions don't
    /// matter. Aliases that resolved to nothing are handled per `policy`;
    /// with [`MissingPolicy::Fail`] every missing alias is logged before the
    /// first one is returned as the error.
    pub fn from_result(
        result: QueryResult,
        query: &ContentQuery,
        policy: MissingPolicy,
    ) -> Result<Self, QueryError> {
        let missing: Vec<QueryError> = result
            .iter()
            .filter(|(_, record)| record.is_none())
            .map(|(alias, _)| QueryError::MissingRecord {
                alias: alias.clone(),
                selector: query
                    .get(alias)
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "unknown selector".to_string()),
            })
            .collect();

        match policy {
            MissingPolicy::Fail => {
                for err in &missing {
                    tracing::error!("{}", err);
                }
                if let Some(first) = missing.into_iter().next() {
                    return Err(first);
                }
            }
            MissingPolicy::Skip => {
                for err in &missing {
                    tracing::warn!("{}, skipping", err);
                }
            }
        }

        let mut site: Option<(String, SiteMetadata)> = None;
        let mut cover: Option<(String, CoverAsset)> = None;
        let mut articles = Vec::new();

        for (alias, record) in result {
            match record {
                None => {}
                Some(Record::Site(meta)) => {
                    if let Some((first, _)) = &site {
                        return Err(QueryError::DuplicateSite {
                            first: first.clone(),
                            second: alias,
                        });
                    }
                    site = Some((alias, meta));
                }
                Some(Record::File(asset)) => {
                    if let Some((first, _)) = &cover {
                        return Err(QueryError::MultipleCovers {
                            first: first.clone(),
                            second: alias,
                        });
                    }
                    cover = Some((alias, asset));
                }
                Some(Record::Article(article)) => articles.push(article),
            }
        }

        let (_, site) = site.ok_or(QueryError::MissingSiteMetadata)?;

        Ok(Self {
            site,
            cover: cover.map(|(_, asset)| asset),
            articles,
        })
    }
}
