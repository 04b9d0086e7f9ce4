//! Data models for scraped listing entries and the cache status view.
//!
//! - [`Article`]: One entry from the listing page, as served by the API
//! - [`CacheStatus`]: Read-only snapshot of which pages are memoized
//!
//! Articles keep snake_case field names on the wire, while the cache status
//! uses camelCase to match what API clients expect.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Author reported when a row has no user link.
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// A single listing entry extracted from one page of the upstream site.
///
/// Articles have no identity beyond their position in the listing. They are
/// built once during parsing and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    /// The headline text of the title link.
    pub title: String,
    /// Absolute URL the title links to.
    pub url: String,
    /// Score shown under the entry; `0` when missing.
    pub points: u32,
    /// Submitter's username; [`UNKNOWN_AUTHOR`] when missing.
    pub author: String,
    /// Number of comments; `0` when missing or when the entry has a "discuss" link.
    pub comments: u32,
    /// Opaque timestamp token copied verbatim from the row.
    pub created_at: Option<String>,
}

impl Article {
    /// Build an article carrying only a title and URL, with every metadata
    /// field at its default.
    pub fn with_default_metadata(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            points: 0,
            author: UNKNOWN_AUTHOR.to_string(),
            comments: 0,
            created_at: None,
        }
    }
}

/// Snapshot of the page cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    /// Cached page numbers in ascending order.
    pub cached_pages: Vec<u32>,
    /// Sum of article counts over every cached page.
    pub total_articles: usize,
    /// Article count per cached page.
    pub articles_per_page: BTreeMap<u32, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_defaults() {
        let article = Article::with_default_metadata("Title", "https://example.com");
        assert_eq!(article.points, 0);
        assert_eq!(article.author, "unknown");
        assert_eq!(article.comments, 0);
        assert_eq!(article.created_at, None);
    }

    #[test]
    fn test_article_serialization() {
        let article = Article {
            title: "Show HN: Something".to_string(),
            url: "https://example.com".to_string(),
            points: 150,
            author: "testuser".to_string(),
            comments: 25,
            created_at: Some("2023-12-01T10:00:00".to_string()),
        };

        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["title"], "Show HN: Something");
        assert_eq!(json["points"], 150);
        assert_eq!(json["created_at"], "2023-12-01T10:00:00");
    }

    #[test]
    fn test_missing_timestamp_serializes_as_null() {
        let article = Article::with_default_metadata("Title", "https://example.com");
        let json = serde_json::to_value(&article).unwrap();
        assert!(json.get("created_at").unwrap().is_null());
    }

    #[test]
    fn test_cache_status_uses_camel_case() {
        let status = CacheStatus {
            cached_pages: vec![1, 2],
            total_articles: 3,
            articles_per_page: BTreeMap::from([(1, 2), (2, 1)]),
        };

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["cachedPages"], serde_json::json!([1, 2]));
        assert_eq!(json["totalArticles"], 3);
        assert_eq!(json["articlesPerPage"]["1"], 2);
        assert_eq!(json["articlesPerPage"]["2"], 1);
    }
}
