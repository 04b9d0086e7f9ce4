//! In-memory page cache.
//!
//! Maps a page number to the articles parsed from it. Entries are written once
//! and kept for the lifetime of the owning scraper; there is no eviction and no
//! TTL, so memory grows with every distinct page requested (bounded in practice
//! by the configured page limit).

use crate::models::{Article, CacheStatus};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct PageCache {
    pages: BTreeMap<u32, Vec<Article>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains_key(&page)
    }

    /// Store the articles for `page`.
    ///
    /// An existing entry is never replaced; the call is ignored and `false`
    /// returned.
    pub fn insert(&mut self, page: u32, articles: Vec<Article>) -> bool {
        if self.pages.contains_key(&page) {
            debug!(page, "Page already cached; keeping existing entry");
            return false;
        }
        debug!(page, count = articles.len(), "Caching page");
        self.pages.insert(page, articles);
        true
    }

    /// Pages in `1..=num_pages` without an entry, ascending.
    pub fn missing_pages(&self, num_pages: u32) -> Vec<u32> {
        (1..=num_pages).filter(|page| !self.contains(*page)).collect()
    }

    /// Concatenate the articles of pages `1..=num_pages` in page order.
    ///
    /// Pages without an entry contribute nothing.
    pub fn collect(&self, num_pages: u32) -> Vec<Article> {
        self.pages
            .range(..=num_pages)
            .flat_map(|(_, articles)| articles.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn status(&self) -> CacheStatus {
        let articles_per_page: BTreeMap<u32, usize> = self
            .pages
            .iter()
            .map(|(page, articles)| (*page, articles.len()))
            .collect();

        CacheStatus {
            cached_pages: articles_per_page.keys().copied().collect(),
            total_articles: articles_per_page.values().sum(),
            articles_per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn article(title: &str) -> Article {
        Article::with_default_metadata(title, format!("https://example.com/{title}"))
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = PageCache::new();
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.status(), CacheStatus::default());
    }

    #[test]
    fn test_insert_does_not_overwrite() {
        let mut cache = PageCache::new();
        assert!(cache.insert(1, vec![article("first")]));
        assert!(!cache.insert(1, vec![article("second"), article("third")]));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.collect(1), vec![article("first")]);
    }

    #[test]
    fn test_missing_pages_ascending() {
        let mut cache = PageCache::new();
        cache.insert(2, vec![]);
        cache.insert(4, vec![article("d")]);

        assert_eq!(cache.missing_pages(5), vec![1, 3, 5]);
        assert_eq!(cache.missing_pages(0), Vec::<u32>::new());
    }

    #[test]
    fn test_collect_in_page_order() {
        let mut cache = PageCache::new();
        cache.insert(3, vec![article("c")]);
        cache.insert(1, vec![article("a1"), article("a2")]);
        cache.insert(2, vec![article("b")]);

        let titles: Vec<_> = cache.collect(2).into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["a1", "a2", "b"]);
    }

    #[test]
    fn test_status() {
        let mut cache = PageCache::new();
        cache.insert(2, vec![article("Article 3")]);
        cache.insert(1, vec![article("Article 1"), article("Article 2")]);

        let status = cache.status();
        assert_eq!(status.cached_pages, vec![1, 2]);
        assert_eq!(status.total_articles, 3);
        assert_eq!(status.articles_per_page, BTreeMap::from([(1, 2), (2, 1)]));
    }
}
