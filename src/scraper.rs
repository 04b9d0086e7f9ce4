//! Page-range aggregation with per-process memoization.
//!
//! [`Scraper`] owns the page cache. A request for `n` pages validates `n`,
//! fetches only the pages in `1..=n` that are not cached yet (ascending), and
//! returns the concatenation of all `n` pages in page order.

use crate::cache::PageCache;
use crate::error::ScrapeError;
use crate::models::{Article, CacheStatus};
use crate::scrapers::PageFetcher;
use crate::scrapers::hackernews::parse_page;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Default upper bound on pages per request.
pub const DEFAULT_MAX_PAGES: u32 = 10;

#[derive(Debug)]
pub struct Scraper<F> {
    fetcher: F,
    max_pages: u32,
    cache: Mutex<PageCache>,
}

impl<F: PageFetcher> Scraper<F> {
    /// Create a scraper with an empty cache.
    pub fn new(fetcher: F, max_pages: u32) -> Self {
        Self {
            fetcher,
            max_pages,
            cache: Mutex::new(PageCache::new()),
        }
    }

    /// Articles from pages `1..=num_pages`, concatenated in page order.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::Validation`] if `num_pages` is outside `1..=max_pages`
    /// - [`ScrapeError::Fetch`] on the first page that fails to download; pages
    ///   fetched earlier in the same call stay cached
    ///
    /// The cache lock is held for the whole call, so concurrent requests for
    /// the same missing page fetch it once.
    #[instrument(level = "info", skip(self))]
    pub async fn get_articles(&self, num_pages: i64) -> Result<Vec<Article>, ScrapeError> {
        let num_pages = self.validate(num_pages)?;
        let t0 = Instant::now();

        let mut cache = self.cache.lock().await;
        let missing = cache.missing_pages(num_pages);
        info!(?missing, cached = cache.len(), "Resolving pages");

        for page in missing {
            let markup = self.fetcher.fetch(page).await.inspect_err(|e| {
                error!(page, error = %e, "Aborting request; page fetch failed");
            })?;
            let articles = parse_page(&markup, &self.fetcher.page_url(page));
            cache.insert(page, articles);
        }

        let articles = cache.collect(num_pages);
        info!(
            count = articles.len(),
            elapsed_ms = t0.elapsed().as_millis(),
            "Collected articles"
        );
        Ok(articles)
    }

    /// Snapshot of what is currently cached.
    ///
    /// Shares the cache lock with [`Scraper::get_articles`], so a status read
    /// issued during a cold multi-page fetch waits until that fetch finishes
    /// or fails (at most `max_pages` upstream timeouts). It never sees a
    /// half-written page.
    pub async fn cache_status(&self) -> CacheStatus {
        self.cache.lock().await.status()
    }

    fn validate(&self, num_pages: i64) -> Result<u32, ScrapeError> {
        match u32::try_from(num_pages) {
            Ok(n) if (1..=self.max_pages).contains(&n) => Ok(n),
            _ => Err(ScrapeError::Validation {
                requested: num_pages,
                max: self.max_pages,
            }),
        }
    }
}
