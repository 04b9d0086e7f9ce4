//! Upstream page fetching.
//!
//! A scraper runs in two phases per page:
//!
//! 1. **Fetching**: Download the raw listing markup for one page number
//! 2. **Parsing**: Extract [`Article`](crate::models::Article) records from it
//!
//! Fetching sits behind the [`PageFetcher`] trait so the aggregation logic can
//! run against the live site ([`HttpFetcher`]) or an in-memory source in tests.
//! Parsing lives in the per-site module ([`hackernews`]).
//!
//! Fetches are never retried. A transport failure or a non-2xx status comes
//! back as a [`FetchError`] carrying the page number and the cause.

pub mod hackernews;
#[cfg(test)]
pub mod mock;

use crate::utils::truncate_for_log;
use reqwest::Client;
use std::error::Error;
use std::future::Future;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

type BoxError = Box<dyn Error + Send + Sync>;

/// Query parameter the upstream site paginates on.
pub const PAGE_QUERY_PARAM: &str = "p";

/// Settings consumed by the fetcher and the aggregator.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Root of the upstream listing site.
    pub base_url: Url,
    /// Largest page count a single request may ask for.
    pub max_pages: u32,
    /// Per-request network timeout.
    pub timeout: Duration,
}

/// A failed attempt to download one page.
#[derive(Debug, Error)]
#[error("page {page}: {source}")]
pub struct FetchError {
    /// The page number that was being fetched.
    pub page: u32,
    #[source]
    source: BoxError,
}

impl FetchError {
    pub fn new(page: u32, source: impl Into<BoxError>) -> Self {
        Self {
            page,
            source: source.into(),
        }
    }
}

/// Source of raw listing markup, one page at a time.
pub trait PageFetcher: Send + Sync {
    /// The site root that page URLs and relative links are built from.
    fn base_url(&self) -> &Url;

    /// Download the markup for `page`, unmodified.
    fn fetch(&self, page: u32) -> impl Future<Output = Result<String, FetchError>> + Send;

    /// URL of a single listing page: the base URL with `?p=<page>` appended.
    fn page_url(&self, page: u32) -> Url {
        let mut url = self.base_url().clone();
        url.query_pairs_mut()
            .append_pair(PAGE_QUERY_PARAM, &page.to_string());
        url
    }
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    /// Build a fetcher for `config.base_url` whose requests give up after
    /// `config.timeout`.
    pub fn new(config: &ScraperConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    async fn get_text(&self, url: &Url) -> Result<String, reqwest::Error> {
        self.client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

impl PageFetcher for HttpFetcher {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, page: u32) -> Result<String, FetchError> {
        let url = self.page_url(page);
        let t0 = Instant::now();

        let result = self.get_text(&url).await;
        let elapsed_ms = t0.elapsed().as_millis();

        match result {
            Ok(body) => {
                info!(%url, elapsed_ms, bytes = body.len(), "Fetched listing page");
                debug!(preview = %truncate_for_log(&body, 200), "Listing page body");
                Ok(body)
            }
            Err(e) => {
                warn!(%url, elapsed_ms, error = %e, "Listing page fetch failed");
                Err(FetchError::new(page, e))
            }
        }
    }
}
