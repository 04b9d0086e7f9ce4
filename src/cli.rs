//! Command-line interface definitions for the scraper service.
//!
//! All arguments can be provided via command-line flags or environment
//! variables.

use crate::scraper::DEFAULT_MAX_PAGES;
use crate::scrapers::ScraperConfig;
use clap::Parser;
use std::time::Duration;
use url::Url;

/// Command-line arguments for the scraper service.
///
/// # Examples
///
/// ```sh
/// # Serve on the default address against news.ycombinator.com
/// hn_scraper
///
/// # Different port and a tighter page limit
/// hn_scraper --port 9000 --max-pages 5
///
/// # Point at a mirror
/// HN_SCRAPER_BASE_URL=http://localhost:8080 hn_scraper
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "HN_SCRAPER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "HN_SCRAPER_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Root URL of the listing site to scrape
    #[arg(short, long, env = "HN_SCRAPER_BASE_URL", default_value = "https://news.ycombinator.com")]
    pub base_url: String,

    /// Largest number of pages a single request may ask for
    #[arg(
        short,
        long,
        env = "HN_SCRAPER_MAX_PAGES",
        default_value_t = DEFAULT_MAX_PAGES,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_pages: u32,

    /// Upstream request timeout in seconds
    #[arg(long, env = "HN_SCRAPER_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl Cli {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate the upstream settings and bundle them for the scraper.
    pub fn scraper_config(&self) -> Result<ScraperConfig, url::ParseError> {
        Ok(ScraperConfig {
            base_url: Url::parse(&self.base_url)?,
            max_pages: self.max_pages,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}
