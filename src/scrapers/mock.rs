//! Mock page fetcher for testing
//!
//! Serves canned markup for every page without touching the network, records
//! which pages were requested, and can be told to fail on one page or to
//! hold every fetch until released.

use super::{FetchError, PageFetcher};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use url::Url;

/// Listing markup with `rows` articles, titled after their page and row.
pub fn listing_markup(page: u32, rows: usize) -> String {
    let mut html = String::from("<html><body><table>");
    for row in 1..=rows {
        html.push_str(&format!(
            r#"<tr class="athing" id="{page}{row}">
                <td><span class="titleline"><a href="item?id={page}{row}">Page {page} story {row}</a></span></td>
            </tr>
            <tr><td class="subtext">
                <span class="score">100 points</span> by <a class="hnuser">testuser</a>
                <span class="age" title="2023-12-01T10:00:00">1 hour ago</span> |
                <a>10 comments</a>
            </td></tr>"#
        ));
    }
    html.push_str("</table></body></html>");
    html
}

#[derive(Debug, Clone)]
pub struct MockFetcher {
    base_url: Url,
    rows_per_page: usize,
    fail_on: Option<u32>,
    gate: Option<Arc<Notify>>,
    calls: Arc<Mutex<Vec<u32>>>,
}

impl MockFetcher {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            base_url: Url::parse("https://news.ycombinator.com").unwrap(),
            rows_per_page,
            fail_on: None,
            gate: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make every fetch of `page` fail as if the connection dropped.
    pub fn failing_on(mut self, page: u32) -> Self {
        self.fail_on = Some(page);
        self
    }

    /// Hold every fetch until `gate` is notified, once per fetch.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Pages requested so far, in request order.
    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }
}

impl PageFetcher for MockFetcher {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn fetch(&self, page: u32) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(page);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail_on == Some(page) {
            return Err(FetchError::new(page, "Network error"));
        }
        Ok(listing_markup(page, self.rows_per_page))
    }
}
