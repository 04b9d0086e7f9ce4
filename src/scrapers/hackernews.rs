//! Hacker News listing parser.
//!
//! The listing is a table where every entry spans two rows:
//!
//! ```text
//! <tr class="athing">  <span class="titleline"><a href="...">Title</a></span>
//! <tr>                 <td class="subtext"> score, user, age, comments </td>
//! ```
//!
//! Rows are extracted independently: a row without a usable title link is
//! skipped, and a missing or sparse metadata row only leaves the affected
//! fields at their defaults.
//!
//! Markup goes through a full HTML5 parser, so `<tr>` elements outside a
//! `<table>` are dropped and never reach the row selector.

use crate::models::Article;
use crate::utils::{first_integer, normalize_whitespace};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

static ARTICLE_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr.athing").unwrap());
static TITLE_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("span.titleline a").unwrap());
static SUBTEXT: Lazy<Selector> = Lazy::new(|| Selector::parse("td.subtext").unwrap());
static SCORE: Lazy<Selector> = Lazy::new(|| Selector::parse("span.score").unwrap());
static AUTHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a.hnuser").unwrap());
static AGE: Lazy<Selector> = Lazy::new(|| Selector::parse("span.age").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// Parse every article on one listing page.
///
/// # Arguments
///
/// * `markup` - Raw HTML of the page
/// * `base` - URL the page was fetched from; relative links resolve against it
///
/// # Returns
///
/// Articles in the order their rows appear. A page without any article rows
/// yields an empty vector.
#[instrument(level = "debug", skip_all, fields(%base))]
pub fn parse_page(markup: &str, base: &Url) -> Vec<Article> {
    let document = Html::parse_document(markup);

    let mut articles = Vec::new();
    let mut skipped = 0usize;
    for (index, row) in document.select(&ARTICLE_ROW).enumerate() {
        match extract_article(row, base) {
            Some(article) => articles.push(article),
            None => {
                skipped += 1;
                debug!(index, id = ?row.value().attr("id"), "Skipping row without a usable title link");
            }
        }
    }

    info!(count = articles.len(), skipped, "Parsed listing page");
    articles
}

/// Extract one article from its primary row, or `None` when the row has no
/// title link, an empty title, or an href that cannot be resolved.
///
/// Absolute hrefs are kept verbatim; relative ones are joined onto `base`.
fn extract_article(row: ElementRef<'_>, base: &Url) -> Option<Article> {
    let link = row.select(&TITLE_LINK).next()?;
    let title = element_text(link);
    if title.is_empty() {
        return None;
    }
    let href = link.value().attr("href")?;
    let url = match Url::parse(href) {
        Ok(_) => href.to_string(),
        Err(_) => base.join(href).ok()?.to_string(),
    };

    let mut article = Article::with_default_metadata(title, url);
    if let Some(subtext) = metadata_cell(row) {
        apply_metadata(&mut article, subtext);
    }
    Some(article)
}

/// The `td.subtext` cell of the row directly after `row`, if there is one.
fn metadata_cell(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let next_row = row
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "tr")?;
    next_row.select(&SUBTEXT).next()
}

fn apply_metadata(article: &mut Article, subtext: ElementRef<'_>) {
    if let Some(points) = subtext
        .select(&SCORE)
        .next()
        .and_then(|score| first_integer(&element_text(score)))
    {
        article.points = points;
    }

    if let Some(author) = subtext
        .select(&AUTHOR)
        .next()
        .map(element_text)
        .filter(|name| !name.is_empty())
    {
        article.author = author;
    }

    // Entries without comments link "discuss" instead, which leaves the default.
    if let Some(comments) = subtext
        .select(&LINK)
        .map(element_text)
        .find(|text| text.to_lowercase().contains("comment"))
        .and_then(|text| first_integer(&text))
    {
        article.comments = comments;
    }

    article.created_at = subtext.select(&AGE).next().and_then(timestamp);
}

/// The age element's `title` attribute, falling back to its link text and
/// then its own text.
fn timestamp(age: ElementRef<'_>) -> Option<String> {
    let non_empty = |s: String| (!s.is_empty()).then_some(s);

    age.value()
        .attr("title")
        .map(|title| title.trim().to_string())
        .and_then(non_empty)
        .or_else(|| age.select(&LINK).next().map(element_text).and_then(non_empty))
        .or_else(|| non_empty(element_text(age)))
}

fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}
