//! Tengri News tag-page scraper.
//!
//! This module scrapes the [Tengri News](https://tengrinews.kz) tag page for
//! "загрязнение" (pollution) and enriches every linked article with the
//! details from [`super::article`].
//!
//! # URL Pattern
//!
//! Article links contain the `/kazakhstan_news/` path segment. They are
//! usually relative (`/kazakhstan_news/some-slug-123456/`) and are resolved
//! against `https://tengrinews.kz`.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

use super::NewsSource;
use super::article::fetch_article_details;
use crate::client::fetch_page;
use crate::error::ScrapeError;
use crate::models::{ArticleDetails, ArticleRecord};
use crate::utils::element_text;

pub const TENGRI_TAG_URL: &str =
    "https://tengrinews.kz/tag/%D0%B7%D0%B0%D0%B3%D1%80%D1%8F%D0%B7%D0%BD%D0%B5%D0%BD%D0%B8%D0%B5/";
pub const TENGRI_BASE_URL: &str = "https://tengrinews.kz";
pub const TENGRI_LINK_MARKER: &str = "/kazakhstan_news/";
pub const TENGRI_SOURCE_ID: &str = "tengrinews";

/// Default number of article pages fetched at once.
pub const DEFAULT_CONCURRENCY: usize = 4;

static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Where and how to scrape.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// The tag page enumerating article links.
    pub listing_url: Url,
    /// Origin that relative hrefs are resolved against.
    pub base_url: Url,
    /// Substring an href must contain to count as an article link.
    pub link_marker: String,
    /// Stamped into every record's `source_id`.
    pub source_id: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            listing_url: Url::parse(TENGRI_TAG_URL).unwrap(),
            base_url: Url::parse(TENGRI_BASE_URL).unwrap(),
            link_marker: TENGRI_LINK_MARKER.to_string(),
            source_id: TENGRI_SOURCE_ID.to_string(),
        }
    }
}

/// An article link found on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLink {
    pub title: String,
    pub link: String,
}

/// Scrapes the listing page and the articles it links to.
#[derive(Debug, Clone)]
pub struct TengriScraper {
    client: Client,
    config: SourceConfig,
    concurrency: usize,
}

impl TengriScraper {
    /// Create a scraper. `concurrency` is clamped to at least one.
    pub fn new(client: Client, config: SourceConfig, concurrency: usize) -> Self {
        Self {
            client,
            config,
            concurrency: concurrency.max(1),
        }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Fetch the listing page and build one record per unique titled link.
    ///
    /// Article pages are fetched up to `concurrency` at a time; the result
    /// keeps the order in which links appear on the listing page.
    ///
    /// # Errors
    ///
    /// Only a failure to fetch the listing page itself is returned. Article
    /// failures degrade to records with empty details.
    #[instrument(level = "info", skip(self), fields(url = %self.config.listing_url))]
    pub async fn fetch_listing(&self) -> Result<Vec<ArticleRecord>, ScrapeError> {
        let html = fetch_page(&self.client, self.config.listing_url.as_str()).await?;
        let links = discover_links(&html, &self.config);
        debug!(links = ?links, "Discovered article links");

        let details = self.fetch_details_in_order(&links).await;
        let articles: Vec<ArticleRecord> = links
            .into_iter()
            .zip(details)
            .map(|(found, details)| {
                ArticleRecord::new(found.title, found.link, details, &self.config.source_id)
            })
            .collect();

        info!(count = articles.len(), "Fetched Tengri listing");
        Ok(articles)
    }

    async fn fetch_details_in_order(&self, links: &[DiscoveredLink]) -> Vec<ArticleDetails> {
        let jobs: Vec<(usize, String)> = links
            .iter()
            .map(|found| found.link.clone())
            .enumerate()
            .collect();

        let mut indexed: Vec<(usize, ArticleDetails)> = stream::iter(jobs)
            .map(|(index, link)| {
                let client = self.client.clone();
                async move { (index, fetch_article_details(&client, &link).await) }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        indexed.sort_by_key(|(index, _)| *index);
        indexed.into_iter().map(|(_, details)| details).collect()
    }
}

impl NewsSource for TengriScraper {
    async fn fetch_listing(&self) -> Result<Vec<ArticleRecord>, ScrapeError> {
        TengriScraper::fetch_listing(self).await
    }
}

/// Find article links on the listing page, in document order.
///
/// An anchor is kept when its href contains the link marker, it resolves to a
/// URL not already kept, and its trimmed text is non-empty. The first anchor
/// for a URL wins; an untitled anchor does not claim its URL.
pub fn discover_links(html: &str, config: &SourceConfig) -> Vec<DiscoveredLink> {
    let document = Html::parse_document(html);
    let mut seen: HashSet<String> = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&LINK_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.contains(config.link_marker.as_str()) {
            continue;
        }
        let Some(link) = resolve_link(&config.base_url, href) else {
            continue;
        };
        if seen.contains(&link) {
            continue;
        }

        let title = element_text(anchor, "");
        if title.is_empty() {
            continue;
        }

        seen.insert(link.clone());
        links.push(DiscoveredLink { title, link });
    }

    links
}

/// Absolute hrefs are kept verbatim; anything else is joined onto `base`.
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    if Url::parse(href).is_ok() {
        return Some(href.to_string());
    }
    base.join(href).ok().map(String::from)
}
