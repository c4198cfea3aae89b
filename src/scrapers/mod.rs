//! News source scrapers.
//!
//! Scraping runs in two stages:
//!
//! 1. **Listing**: fetch a tag page and discover article links
//! 2. **Details**: fetch each article page and extract its metadata
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Tengri News | [`tengri`] | HTML scraping | "загрязнение" tag page, `/kazakhstan_news/` links |
//!
//! Article detail extraction lives in [`article`] and is shared by sources.
//! A failed article fetch never fails the listing; a failed listing fetch
//! always does.

use std::future::Future;

use crate::error::ScrapeError;
use crate::models::ArticleRecord;

pub mod article;
pub mod tengri;

/// A source that can produce a fresh, ordered set of articles.
///
/// This is the seam the cache depends on, so it can be driven by a fake
/// source in tests.
pub trait NewsSource {
    /// Fetch the listing and every linked article.
    fn fetch_listing(
        &self,
    ) -> impl Future<Output = Result<Vec<ArticleRecord>, ScrapeError>> + Send;
}
