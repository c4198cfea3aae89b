//! Data models for scraped news articles and the HTTP response envelope.
//!
//! - [`ArticleDetails`]: metadata pulled from a single article page
//! - [`ArticleRecord`]: one discovered news item, as served to clients
//! - [`NewsResponse`]: the JSON body of the news endpoint
//!
//! Every field that may be missing from the origin page is an `Option`, and
//! serializes as `null` rather than being omitted.

use serde::{Deserialize, Serialize};

/// Metadata extracted from an article page.
///
/// A failed fetch yields `ArticleDetails::default()`, i.e. every field absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleDetails {
    /// Free-form publish date text taken from the breadcrumb.
    pub pub_date: Option<String>,
    /// The page's `<meta name="description">` content.
    pub description: Option<String>,
    /// Paragraph text of the article body, falling back to `description`.
    pub content: Option<String>,
    /// The page's `og:image` URL.
    pub image_url: Option<String>,
}

/// A single news item discovered on the listing page.
///
/// Records are built once per listing fetch and never mutated afterwards.
/// `link` is unique within one fetch's result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Anchor text of the first link pointing at the article.
    pub title: String,
    /// Absolute article URL.
    pub link: String,
    #[serde(rename = "pubDate")]
    pub pub_date: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    /// Constant tag identifying the origin site.
    pub source_id: String,
}

impl ArticleRecord {
    /// Assemble a record from a discovered link and its extracted details.
    pub fn new(title: String, link: String, details: ArticleDetails, source_id: &str) -> Self {
        Self {
            title,
            link,
            pub_date: details.pub_date,
            description: details.description,
            content: details.content,
            image_url: details.image_url,
            source_id: source_id.to_string(),
        }
    }
}

/// JSON envelope returned by `GET /news/air-pollution`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsResponse {
    pub results: Vec<ArticleRecord>,
}
