//! Article detail extraction.
//!
//! Given an article URL, fetch the page and derive the publish date,
//! description, body text and representative image. Extraction never fails
//! outward: a transport error or non-success status yields an
//! [`ArticleDetails`] with every field absent, and a missing element simply
//! leaves its field empty.
//!
//! # Fallback chains
//!
//! | Field | Source | Fallback |
//! |-------|--------|----------|
//! | `pub_date` | first breadcrumb item mentioning a year | none |
//! | `description` | `<meta name="description">` | none |
//! | `content` | paragraphs of the first known body container | every `<p>` in the page, then `description` |
//! | `image_url` | `<meta property="og:image">` | none |

use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, instrument, warn};

use crate::client::fetch_page;
use crate::models::ArticleDetails;
use crate::utils::{element_text, truncate_for_log};

/// Body container classes, tried in order.
pub const CONTENT_CONTAINERS: [&str; 3] = ["tn-news-text", "tn-article-text", "tn-article-body"];

/// Substrings that mark breadcrumb text as a publish date.
///
/// This is a heuristic, not a date parser: any text containing one of these
/// is taken verbatim. Swap [`looks_like_publish_date`] to change the rule.
pub const YEAR_MARKERS: [&str; 3] = ["202", "2025", "2024"];

static ORDERED_LIST: Lazy<Selector> = Lazy::new(|| Selector::parse("ol").unwrap());
static NAV: Lazy<Selector> = Lazy::new(|| Selector::parse("nav").unwrap());
static BREADCRUMB_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("li, span").unwrap());
static META_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());
static META_OG_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:image"]"#).unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static CONTAINERS: Lazy<Vec<Selector>> = Lazy::new(|| {
    CONTENT_CONTAINERS
        .iter()
        .map(|class| Selector::parse(&format!("div.{class}")).unwrap())
        .collect()
});

/// Fetch an article page and extract its details.
///
/// Any fetch failure is logged and absorbed into `ArticleDetails::default()`.
#[instrument(level = "info", skip(client))]
pub async fn fetch_article_details(client: &Client, url: &str) -> ArticleDetails {
    match fetch_page(client, url).await {
        Ok(body) => {
            let details = extract_details(&body);
            debug!(
                has_date = details.pub_date.is_some(),
                has_description = details.description.is_some(),
                has_image = details.image_url.is_some(),
                content_preview = %truncate_for_log(details.content.as_deref().unwrap_or(""), 80),
                "Parsed article"
            );
            details
        }
        Err(e) => {
            warn!(error = %e, "Article fetch failed; returning empty details");
            ArticleDetails::default()
        }
    }
}

/// Extract details from an article page's markup.
pub fn extract_details(html: &str) -> ArticleDetails {
    let document = Html::parse_document(html);

    let pub_date = find_publish_date(&document);
    let description = meta_content(&document, &META_DESCRIPTION);
    let content = extract_content(&document)
        .filter(|text| !text.is_empty())
        .or_else(|| description.clone());
    let image_url = meta_content(&document, &META_OG_IMAGE);

    ArticleDetails {
        pub_date,
        description,
        content,
        image_url,
    }
}

/// Find the publish date in the page's breadcrumb.
///
/// The breadcrumb is the first `<ol>` in the document, or the first `<nav>`
/// if there is none. Its `<li>`/`<span>` descendants are scanned in document
/// order and the first whose text passes [`looks_like_publish_date`] wins.
pub fn find_publish_date(document: &Html) -> Option<String> {
    let breadcrumb = document
        .select(&ORDERED_LIST)
        .next()
        .or_else(|| document.select(&NAV).next())?;

    breadcrumb
        .select(&BREADCRUMB_ITEM)
        .map(|item| element_text(item, " "))
        .find(|text| looks_like_publish_date(text))
}

/// Year-substring check used to spot a date in breadcrumb text.
pub fn looks_like_publish_date(text: &str) -> bool {
    YEAR_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Read the `content` attribute of the first element matching `selector`.
///
/// An empty attribute counts as absent; later matches are not consulted.
fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()?
        .value()
        .attr("content")
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Paragraph text of the article body.
///
/// Returns `Some("")` when a known container exists but holds no text, and
/// `None` only when neither a container nor any paragraph exists.
fn extract_content(document: &Html) -> Option<String> {
    if let Some(container) = CONTAINERS
        .iter()
        .find_map(|selector| document.select(selector).next())
    {
        return Some(join_paragraphs(container.select(&PARAGRAPH)));
    }

    let mut paragraphs = document.select(&PARAGRAPH).peekable();
    paragraphs.peek()?;
    Some(join_paragraphs(paragraphs))
}

fn join_paragraphs<'a>(paragraphs: impl Iterator<Item = scraper::ElementRef<'a>>) -> String {
    paragraphs
        .map(|p| element_text(p, " "))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
