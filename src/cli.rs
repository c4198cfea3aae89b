//! Command-line interface definitions for the Tengri news service.
//!
//! Every option has a default, so the service runs with no arguments against
//! the live site.

use clap::Parser;
use url::Url;

use crate::api::DEFAULT_LIMIT;
use crate::cache::{DEFAULT_TTL, MAX_TTL_MINUTES};
use crate::client::DEFAULT_FETCH_TIMEOUT;
use crate::scrapers::tengri::{
    DEFAULT_CONCURRENCY, SourceConfig, TENGRI_BASE_URL, TENGRI_LINK_MARKER, TENGRI_SOURCE_ID,
    TENGRI_TAG_URL,
};

/// Command-line arguments for the news service.
///
/// # Examples
///
/// ```sh
/// # Serve on the default address
/// tengri_news
///
/// # Listen publicly, fetch eight articles at a time
/// tengri_news --host 0.0.0.0 --port 8080 --concurrency 8
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,

    /// Tag page listing the articles to scrape
    #[arg(long, default_value = TENGRI_TAG_URL)]
    pub listing_url: Url,

    /// Origin relative article links are resolved against
    #[arg(long, default_value = TENGRI_BASE_URL)]
    pub base_url: Url,

    /// Path segment that identifies article links
    #[arg(long, default_value = TENGRI_LINK_MARKER)]
    pub link_marker: String,

    /// Identifier stamped into every article's `source_id`
    #[arg(long, default_value = TENGRI_SOURCE_ID)]
    pub source_id: String,

    /// Seconds before a single page fetch times out
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs())]
    pub fetch_timeout_secs: u64,

    /// Minutes a successful scrape is served before refreshing (at most a week)
    #[arg(
        long,
        default_value_t = DEFAULT_TTL.as_secs() / 60,
        value_parser = clap::value_parser!(u64).range(1..=MAX_TTL_MINUTES)
    )]
    pub cache_ttl_minutes: u64,

    /// Number of article pages fetched at once
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Result count when a request omits `limit`
    #[arg(long, default_value_t = DEFAULT_LIMIT, allow_negative_numbers = true)]
    pub default_limit: i64,
}

impl Cli {
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            listing_url: self.listing_url.clone(),
            base_url: self.base_url.clone(),
            link_marker: self.link_marker.clone(),
            source_id: self.source_id.clone(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["tengri_news"]);

        assert_eq!(cli.bind_addr(), "127.0.0.1:8000");
        assert_eq!(cli.fetch_timeout_secs, 10);
        assert_eq!(cli.cache_ttl_minutes, 30);
        assert_eq!(cli.default_limit, 20);

        let config = cli.source_config();
        assert_eq!(config.listing_url.as_str(), TENGRI_TAG_URL);
        assert_eq!(config.base_url.host_str(), Some("tengrinews.kz"));
        assert_eq!(config.link_marker, "/kazakhstan_news/");
        assert_eq!(config.source_id, "tengrinews");
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "tengri_news",
            "-p",
            "9000",
            "--listing-url",
            "http://localhost:3000/tag/smog/",
            "--concurrency",
            "8",
        ]);

        assert_eq!(cli.port, 9000);
        assert_eq!(cli.concurrency, 8);
        assert_eq!(cli.source_config().listing_url.path(), "/tag/smog/");
    }

    #[test]
    fn test_cli_ttl_range() {
        let week = MAX_TTL_MINUTES.to_string();
        let cli = Cli::parse_from(["tengri_news", "--cache-ttl-minutes", week.as_str()]);
        assert_eq!(cli.cache_ttl_minutes, 10_080);

        for bad in ["0", "99999999999", "18446744073709551615"] {
            let result = Cli::try_parse_from(["tengri_news", "--cache-ttl-minutes", bad]);
            assert!(result.is_err(), "accepted --cache-ttl-minutes {bad}");
        }
    }

    #[test]
    fn test_cli_rejects_invalid_url() {
        let result = Cli::try_parse_from(["tengri_news", "--base-url", "not a url"]);
        assert!(result.is_err());
    }
}
