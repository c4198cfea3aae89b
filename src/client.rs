//! Outbound HTTP for the scrapers.
//!
//! The origin site rejects default client identifiers, so every request goes
//! through one shared [`Client`] carrying a desktop browser `User-Agent` and a
//! per-request timeout.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::ScrapeError;

/// Browser-like identifier sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0 Safari/537.36";

/// Default bound on a single page fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the shared HTTP client.
pub fn build_client(timeout: Duration) -> Result<Client, ScrapeError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(ScrapeError::Client)
}

/// Fetch a page and return its body as text.
///
/// # Errors
///
/// - [`ScrapeError::Http`] on transport failure or timeout
/// - [`ScrapeError::Status`] when the server answers with a non-success status
#[instrument(level = "debug", skip(client))]
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.text().await?;
    debug!(bytes = body.len(), "Fetched page");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_page_sends_browser_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/page")
            .match_header("user-agent", USER_AGENT)
            .with_status(200)
            .with_body("<html>ok</html>")
            .create_async()
            .await;

        let client = build_client(DEFAULT_FETCH_TIMEOUT).unwrap();
        let body = fetch_page(&client, &format!("{}/page", server.url()))
            .await
            .unwrap();

        assert_eq!(body, "<html>ok</html>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = build_client(DEFAULT_FETCH_TIMEOUT).unwrap();
        let err = fetch_page(&client, &format!("{}/missing", server.url()))
            .await
            .unwrap_err();

        match err {
            ScrapeError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_transport_error() {
        let client = build_client(Duration::from_secs(1)).unwrap();
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let err = fetch_page(&client, "http://127.0.0.1:9/").await.unwrap_err();
        assert!(matches!(err, ScrapeError::Http(_)));
    }
}
