//! Error types for the scraping pipeline and the HTTP boundary.

use std::error::Error;
use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failures raised while fetching pages from the origin site.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request failed")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Errors surfaced by the news endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Shared with every reader that waited on the same refresh.
    #[error("Failed to fetch news listing")]
    Scrape(#[from] Arc<ScrapeError>),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("{}: {:?}", self, self.source());

        let status = match self {
            ApiError::Scrape(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(json!({"message": self.to_string()}));

        (status, payload).into_response()
    }
}
