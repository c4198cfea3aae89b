//! Time-bounded cache in front of a [`NewsSource`].
//!
//! The cache has three states:
//!
//! - **Empty**: nothing fetched yet; any read refreshes
//! - **Valid**: `now < expires_at`; reads return the stored articles
//! - **Expired**: `now >= expires_at`; the next read refreshes
//!
//! The expiry check and the refresh run under one lock, so concurrent readers
//! that find the cache empty or expired wait for a single refresh instead of
//! each hitting the origin. Readers that queued behind a refresh receive its
//! outcome, including its error. A failed refresh leaves the entry untouched;
//! expired data is not served as a fallback.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::error::ScrapeError;
use crate::models::ArticleRecord;
use crate::scrapers::NewsSource;

/// How long a successful fetch is served before the next read refreshes it.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// Longest accepted TTL; larger values are clamped.
pub const MAX_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// [`MAX_TTL`] in whole minutes.
pub const MAX_TTL_MINUTES: u64 = MAX_TTL.as_secs() / 60;

#[derive(Debug)]
struct CacheEntry {
    articles: Arc<Vec<ArticleRecord>>,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct CacheState {
    entry: Option<CacheEntry>,
    /// Error of the most recent refresh, cleared by the next success.
    last_failure: Option<Arc<ScrapeError>>,
}

/// Caches the most recent successful fetch of a [`NewsSource`].
#[derive(Debug)]
pub struct NewsCache<S> {
    source: S,
    ttl: Duration,
    /// Completed refresh attempts, successful or not.
    attempts: AtomicU64,
    state: Mutex<CacheState>,
}

impl<S: NewsSource> NewsCache<S> {
    /// Create an empty cache. `ttl` is clamped to [`MAX_TTL`].
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl: ttl.min(MAX_TTL),
            attempts: AtomicU64::new(0),
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Return the cached articles, refreshing them first if empty or expired.
    ///
    /// # Errors
    ///
    /// Returns the source's error when a refresh fails, both to the reader
    /// that ran it and to readers that were waiting on it.
    #[instrument(level = "debug", skip(self))]
    pub async fn get(&self) -> Result<Arc<Vec<ArticleRecord>>, Arc<ScrapeError>> {
        let seen = self.attempts.load(Ordering::Acquire);
        let mut state = self.state.lock().await;

        if let Some(cached) = state.entry.as_ref() {
            if Instant::now() < cached.expires_at {
                debug!(count = cached.articles.len(), "Serving cached articles");
                return Ok(Arc::clone(&cached.articles));
            }
        }

        if self.attempts.load(Ordering::Acquire) != seen {
            if let Some(err) = state.last_failure.as_ref() {
                debug!(error = %err, "Refresh we waited on failed");
                return Err(Arc::clone(err));
            }
        }

        if state.entry.is_some() {
            info!("Cache expired; refreshing");
        } else {
            info!("Cache empty; fetching");
        }

        let started = Instant::now();
        let result = self.source.fetch_listing().await;
        self.attempts.fetch_add(1, Ordering::Release);

        match result {
            Ok(articles) => {
                let articles = Arc::new(articles);
                state.entry = Some(CacheEntry {
                    articles: Arc::clone(&articles),
                    expires_at: started + self.ttl,
                });
                state.last_failure = None;
                info!(count = articles.len(), ttl_secs = self.ttl.as_secs(), "Cache refreshed");
                Ok(articles)
            }
            Err(e) => {
                warn!(error = %e, "Refresh failed; cache left unchanged");
                let err = Arc::new(e);
                state.last_failure = Some(Arc::clone(&err));
                Err(err)
            }
        }
    }
}
