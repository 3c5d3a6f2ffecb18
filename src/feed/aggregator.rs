use std::time::Duration;

use futures::stream::{self, StreamExt};
use thiserror::Error;

use super::cancel::CancelToken;
use crate::api::{ApiError, DetailSource, IdentifierSource};
use crate::content::{ContentId, FeedEntry};
use crate::day::FeedDay;

/// Errors that abort a whole feed load.
///
/// Per-item detail failures never appear here; they are reported through
/// [`FeedLoad::dropped`] instead.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The date index could not be fetched or understood
    #[error("Failed to load feed index: {0}")]
    Resolve(#[from] ApiError),
    /// The caller cancelled the load before it finished
    #[error("Feed load cancelled")]
    Cancelled,
}

impl FeedError {
    /// True when the user may retry (anything except an explicit cancel).
    pub fn is_retryable(&self) -> bool {
        matches!(self, FeedError::Resolve(_))
    }
}

/// An identifier whose detail could not be loaded.
#[derive(Debug)]
pub struct DroppedItem {
    pub id: ContentId,
    pub error: ApiError,
}

/// Outcome of one feed load, with per-item diagnostics.
#[derive(Debug, Default)]
pub struct FeedLoad {
    /// Successfully resolved entries, in date-index order.
    pub entries: Vec<FeedEntry>,
    /// Identifiers whose detail fetch failed, in date-index order.
    pub dropped: Vec<DroppedItem>,
}

/// Builds a day's feed: resolve identifiers, fetch every detail
/// concurrently, keep the successes.
///
/// # Behavior
///
/// - One detail request per identifier, all in flight at once unless a
///   concurrency limit is set
/// - Waits for every request to finish (success, failure or timeout)
/// - A failed detail drops that identifier; the load itself still succeeds
/// - Entries keep the date-index order regardless of completion order
/// - Duplicate identifiers are fetched and returned once per occurrence
pub struct FeedAggregator<I, D> {
    identifiers: I,
    details: D,
    concurrency_limit: Option<usize>,
    detail_timeout: Option<Duration>,
}

impl<I, D> FeedAggregator<I, D>
where
    I: IdentifierSource,
    D: DetailSource,
{
    pub fn new(identifiers: I, details: D) -> Self {
        Self {
            identifiers,
            details,
            concurrency_limit: None,
            detail_timeout: None,
        }
    }

    /// Cap on simultaneous detail requests. `None` = one per identifier.
    pub fn with_concurrency_limit(mut self, limit: Option<usize>) -> Self {
        self.concurrency_limit = limit.filter(|&n| n > 0);
        self
    }

    /// Deadline applied to each detail fetch on top of the source's own.
    pub fn with_detail_timeout(mut self, timeout: Duration) -> Self {
        self.detail_timeout = Some(timeout);
        self
    }

    /// Load the feed for `day`.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Resolve`] - the date index failed; no detail is requested
    /// - [`FeedError::Cancelled`] - `cancel` fired; outstanding requests are dropped
    pub async fn load_feed(
        &self,
        day: FeedDay,
        cancel: &CancelToken,
    ) -> Result<Vec<FeedEntry>, FeedError> {
        Ok(self.load_feed_with_report(day, cancel).await?.entries)
    }

    /// Same as [`load_feed`](Self::load_feed), also reporting dropped identifiers.
    pub async fn load_feed_with_report(
        &self,
        day: FeedDay,
        cancel: &CancelToken,
    ) -> Result<FeedLoad, FeedError> {
        if cancel.is_cancelled() {
            return Err(FeedError::Cancelled);
        }

        let ids = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(FeedError::Cancelled),
            result = self.identifiers.resolve_identifiers(day) => result?,
        };

        if ids.is_empty() {
            tracing::info!(day = %day, "No content published for day");
            return Ok(FeedLoad::default());
        }

        let resolved = ids.len();
        let limit = self.concurrency_limit.unwrap_or(resolved);

        let fetches = stream::iter(ids.into_iter().enumerate())
            .map(|(index, id)| async move {
                let result = self.fetch_one(&id).await;
                (index, id, result)
            })
            .buffer_unordered(limit)
            .collect::<Vec<_>>();

        let mut outcomes = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(day = %day, pending = resolved, "Feed load cancelled, abandoning detail requests");
                return Err(FeedError::Cancelled);
            }
            outcomes = fetches => outcomes,
        };

        // Completion order is arbitrary; restore date-index order
        outcomes.sort_unstable_by_key(|(index, _, _)| *index);

        let mut load = FeedLoad::default();
        for (_, id, result) in outcomes {
            match result {
                Ok(entry) => load.entries.push(entry),
                Err(error) => {
                    tracing::warn!(id = %id, error = %error, "Dropping content with failed detail fetch");
                    load.dropped.push(DroppedItem { id, error });
                }
            }
        }

        tracing::info!(
            day = %day,
            resolved = resolved,
            loaded = load.entries.len(),
            dropped = load.dropped.len(),
            "Feed loaded"
        );

        Ok(load)
    }

    async fn fetch_one(&self, id: &str) -> Result<FeedEntry, ApiError> {
        let fetch = self.details.fetch_detail(id);
        let detail = match self.detail_timeout {
            Some(timeout) => tokio::time::timeout(timeout, fetch)
                .await
                .map_err(|_| ApiError::Timeout)??,
            None => fetch.await?,
        };
        Ok(FeedEntry::from_detail(id, &detail))
    }
}
