use async_trait::async_trait;

use super::shapes::decode_identifiers;
use crate::api::{ApiClient, ApiError, IdentifierSource};
use crate::content::ContentId;
use crate::day::FeedDay;

/// Resolves `GET {base}/api/contents/date/{YYYY-MM-DD}` into identifiers.
///
/// One attempt, no retries. Transport failures, timeouts and non-2xx
/// statuses surface as network-class [`ApiError`]s; a body that matches no
/// known shape surfaces as [`ApiError::Parse`]. Identifier order is the
/// server's.
#[async_trait]
impl IdentifierSource for ApiClient {
    async fn resolve_identifiers(&self, day: FeedDay) -> Result<Vec<ContentId>, ApiError> {
        let segment = day.as_path_segment();
        let url = self.endpoint(&["api", "contents", "date", &segment]);

        let body = self.get_bytes(url).await.inspect_err(|e| {
            tracing::warn!(day = %segment, error = %e, "Date index request failed");
        })?;

        let ids = decode_identifiers(&body).inspect_err(|e| {
            tracing::warn!(day = %segment, bytes = body.len(), error = %e, "Date index body not understood");
        })?;

        tracing::debug!(day = %segment, count = ids.len(), "Resolved identifiers");
        Ok(ids)
    }
}
