use async_trait::async_trait;

use super::error::ApiError;
use crate::content::{ContentDetail, ContentId};
use crate::day::FeedDay;

/// Resolves the content identifiers published on a given day.
#[async_trait]
pub trait IdentifierSource: Send + Sync {
    async fn resolve_identifiers(&self, day: FeedDay) -> Result<Vec<ContentId>, ApiError>;
}

/// Fetches the full detail document for one content identifier.
#[async_trait]
pub trait DetailSource: Send + Sync {
    async fn fetch_detail(&self, id: &str) -> Result<ContentDetail, ApiError>;
}
