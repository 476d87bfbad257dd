use crate::types::{FeedDocument, FetchError};
use async_trait::async_trait;

/// Retrieves and parses a single feed source.
///
/// Failures are returned, never raised: one source going wrong must not
/// affect what the other sources contribute to a run.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FeedDocument, FetchError>;
}
