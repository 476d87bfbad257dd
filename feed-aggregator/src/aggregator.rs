use crate::config::AggregatorConfig;
use crate::dedupe::Deduplicator;
use crate::limiter::limit_entries;
use crate::resolver::AuthorResolver;
use crate::sort::{sort_authors, sort_entries};
use crate::traits::FeedFetcher;
use crate::types::{AggregationResult, FeedDocument, FeedSource, FetchError, SourceFailure};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Builds one deduplicated, date-ordered timeline out of many feeds.
pub struct FeedAggregator<F> {
    fetcher: F,
}

impl<F: FeedFetcher> FeedAggregator<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Runs one fetch-merge pass over the configured sources.
    ///
    /// A source that fails is logged, recorded in
    /// [`AggregationResult::failures`] and otherwise ignored; the remaining
    /// sources still make up a consistent result.
    pub async fn aggregate(&self, config: &AggregatorConfig) -> AggregationResult {
        let config = config.normalized();
        let total_sources = config.sources.len();
        let timeout_seconds = config.fetch.timeout_seconds;

        info!("Aggregating {} feeds for '{}'", total_sources, config.title);

        // `buffered` yields in input order, so the merge below sees sources in
        // list order no matter which fetch finishes first.
        let outcomes: Vec<(&FeedSource, Result<FeedDocument, FetchError>)> =
            stream::iter(config.sources.iter())
                .map(|source| async move {
                    let outcome = self.fetch_source(&source.url, timeout_seconds).await;
                    (source, outcome)
                })
                .buffered(config.fetch.concurrency.max(1))
                .collect()
                .await;

        let mut entries = Vec::new();
        let mut authors = Vec::new();
        let mut failures = Vec::new();

        for (source, outcome) in outcomes {
            let mut document = match outcome {
                Ok(document) => document,
                Err(e) => {
                    warn!("Failed to acquire feed {}: {}", source.url, e);
                    failures.push(SourceFailure::from(&e));
                    continue;
                }
            };

            let post_limit = source.post_limit.unwrap_or(config.post_limit);
            document.entries = limit_entries(document.entries, post_limit);

            if document.entries.is_empty() {
                debug!("Skipping feed {}: no entries within limit", source.url);
                continue;
            }

            let resolved = AuthorResolver::resolve(document);
            debug!(
                "Feed {}: {} entries by {}",
                source.url,
                resolved.entries.len(),
                resolved.feed_author
            );

            authors.push(resolved.author(&source.url));
            entries.extend(resolved.entries);
        }

        let deduplicator = Deduplicator::new(config.author_identity);
        let mut entries = deduplicator.dedupe_entries(&entries);
        let mut authors = deduplicator.dedupe_authors(&authors);

        sort_entries(&mut entries);
        sort_authors(&mut authors);

        info!(
            "Aggregated {} entries from {} authors ({}/{} feeds failed)",
            entries.len(),
            authors.len(),
            failures.len(),
            total_sources
        );

        AggregationResult {
            title: config.title.clone(),
            entries,
            authors,
            failures,
        }
    }

    /// A `timeout_seconds` of 0 disables the per-fetch timeout.
    async fn fetch_source(
        &self,
        url: &str,
        timeout_seconds: u64,
    ) -> Result<FeedDocument, FetchError> {
        if timeout_seconds == 0 {
            return self.fetcher.fetch(url).await;
        }

        let timeout = Duration::from_secs(timeout_seconds);

        match tokio::time::timeout(timeout, self.fetcher.fetch(url)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
                seconds: timeout_seconds,
            }),
        }
    }
}
