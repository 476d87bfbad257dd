pub mod types;
pub mod traits;
pub mod config;
pub mod parser;
pub mod fetcher;
pub mod resolver;
pub mod limiter;
pub mod dedupe;
pub mod sort;
pub mod aggregator;

pub use types::*;
pub use traits::FeedFetcher;
pub use config::AggregatorConfig;
pub use parser::FeedParser;
pub use fetcher::{HttpFetcher, StaticFetcher};
pub use resolver::{AuthorResolver, ResolvedFeed};
pub use dedupe::Deduplicator;
pub use aggregator::FeedAggregator;
