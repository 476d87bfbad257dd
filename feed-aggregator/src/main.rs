use anyhow::Context;
use clap::Parser;
use feed_aggregator::config::load_url_list;
use feed_aggregator::{AggregatorConfig, AuthorIdentity, FeedAggregator, FeedSource, HttpFetcher};
use std::path::PathBuf;
use tracing::{info, warn};

/// Merge several RSS/Atom feeds into one timeline and print it as JSON.
#[derive(Parser, Debug)]
#[command(name = "feed-aggregator", version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File with one feed URL per line
    #[arg(short = 'l', long)]
    url_list: Option<PathBuf>,

    /// Feed source, either a URL or `url:<url> count:<n>` (repeatable)
    #[arg(short, long = "source")]
    sources: Vec<FeedSource>,

    #[arg(short, long)]
    title: Option<String>,

    /// Maximum entries taken from each feed
    #[arg(short, long)]
    post_limit: Option<usize>,

    /// Maximum feeds fetched at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// Per-feed timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Treat authors with the same name as one person across feeds
    #[arg(long)]
    name_only_authors: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the JSON result
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AggregatorConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AggregatorConfig::default(),
    };

    if let Some(path) = &cli.url_list {
        let sources = load_url_list(path)
            .with_context(|| format!("reading URL list from {}", path.display()))?;
        config.sources.extend(sources);
    }
    config.sources.extend(cli.sources);

    if let Some(title) = cli.title {
        config.title = title;
    }
    if let Some(post_limit) = cli.post_limit {
        config.post_limit = post_limit;
    }
    if let Some(concurrency) = cli.concurrency {
        config.fetch.concurrency = concurrency;
    }
    if let Some(timeout) = cli.timeout {
        config.fetch.timeout_seconds = timeout;
    }
    if cli.name_only_authors {
        config.author_identity = AuthorIdentity::NameOnly;
    }

    if config.sources.is_empty() {
        warn!("No feed sources configured");
    }

    let fetcher = HttpFetcher::new(config.fetch.clone()).context("building HTTP client")?;
    let aggregator = FeedAggregator::new(fetcher);
    let result = aggregator.aggregate(&config).await;

    for failure in &result.failures {
        warn!("Feed unavailable: {} ({})", failure.url, failure.error);
    }
    info!(
        "Finished with {} entries and {} authors",
        result.entries.len(),
        result.authors.len()
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
