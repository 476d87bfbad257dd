use crate::parser::FeedParser;
use crate::traits::FeedFetcher;
use crate::types::{FeedDocument, FetchConfig, FetchError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

/// Fetches feeds over HTTP(S).
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
        }

        let client = builder
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    fn max_feed_bytes(&self) -> usize {
        self.config.max_feed_size_mb * 1024 * 1024
    }

    async fn fetch_body(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let http_error = |source| FetchError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(parsed).send().await.map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let too_large = |bytes: usize| FetchError::TooLarge {
            url: url.to_string(),
            size_mb: bytes / (1024 * 1024),
        };

        if let Some(content_length) = response.content_length() {
            if content_length as usize > self.max_feed_bytes() {
                return Err(too_large(content_length as usize));
            }
        }

        let body = response.bytes().await.map_err(http_error)?;

        // Chunked responses carry no length header.
        if body.len() > self.max_feed_bytes() {
            return Err(too_large(body.len()));
        }

        Ok(body.to_vec())
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<FeedDocument, FetchError> {
        let start_time = Instant::now();
        debug!("Fetching feed: {}", url);

        let body = self.fetch_body(url).await?;

        if !FeedParser::is_valid_feed_content(&String::from_utf8_lossy(&body)) {
            return Err(FetchError::Parse {
                url: url.to_string(),
                message: "response is not an RSS or Atom document".to_string(),
            });
        }

        let document = FeedParser::parse_feed(url, &body)?;

        info!(
            "Fetched feed {} ({} bytes, {} entries) in {}ms",
            url,
            body.len(),
            document.entries.len(),
            start_time.elapsed().as_millis()
        );

        Ok(document)
    }
}

/// Serves canned documents from memory, keyed by URL.
///
/// Unknown URLs fail with a 404 status error, the same way an HTTP fetch
/// against a missing feed would.
#[derive(Default)]
pub struct StaticFetcher {
    feeds: HashMap<String, StaticResponse>,
    delays: HashMap<String, Duration>,
}

enum StaticResponse {
    Document(FeedDocument),
    Body(String),
    Status(u16),
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: &str, document: FeedDocument) -> Self {
        self.feeds.insert(url.to_string(), StaticResponse::Document(document));
        self
    }

    /// Registers a raw RSS/Atom body that is parsed on every fetch.
    pub fn with_body(mut self, url: &str, body: impl Into<String>) -> Self {
        self.feeds.insert(url.to_string(), StaticResponse::Body(body.into()));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.feeds.insert(url.to_string(), StaticResponse::Status(status));
        self
    }

    /// Delays the response for `url`, to simulate a slow source.
    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }
}

#[async_trait]
impl FeedFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<FeedDocument, FetchError> {
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }

        match self.feeds.get(url) {
            Some(StaticResponse::Document(document)) => Ok(document.clone()),
            Some(StaticResponse::Body(body)) => FeedParser::parse_feed(url, body.as_bytes()),
            Some(StaticResponse::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
