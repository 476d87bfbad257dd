use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author string used when neither the feed nor its first entry names one.
pub const AUTHOR_UNAVAILABLE: &str = "Author Unavailable";

/// One feed URL configured for aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SourceSpec")]
pub struct FeedSource {
    pub url: String,
    /// Overrides the run-wide post limit for this source only.
    pub post_limit: Option<usize>,
}

impl FeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            post_limit: None,
        }
    }

    pub fn with_post_limit(mut self, post_limit: usize) -> Self {
        self.post_limit = Some(post_limit);
        self
    }
}

/// Config files may list a source as a bare URL or as a table.
#[derive(Deserialize)]
#[serde(untagged)]
enum SourceSpec {
    Url(String),
    Detailed {
        url: String,
        #[serde(default)]
        post_limit: Option<usize>,
    },
}

impl From<SourceSpec> for FeedSource {
    fn from(spec: SourceSpec) -> Self {
        match spec {
            SourceSpec::Url(url) => FeedSource::new(url),
            SourceSpec::Detailed { url, post_limit } => FeedSource { url, post_limit },
        }
    }
}

/// A parsed feed. Lives only for the duration of one aggregation run.
#[derive(Debug, Clone, Default)]
pub struct FeedDocument {
    pub title: Option<String>,
    pub feed_author: Option<String>,
    /// The feed's home page link, when it declares one.
    pub site_url: Option<String>,
    pub entries: Vec<RawEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub id: String,
    pub title: String,
    pub url: String,
    pub content: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub author: Option<String>,
}

impl RawEntry {
    pub(crate) fn with_author(self, author: String) -> Entry {
        Entry {
            id: self.id,
            title: self.title,
            url: self.url,
            content: self.content,
            published_at: self.published_at,
            author,
        }
    }
}

/// An entry whose author has been resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub url: String,
    pub content: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
    pub source_url: String,
}

impl Author {
    /// Splits a display name into a first name and the remaining words as
    /// the last name: "Jo Ann van Dyke" becomes ("Jo", "Ann van Dyke").
    pub fn from_feed_author(name: &str, source_url: impl Into<String>) -> Self {
        let mut words = name.split_whitespace();
        let first_name = words.next().unwrap_or(AUTHOR_UNAVAILABLE).to_string();
        let last_name = words.collect::<Vec<_>>().join(" ");

        Self {
            first_name,
            last_name,
            source_url: source_url.into(),
        }
    }

    pub fn display_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

/// Which fields decide that two author records are the same person.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorIdentity {
    /// `(last_name, first_name, source_url)`
    #[default]
    NameAndSource,
    /// `(last_name, first_name)`; merges namesakes across sources.
    NameOnly,
}

/// Diagnostic record for a source that could not be fetched or parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFailure {
    pub url: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregationResult {
    pub title: String,
    pub entries: Vec<Entry>,
    pub authors: Vec<Author>,
    pub failures: Vec<SourceFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    /// Per-fetch timeout; 0 means no timeout.
    pub timeout_seconds: u64,
    pub max_feed_size_mb: usize,
    pub max_redirects: usize,
    /// Maximum number of sources fetched at the same time.
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Feed-Aggregator/1.0".to_string(),
            timeout_seconds: 30,
            max_feed_size_mb: 10,
            max_redirects: 5,
            concurrency: 4,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid feed URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Feed {url} exceeds size limit: {size_mb}MB")]
    TooLarge { url: String, size_mb: usize },

    #[error("Failed to parse feed {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Fetching {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },
}

impl FetchError {
    /// The source URL this failure belongs to.
    pub fn url(&self) -> &str {
        match self {
            FetchError::InvalidUrl { url, .. }
            | FetchError::Http { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::TooLarge { url, .. }
            | FetchError::Parse { url, .. }
            | FetchError::Timeout { url, .. } => url,
        }
    }
}

impl From<&FetchError> for SourceFailure {
    fn from(error: &FetchError) -> Self {
        Self {
            url: error.url().to_string(),
            error: error.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("Configuration syntax error: {0}")]
    ConfigSyntax(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl From<toml::de::Error> for AggregatorError {
    fn from(error: toml::de::Error) -> Self {
        AggregatorError::ConfigSyntax(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
