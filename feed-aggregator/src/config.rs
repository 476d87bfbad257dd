//! Run configuration.
//!
//! A run is described entirely by an [`AggregatorConfig`] handed to the
//! aggregator; it can be built in code, loaded from a TOML file, or
//! assembled from command-line source specs and a URL-list file.

use crate::types::{AggregatorError, AuthorIdentity, FeedSource, FetchConfig, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

pub const DEFAULT_TITLE: &str = "Blog Feed";
pub const DEFAULT_POST_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    pub title: String,
    /// Maximum number of entries taken from each source.
    pub post_limit: usize,
    #[serde(alias = "feed_list")]
    pub sources: Vec<FeedSource>,
    /// File with one feed URL per line, appended to `sources` on load.
    pub url_list: Option<PathBuf>,
    pub author_identity: AuthorIdentity,
    pub fetch: FetchConfig,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            post_limit: DEFAULT_POST_LIMIT,
            sources: Vec::new(),
            url_list: None,
            author_identity: AuthorIdentity::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl AggregatorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a TOML config file. A relative `url_list` path is resolved
    /// against the directory holding the config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;

        if let Some(list) = config.url_list.clone() {
            let list_path = match path.parent() {
                Some(dir) if list.is_relative() => dir.join(list),
                _ => list,
            };
            config.sources.extend(load_url_list(&list_path)?);
        }

        debug!(
            "Loaded config from {} with {} sources",
            path.display(),
            config.sources.len()
        );
        Ok(config)
    }

    /// Strips the title's outer quotes and collapses repeated source URLs,
    /// keeping the first occurrence of each.
    pub fn normalized(&self) -> Self {
        let mut seen = HashSet::new();
        let sources = self
            .sources
            .iter()
            .filter(|source| seen.insert(source.url.clone()))
            .cloned()
            .collect();

        Self {
            title: strip_outer_quotes(&self.title).to_string(),
            sources,
            ..self.clone()
        }
    }
}

/// Quoted tag arguments keep their quotes, so `'My Feed'` arrives with them.
pub fn strip_outer_quotes(title: &str) -> &str {
    title.trim_matches(|c| c == '\'' || c == '"')
}

/// Reads one URL per line. Blank lines are skipped.
pub fn load_url_list(path: &Path) -> Result<Vec<FeedSource>> {
    let content = fs::read_to_string(path)?;

    Ok(content
        .lines()
        .map(|line| line.trim_end_matches(['\r', '\n']).trim())
        .filter(|line| !line.is_empty())
        .map(FeedSource::new)
        .collect())
}

/// Parses `url:<url> count:<n>` or a bare URL.
impl FromStr for FeedSource {
    type Err = AggregatorError;

    fn from_str(spec: &str) -> Result<Self> {
        let mut url = None;
        let mut post_limit = None;

        for token in spec.split_whitespace() {
            if let Some(value) = token.strip_prefix("url:") {
                if url.replace(value.to_string()).is_some() {
                    return Err(syntax_error(spec, "url given more than once"));
                }
            } else if let Some(value) = token.strip_prefix("count:") {
                let count = value
                    .parse::<usize>()
                    .map_err(|_| syntax_error(spec, &format!("invalid count '{}'", value)))?;
                if post_limit.replace(count).is_some() {
                    return Err(syntax_error(spec, "count given more than once"));
                }
            } else if token.contains("://") && url.is_none() {
                url = Some(token.to_string());
            } else {
                return Err(syntax_error(spec, &format!("unexpected parameter '{}'", token)));
            }
        }

        match url {
            Some(url) if !url.is_empty() => Ok(FeedSource { url, post_limit }),
            _ => Err(syntax_error(spec, "missing url")),
        }
    }
}

fn syntax_error(spec: &str, reason: &str) -> AggregatorError {
    AggregatorError::ConfigSyntax(format!("{} in source spec '{}'", reason, spec))
}
