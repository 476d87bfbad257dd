use crate::types::{FeedDocument, FetchError, RawEntry};
use feed_rs::model::{Link, Person};
use feed_rs::parser;
use tracing::debug;

/// Turns RSS and Atom payloads into a [`FeedDocument`].
pub struct FeedParser;

impl FeedParser {
    pub fn parse_feed(url: &str, content: &[u8]) -> Result<FeedDocument, FetchError> {
        debug!("Parsing feed content from {} ({} bytes)", url, content.len());

        let feed = parser::parse(content).map_err(|e| FetchError::Parse {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        // Atom feeds often name the author once in the header instead of on
        // every entry.
        let feed_author = first_author(&feed.authors);
        let site_url = primary_link(&feed.links);
        let title = feed.title.map(|t| t.content);

        let entries: Vec<RawEntry> = feed.entries.into_iter().map(Self::parse_entry).collect();

        debug!("Parsed feed {} with {} entries", url, entries.len());

        Ok(FeedDocument {
            title,
            feed_author,
            site_url,
            entries,
        })
    }

    fn parse_entry(entry: feed_rs::model::Entry) -> RawEntry {
        let title = entry
            .title
            .map(|t| t.content)
            .unwrap_or_else(|| "Untitled".to_string());

        let url = primary_link(&entry.links).unwrap_or_default();

        // Prefer full content over summary
        let content = entry
            .content
            .and_then(|c| c.body)
            .or_else(|| entry.summary.map(|s| s.content));

        let author = first_author(&entry.authors);
        let published_at = entry.published.or(entry.updated);

        RawEntry {
            id: entry.id,
            title,
            url,
            content,
            published_at,
            author,
        }
    }

    /// Cheap sniff for RSS/Atom markers, useful before handing a body that
    /// may be an HTML error page to the parser.
    pub fn is_valid_feed_content(content: &str) -> bool {
        let content_lower = content.to_lowercase();

        content_lower.contains("<rss")
            || content_lower.contains("<feed")
            || content_lower.contains("<rdf:rdf")
            || content_lower.contains("<channel")
    }
}

fn first_author(people: &[Person]) -> Option<String> {
    people
        .iter()
        .map(|p| p.name.trim())
        .find(|name| !name.is_empty())
        .map(str::to_string)
}

fn primary_link(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|l| l.rel.as_deref().map_or(true, |rel| rel == "alternate"))
        .or_else(|| links.first())
        .map(|l| l.href.clone())
}
