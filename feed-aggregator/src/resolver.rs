use crate::types::{Author, Entry, FeedDocument, AUTHOR_UNAVAILABLE};
use tracing::debug;

/// A feed whose entries all carry an author.
#[derive(Debug, Clone)]
pub struct ResolvedFeed {
    pub title: Option<String>,
    pub feed_author: String,
    pub site_url: Option<String>,
    pub entries: Vec<Entry>,
}

impl ResolvedFeed {
    /// The roster record for this feed. `source_url` is used when the feed
    /// does not declare its own site link.
    pub fn author(&self, source_url: &str) -> Author {
        let url = self.site_url.as_deref().unwrap_or(source_url);
        Author::from_feed_author(&self.feed_author, url)
    }
}

/// Fills in missing authorship at feed and entry level.
pub struct AuthorResolver;

impl AuthorResolver {
    /// Run this after the entry limit so the fallback comes from an entry
    /// that is actually kept.
    pub fn resolve(doc: FeedDocument) -> ResolvedFeed {
        let feed_author = non_blank(doc.feed_author)
            .or_else(|| {
                doc.entries
                    .first()
                    .and_then(|e| non_blank(e.author.clone()))
            })
            .unwrap_or_else(|| {
                debug!("No author found for feed, using placeholder");
                AUTHOR_UNAVAILABLE.to_string()
            });

        let entries = doc
            .entries
            .into_iter()
            .map(|mut entry| {
                let author =
                    non_blank(entry.author.take()).unwrap_or_else(|| feed_author.clone());
                entry.with_author(author)
            })
            .collect();

        ResolvedFeed {
            title: doc.title,
            feed_author,
            site_url: doc.site_url,
            entries,
        }
    }
}

/// A whitespace-only byline counts as no byline.
fn non_blank(author: Option<String>) -> Option<String> {
    author.filter(|a| !a.trim().is_empty())
}
