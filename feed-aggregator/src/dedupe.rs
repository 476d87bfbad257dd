use crate::types::{Author, AuthorIdentity, Entry};
use std::collections::HashSet;
use tracing::debug;

/// Drops repeated entries and authors, keeping the first occurrence.
pub struct Deduplicator {
    identity: AuthorIdentity,
}

impl Deduplicator {
    pub fn new(identity: AuthorIdentity) -> Self {
        Self { identity }
    }

    /// Entries are the same post when their feed-supplied ids match, e.g. a
    /// post cross-posted to two feeds under the same id.
    pub fn dedupe_entries(&self, entries: &[Entry]) -> Vec<Entry> {
        let mut seen_ids = HashSet::new();
        let unique_entries: Vec<Entry> = entries
            .iter()
            .filter(|entry| seen_ids.insert(entry.id.clone()))
            .cloned()
            .collect();

        let removed_count = entries.len() - unique_entries.len();
        if removed_count > 0 {
            debug!("Removed {} duplicate entries", removed_count);
        }

        unique_entries
    }

    pub fn dedupe_authors(&self, authors: &[Author]) -> Vec<Author> {
        let mut seen = HashSet::new();
        let unique_authors: Vec<Author> = authors
            .iter()
            .filter(|author| seen.insert(self.identity_key(author)))
            .cloned()
            .collect();

        let removed_count = authors.len() - unique_authors.len();
        if removed_count > 0 {
            debug!("Removed {} duplicate authors", removed_count);
        }

        unique_authors
    }

    fn identity_key(&self, author: &Author) -> (String, String, Option<String>) {
        let source = match self.identity {
            AuthorIdentity::NameAndSource => Some(author.source_url.clone()),
            AuthorIdentity::NameOnly => None,
        };
        (author.last_name.clone(), author.first_name.clone(), source)
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(AuthorIdentity::default())
    }
}
