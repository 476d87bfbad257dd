use crate::types::{Author, Entry};

/// Most recent first. `sort_by` is stable, so entries published at the same
/// instant stay in merge order. Undated entries go last.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

/// By last name, then first name; plain byte-wise string order.
pub fn sort_authors(authors: &mut [Author]) {
    authors.sort_by(|a, b| {
        (a.last_name.as_str(), a.first_name.as_str())
            .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
    });
}
