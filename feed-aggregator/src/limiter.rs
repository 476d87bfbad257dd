use crate::types::RawEntry;

/// Keeps the first `n` entries of a single feed, in feed order.
pub fn limit_entries(mut entries: Vec<RawEntry>, n: usize) -> Vec<RawEntry> {
    entries.truncate(n);
    entries
}
