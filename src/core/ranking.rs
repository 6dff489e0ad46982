/// Merge and ranking rules for the recent list
///
/// Entries from every source are merged by canonical path, then ordered:
/// pinned first, then anything in the launch history (most recently
/// launched first), then everything else newest first.

use crate::core::entry::Entry;
use crate::settings::UserSettings;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Hard cap on the ranked list
pub const MAX_RECENT_ENTRIES: usize = 50;

/// Sort key computed once per entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankKey {
    pub pinned: bool,
    pub history_index: Option<usize>,
}

impl RankKey {
    pub fn for_entry(entry: &Entry, settings: &UserSettings) -> Self {
        Self {
            pinned: entry.is_pinned(settings),
            history_index: entry.history_index(settings),
        }
    }

    /// Compare two keys; `Less` means "shows up earlier"
    pub fn compare(&self, other: &RankKey) -> Ordering {
        other
            .pinned
            .cmp(&self.pinned)
            .then_with(|| match (self.history_index, other.history_index) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    }
}

/// Keep one entry per canonical path, the most recently accessed one
///
/// First-seen order is kept for the surviving entries; on equal
/// timestamps the first one wins.
pub fn dedup_latest(entries: Vec<Entry>) -> Vec<Entry> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<Entry> = Vec::with_capacity(entries.len());

    for entry in entries {
        match positions.get(&entry.key()) {
            Some(&idx) => {
                if entry.last_accessed > merged[idx].last_accessed {
                    merged[idx] = entry;
                }
            }
            None => {
                positions.insert(entry.key(), merged.len());
                merged.push(entry);
            }
        }
    }

    merged
}

/// Order entries by pin, history position, then recency
pub fn rank(entries: &mut [Entry], settings: &UserSettings) {
    entries.sort_by(|a, b| {
        RankKey::for_entry(a, settings)
            .compare(&RankKey::for_entry(b, settings))
            .then_with(|| b.last_accessed.cmp(&a.last_accessed))
    });
}

/// Dedup, rank and cap in one go
pub fn merge_and_rank(entries: Vec<Entry>, settings: &UserSettings, limit: usize) -> Vec<Entry> {
    let mut merged = dedup_latest(entries);
    rank(&mut merged, settings);
    merged.truncate(limit);
    merged
}
