/// Popup search filter
///
/// Plain substring matching first, so the ranked order is kept for normal
/// typing; fuzzy matching only kicks in when nothing matches literally.

use crate::core::entry::Entry;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::path::{Component, Path, PathBuf};

/// A filtered entry with its fuzzy score (0 for substring hits)
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub entry: Entry,
    pub score: i64,
}

/// Filters the recent list by a typed query
pub struct Searcher {
    matcher: SkimMatcherV2,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    /// Create a new searcher instance
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }

    /// Filter `entries` by `query`
    ///
    /// An empty query returns everything. Otherwise entries whose display
    /// name, path or git branch contain the query (any case) are returned
    /// in their original order. If none do, entries are fuzzy-matched on
    /// name and path and sorted by score, best first.
    pub fn filter(&self, entries: &[Entry], query: &str) -> Vec<SearchResult> {
        let needle = query.trim().to_lowercase();

        if needle.is_empty() {
            return entries
                .iter()
                .cloned()
                .map(|entry| SearchResult { entry, score: 0 })
                .collect();
        }

        let literal: Vec<SearchResult> = entries
            .iter()
            .filter(|e| Self::contains_query(e, &needle))
            .cloned()
            .map(|entry| SearchResult { entry, score: 0 })
            .collect();

        if !literal.is_empty() {
            return literal;
        }

        let mut fuzzy: Vec<SearchResult> = entries
            .iter()
            .filter_map(|e| {
                let haystack = format!("{} {}", e.display_name, e.path.display());
                self.matcher
                    .fuzzy_match(&haystack, &needle)
                    .map(|score| SearchResult {
                        entry: e.clone(),
                        score,
                    })
            })
            .collect();

        // Stable sort keeps ranked order among equal scores
        fuzzy.sort_by(|a, b| b.score.cmp(&a.score));
        fuzzy
    }

    /// Best match for `query`, if any
    pub fn best(&self, entries: &[Entry], query: &str) -> Option<Entry> {
        self.filter(entries, query)
            .into_iter()
            .next()
            .map(|r| r.entry)
    }

    /// Resolve a typed target against the working directory
    ///
    /// See `resolve_from`.
    pub fn resolve(&self, entries: &[Entry], target: &str) -> Option<Entry> {
        match std::env::current_dir() {
            Ok(base) => self.resolve_from(entries, target, &base),
            Err(_) => self.best(entries, target),
        }
    }

    /// Resolve a target that is either a path or a search query
    ///
    /// An existing path (relative ones are taken from `base`) is made
    /// absolute, then matched against `entries` by canonical key; if it
    /// isn't listed it becomes a custom entry. Anything else is the best
    /// search match.
    pub fn resolve_from(&self, entries: &[Entry], target: &str, base: &Path) -> Option<Entry> {
        let path = normalize(&base.join(target));

        if !target.is_empty() && path.exists() {
            let probe = Entry::for_path(path);
            let key = probe.key();
            let listed = entries.iter().find(|e| e.key() == key).cloned();
            return Some(listed.unwrap_or(probe));
        }

        self.best(entries, target)
    }

    fn contains_query(entry: &Entry, needle: &str) -> bool {
        if entry.display_name.to_lowercase().contains(needle)
            || entry.path.to_string_lossy().to_lowercase().contains(needle)
        {
            return true;
        }

        // Branch lookup hits the disk, so it goes last
        entry
            .git_branch()
            .map(|branch| branch.to_lowercase().contains(needle))
            .unwrap_or(false)
    }
}

/// Drop `.` and fold `..` without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
