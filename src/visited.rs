//! Run-scoped tracking of already-resolved import URLs.

use std::collections::HashSet;

/// Absolute URLs already resolved within one top-level run.
///
/// A URL is inserted as soon as it is computed, before the fetch, so a cycle
/// reachable through any path is cut off. There is no removal: the same URL
/// imported again anywhere in the run is dropped, which also collapses
/// diamond imports to their first occurrence.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn insert(&mut self, url: &str) {
        self.urls.insert(url.to_string());
    }
}
