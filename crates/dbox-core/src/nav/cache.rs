//! Folder listing cache.

use std::collections::HashMap;

use crate::remote::entry::RemoteEntry;
use crate::remote::path::normalize;

/// Previously fetched folder listings, keyed by canonical path.
///
/// A stored listing is always the complete result of the last successful
/// fetch for its path. There is no eviction; listings are small metadata
/// and the user can drop everything with [`ListingCache::clear`].
#[derive(Debug, Clone, Default)]
pub struct ListingCache {
    listings: HashMap<String, Vec<RemoteEntry>>,
}

impl ListingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached listing for `path`, if any.
    pub fn get(&self, path: &str) -> Option<&[RemoteEntry]> {
        self.listings.get(&normalize(path)).map(Vec::as_slice)
    }

    /// Stores `entries` as the listing of `path`, replacing any previous one.
    pub fn put(&mut self, path: &str, entries: Vec<RemoteEntry>) {
        self.listings.insert(normalize(path), entries);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.listings.contains_key(&normalize(path))
    }

    /// Drops every cached listing.
    pub fn clear(&mut self) {
        self.listings.clear();
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
