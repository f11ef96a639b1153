//! In-memory [`RemoteStore`] for tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::entry::RemoteEntry;
use super::path::normalize;
use super::RemoteStore;
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Default)]
pub(crate) struct FakeStore {
    listings: HashMap<String, Vec<RemoteEntry>>,
    files: HashMap<String, Vec<u8>>,
    fail_list: HashSet<String>,
    fail_download: HashSet<String>,
    downloads: Mutex<Vec<String>>,
}

impl FakeStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds an (empty) folder `name` under `parent`.
    pub(crate) fn with_folder(mut self, parent: &str, name: &str) -> Self {
        let path = join(parent, name);
        self.listings
            .entry(normalize(parent))
            .or_default()
            .push(RemoteEntry::folder(name, &path));
        self.listings.entry(path).or_default();
        self
    }

    /// Adds a file `name` under `parent` holding `content`.
    pub(crate) fn with_file(mut self, parent: &str, name: &str, content: &[u8]) -> Self {
        let path = join(parent, name);
        self.listings
            .entry(normalize(parent))
            .or_default()
            .push(RemoteEntry::file(name, &path, content.len() as u64, None));
        self.files.insert(path, content.to_vec());
        self
    }

    pub(crate) fn failing_list(mut self, path: &str) -> Self {
        self.fail_list.insert(normalize(path));
        self
    }

    pub(crate) fn failing_download(mut self, path: &str) -> Self {
        self.fail_download.insert(normalize(path));
        self
    }

    /// Entries listed under `path`, in insertion order.
    pub(crate) fn entries(&self, path: &str) -> Vec<RemoteEntry> {
        self.listings.get(&normalize(path)).cloned().unwrap_or_default()
    }

    /// Paths passed to [`RemoteStore::download`] so far.
    pub(crate) fn download_calls(&self) -> Vec<String> {
        self.downloads.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

fn join(parent: &str, name: &str) -> String {
    normalize(&format!("{}/{}", normalize(parent), name))
}

#[async_trait]
impl RemoteStore for FakeStore {
    async fn list(&self, path: &str) -> CoreResult<Vec<RemoteEntry>> {
        let key = normalize(path);
        if self.fail_list.contains(&key) {
            return Err(CoreError::Remote(format!("listing {key} refused")));
        }
        self.listings
            .get(&key)
            .cloned()
            .ok_or_else(|| CoreError::Remote(format!("path/not_found: {key}")))
    }

    async fn download(&self, path: &str) -> CoreResult<Vec<u8>> {
        let key = normalize(path);
        if let Ok(mut calls) = self.downloads.lock() {
            calls.push(key.clone());
        }
        if self.fail_download.contains(&key) {
            return Err(CoreError::Remote(format!("download {key} refused")));
        }
        self.files
            .get(&key)
            .cloned()
            .ok_or_else(|| CoreError::Remote(format!("path/not_found: {key}")))
    }
}
