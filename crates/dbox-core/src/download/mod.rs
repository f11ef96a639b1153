//! Batch download of a selection into a local mirror directory.
//!
//! A batch runs in two steps: [`expand::expand_selection`] turns the
//! selection into every file and folder beneath it, then
//! [`materialize::materialize`] mirrors each one under the download root.
//! Failures are collected per item; a batch always runs to completion and
//! yields one [`DownloadReport`].

pub mod expand;
pub mod materialize;

use std::path::Path;

use crate::remote::entry::RemoteEntry;
use crate::remote::RemoteStore;
use expand::expand_selection;
use materialize::{materialize, Outcome};

/// Aggregated outcome of one batch.
///
/// `downloaded` and `skipped` hold entry names in processing order;
/// `errors` holds one message per failed item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub downloaded: Vec<String>,
    pub skipped: Vec<String>,
    pub errors: Vec<String>,
}

impl DownloadReport {
    /// One-line summary shown to the user when the batch ends.
    pub fn summary(&self) -> String {
        let mut msg = format!(
            "Download complete. Downloaded: {}, Skipped: {}, Errors: {}",
            self.downloaded.len(),
            self.skipped.len(),
            self.errors.len()
        );
        if !self.errors.is_empty() {
            msg.push_str(" - Errors: ");
            msg.push_str(&self.errors.join(", "));
        }
        msg
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Folder => {}
            Outcome::Downloaded(name) => self.downloaded.push(name),
            Outcome::Skipped(name) => self.skipped.push(name),
            Outcome::Failed(msg) => self.errors.push(msg),
        }
    }
}

/// Downloads `selection` (files and whole folders) under `local_root`.
pub async fn download_selection<S>(
    store: &S,
    selection: &[RemoteEntry],
    local_root: &Path,
) -> DownloadReport
where
    S: RemoteStore + ?Sized,
{
    let expansion = expand_selection(store, selection).await;
    let mut report = DownloadReport {
        errors: expansion.errors,
        ..DownloadReport::default()
    };

    for entry in &expansion.items {
        let outcome = materialize(store, entry, local_root).await;
        if let Outcome::Failed(msg) = &outcome {
            tracing::warn!(path = entry.path(), "{msg}");
        }
        report.record(outcome);
    }

    tracing::info!(
        downloaded = report.downloaded.len(),
        skipped = report.skipped.len(),
        errors = report.errors.len(),
        "batch finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::fake::FakeStore;
    use std::fs;
    use tempfile::TempDir;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    fn tree() -> FakeStore {
        FakeStore::new()
            .with_folder("", "Photos")
            .with_file("/photos", "a.jpg", b"aaa")
            .with_folder("/photos", "2024")
            .with_file("/photos/2024", "b.jpg", b"bbb")
            .with_folder("/photos", "empty")
            .with_file("", "notes.txt", b"notes")
    }

    #[test]
    fn summary_without_errors() {
        let report = DownloadReport {
            downloaded: names(&["a.jpg", "b.jpg", "notes.txt"]),
            skipped: names(&["old.txt"]),
            errors: vec![],
        };
        assert_eq!(
            report.summary(),
            "Download complete. Downloaded: 3, Skipped: 1, Errors: 0"
        );
    }

    #[test]
    fn summary_lists_errors() {
        let report = DownloadReport {
            downloaded: vec![],
            skipped: vec![],
            errors: vec!["e1".to_string(), "e2".to_string()],
        };
        assert_eq!(
            report.summary(),
            "Download complete. Downloaded: 0, Skipped: 0, Errors: 2 - Errors: e1, e2"
        );
    }

    #[tokio::test]
    async fn whole_tree_materializes_including_empty_folders() {
        let tmp = TempDir::new().unwrap();
        let store = tree();
        let selection = store.entries("");

        let report = download_selection(&store, &selection, tmp.path()).await;

        assert_eq!(report.downloaded, names(&["a.jpg", "b.jpg", "notes.txt"]));
        assert!(report.skipped.is_empty());
        assert!(report.errors.is_empty());
        assert_eq!(fs::read(tmp.path().join("photos/a.jpg")).unwrap(), b"aaa");
        assert_eq!(fs::read(tmp.path().join("photos/2024/b.jpg")).unwrap(), b"bbb");
        assert_eq!(fs::read(tmp.path().join("notes.txt")).unwrap(), b"notes");
        assert!(tmp.path().join("photos/empty").is_dir());
    }

    #[tokio::test]
    async fn second_run_skips_everything() {
        let tmp = TempDir::new().unwrap();
        let store = tree();
        let selection = store.entries("");

        download_selection(&store, &selection, tmp.path()).await;
        let calls_after_first = store.download_calls().len();
        let report = download_selection(&store, &selection, tmp.path()).await;

        assert!(report.downloaded.is_empty());
        assert_eq!(report.skipped, names(&["a.jpg", "b.jpg", "notes.txt"]));
        assert!(report.errors.is_empty());
        assert_eq!(store.download_calls().len(), calls_after_first);
    }

    #[tokio::test]
    async fn existing_file_keeps_local_content() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.txt"), b"mine").unwrap();
        let store = tree();
        let notes = store.entries("")[1].clone();

        let report = download_selection(&store, &[notes], tmp.path()).await;

        assert_eq!(report.skipped, names(&["notes.txt"]));
        assert!(report.downloaded.is_empty());
        assert_eq!(fs::read(tmp.path().join("notes.txt")).unwrap(), b"mine");
        assert!(store.download_calls().is_empty());
    }

    #[tokio::test]
    async fn one_failure_does_not_stop_the_batch() {
        let tmp = TempDir::new().unwrap();
        let store = FakeStore::new()
            .with_file("", "one.txt", b"1")
            .with_file("", "two.txt", b"2")
            .with_file("", "three.txt", b"3")
            .failing_download("/two.txt");
        let selection = store.entries("");

        let report = download_selection(&store, &selection, tmp.path()).await;

        assert_eq!(report.downloaded, names(&["one.txt", "three.txt"]));
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("/two.txt"));
        assert!(tmp.path().join("one.txt").exists());
        assert!(!tmp.path().join("two.txt").exists());
        assert!(tmp.path().join("three.txt").exists());
    }

    #[tokio::test]
    async fn listing_failure_is_reported_and_rest_continues() {
        let tmp = TempDir::new().unwrap();
        let store = tree().failing_list("/photos/2024");
        let selection = store.entries("");

        let report = download_selection(&store, &selection, tmp.path()).await;

        assert_eq!(report.downloaded, names(&["a.jpg", "notes.txt"]));
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Failed to list folder /photos/2024"));
        assert!(!tmp.path().join("photos/2024").exists());
        assert!(tmp.path().join("photos/empty").is_dir());
    }
}
