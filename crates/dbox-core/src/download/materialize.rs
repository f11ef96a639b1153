//! Writing expanded entries under the local download root.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::remote::entry::RemoteEntry;
use crate::remote::path::local_path;
use crate::remote::RemoteStore;

/// What happened to a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A folder was created (or already existed).
    Folder,
    /// The file was fetched; carries the entry name.
    Downloaded(String),
    /// The file already existed locally; carries the entry name.
    Skipped(String),
    Failed(String),
}

/// Mirrors one entry under `local_root`.
///
/// Folders are created with all missing parents. A file whose mirror path
/// already exists is skipped without contacting the store; otherwise it is
/// fetched and written through a temporary file in the target directory
/// that is renamed into place once complete.
pub async fn materialize<S>(store: &S, entry: &RemoteEntry, local_root: &Path) -> Outcome
where
    S: RemoteStore + ?Sized,
{
    let target = match local_path(local_root, entry.path()) {
        Ok(p) => p,
        Err(e) => return Outcome::Failed(e.to_string()),
    };

    if entry.is_folder() {
        return match tokio::fs::create_dir_all(&target).await {
            Ok(()) => Outcome::Folder,
            Err(e) => Outcome::Failed(format!("Failed to create folder {}: {e}", entry.path())),
        };
    }

    match tokio::fs::try_exists(&target).await {
        Ok(true) => {
            tracing::debug!(path = entry.path(), "exists, skipping");
            return Outcome::Skipped(entry.name().to_string());
        }
        Ok(false) => {}
        Err(e) => return Outcome::Failed(format!("Failed to check {}: {e}", entry.path())),
    }

    if let Some(parent) = target.parent() {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            return Outcome::Failed(format!("Failed to create folder {}: {e}", parent.display()));
        }
    }

    let bytes = match store.download(entry.path()).await {
        Ok(b) => b,
        Err(e) => return Outcome::Failed(format!("Failed to download {}: {e}", entry.path())),
    };

    match write_atomic(target, bytes).await {
        Ok(()) => Outcome::Downloaded(entry.name().to_string()),
        Err(e) => Outcome::Failed(format!("Failed to write {}: {e}", entry.path())),
    }
}

async fn write_atomic(target: PathBuf, bytes: Vec<u8>) -> std::io::Result<()> {
    tokio::task::spawn_blocking(move || {
        let dir = target.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "target has no parent")
        })?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| e.error)?;
        Ok(())
    })
    .await
    .map_err(std::io::Error::other)?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::fake::FakeStore;
    use std::fs;
    use tempfile::TempDir;

    fn store() -> FakeStore {
        FakeStore::new()
            .with_folder("", "docs")
            .with_file("/docs", "Report.pdf", b"pdf-bytes")
    }

    #[tokio::test]
    async fn folder_is_created() {
        let tmp = TempDir::new().unwrap();
        let store = store();
        let docs = store.entries("")[0].clone();

        assert_eq!(materialize(&store, &docs, tmp.path()).await, Outcome::Folder);
        assert!(tmp.path().join("docs").is_dir());
    }

    #[tokio::test]
    async fn file_is_written_with_parents() {
        let tmp = TempDir::new().unwrap();
        let store = store();
        let file = store.entries("/docs")[0].clone();

        assert_eq!(
            materialize(&store, &file, tmp.path()).await,
            Outcome::Downloaded("Report.pdf".to_string())
        );
        let written = fs::read(tmp.path().join("docs").join("report.pdf")).unwrap();
        assert_eq!(written, b"pdf-bytes");
    }

    #[tokio::test]
    async fn no_temp_files_left_behind() {
        let tmp = TempDir::new().unwrap();
        let store = store();
        let file = store.entries("/docs")[0].clone();
        materialize(&store, &file, tmp.path()).await;

        let names: Vec<_> = fs::read_dir(tmp.path().join("docs"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("report.pdf")]);
    }

    #[tokio::test]
    async fn existing_file_is_skipped_without_fetch() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("docs")).unwrap();
        fs::write(tmp.path().join("docs").join("report.pdf"), b"local").unwrap();
        let store = store();
        let file = store.entries("/docs")[0].clone();

        assert_eq!(
            materialize(&store, &file, tmp.path()).await,
            Outcome::Skipped("Report.pdf".to_string())
        );
        assert!(store.download_calls().is_empty());
        let content = fs::read(tmp.path().join("docs").join("report.pdf")).unwrap();
        assert_eq!(content, b"local");
    }

    #[tokio::test]
    async fn fetch_failure_leaves_no_file() {
        let tmp = TempDir::new().unwrap();
        let store = store().failing_download("/docs/report.pdf");
        let file = store.entries("/docs")[0].clone();

        let outcome = materialize(&store, &file, tmp.path()).await;
        match outcome {
            Outcome::Failed(msg) => assert!(msg.starts_with("Failed to download /docs/report.pdf:")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(!tmp.path().join("docs").join("report.pdf").exists());
    }

    #[tokio::test]
    async fn unreadable_target_fails_without_fetch() {
        let tmp = TempDir::new().unwrap();
        // A plain file where the parent folder should be makes the stat fail.
        fs::write(tmp.path().join("docs"), b"not a folder").unwrap();
        let store = store();
        let file = store.entries("/docs")[0].clone();

        match materialize(&store, &file, tmp.path()).await {
            Outcome::Failed(msg) => assert!(msg.starts_with("Failed to check /docs/report.pdf:")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(store.download_calls().is_empty());
        assert_eq!(fs::read(tmp.path().join("docs")).unwrap(), b"not a folder");
    }

    #[tokio::test]
    async fn escaping_path_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let store = FakeStore::new();
        let evil = RemoteEntry::file("x", "/../x", 1, None);

        assert!(matches!(
            materialize(&store, &evil, tmp.path()).await,
            Outcome::Failed(_)
        ));
        assert!(store.download_calls().is_empty());
    }
}
