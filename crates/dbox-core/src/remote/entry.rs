//! Remote entry representation.

use std::hash::{Hash, Hasher};
use std::time::SystemTime;

use unicode_normalization::UnicodeNormalization;

use super::path::normalize;

/// A single file or folder in the remote store.
///
/// `RemoteEntry` is immutable. The `path` is the identity key: it is
/// lower-cased on construction because the store compares paths
/// case-insensitively, so two entries whose paths differ only in case are
/// the same entry. Folder sizes are always `0`.
///
/// # Examples
///
/// ```
/// use dbox_core::RemoteEntry;
///
/// let entry = RemoteEntry::file("Report.PDF", "/Docs/Report.PDF", 2048, None);
/// assert_eq!(entry.name(), "Report.PDF");
/// assert_eq!(entry.path(), "/docs/report.pdf");
/// ```
#[derive(Debug, Clone)]
pub struct RemoteEntry {
    name: String,
    path: String,
    is_folder: bool,
    size: u64,
    modified: Option<SystemTime>,
}

impl RemoteEntry {
    /// Creates an entry, normalizing the name to NFC and the path to its
    /// canonical lower-case form.
    pub fn new(
        name: &str,
        path: &str,
        is_folder: bool,
        size: u64,
        modified: Option<SystemTime>,
    ) -> Self {
        Self {
            name: name.nfc().collect(),
            path: normalize(path),
            is_folder,
            size: if is_folder { 0 } else { size },
            modified,
        }
    }

    /// Shorthand for a file entry.
    pub fn file(name: &str, path: &str, size: u64, modified: Option<SystemTime>) -> Self {
        Self::new(name, path, false, size, modified)
    }

    /// Shorthand for a folder entry.
    pub fn folder(name: &str, path: &str) -> Self {
        Self::new(name, path, true, 0, None)
    }

    /// Display name (last path component, original casing).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical lower-case path, e.g. `"/photos/2024"`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_folder(&self) -> bool {
        self.is_folder
    }

    /// File size in bytes. Always `0` for folders.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Server-side modification time. Folders carry none.
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Lower-cased extension of the name, if any.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }
}

impl PartialEq for RemoteEntry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for RemoteEntry {}

impl Hash for RemoteEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}
