//! Remote path helpers.
//!
//! Remote paths are `/`-separated, start with `/`, and are compared in
//! lower case. The root is the empty string.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Canonical root path.
pub const ROOT: &str = "";

/// Returns the canonical form of `path`: lower-cased, leading `/`, no
/// trailing `/`. Both `""` and `"/"` map to the root.
pub fn normalize(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return ROOT.to_string();
    }
    let lower = trimmed.to_lowercase();
    if lower.starts_with('/') {
        lower
    } else {
        format!("/{lower}")
    }
}

/// Structural parent of a canonical path. The root is its own parent.
pub fn parent(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((head, _)) => head.to_string(),
        None => ROOT.to_string(),
    }
}

/// Returns `true` if `path` denotes the store root.
pub fn is_root(path: &str) -> bool {
    path.is_empty() || path == "/"
}

/// Maps a remote path to its mirror under `local_root`.
///
/// Every component is kept verbatim; empty, `.` and `..` components (and
/// components carrying a backslash) are rejected so a listing can never
/// escape the download root.
pub fn local_path(local_root: &Path, remote: &str) -> CoreResult<PathBuf> {
    let relative = remote.trim_start_matches('/');
    if relative.is_empty() {
        return Err(CoreError::InvalidPath(remote.to_string()));
    }
    let mut out = local_root.to_path_buf();
    for component in relative.split('/') {
        if component.is_empty() || component == "." || component == ".." || component.contains('\\')
        {
            return Err(CoreError::InvalidPath(remote.to_string()));
        }
        out.push(component);
    }
    Ok(out)
}

/// Builds the web location of a folder: `base` followed by the
/// percent-encoded path (`/` for the root).
pub fn web_url(base: &str, path: &str) -> String {
    let web_path = if is_root(path) { "/" } else { path };
    format!(
        "{}{}",
        base.trim_end_matches('/'),
        urlencoding::encode(web_path)
    )
}
