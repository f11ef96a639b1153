//! Remote store access.
//!
//! [`RemoteStore`] is the capability the rest of the crate depends on:
//! list one folder, download one file. [`dropbox::DropboxClient`] is the
//! production implementation.

pub mod dropbox;
pub mod entry;
pub mod path;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;

use crate::error::CoreResult;
use entry::RemoteEntry;

/// Read-only access to a hierarchical remote file store.
///
/// Implementations must be shareable across tasks; the executor holds one
/// behind an `Arc` and calls it from spawned tasks.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Lists the direct children of `path` (`""` is the root) in the
    /// store's own order. The listing is complete or an error, never partial.
    async fn list(&self, path: &str) -> CoreResult<Vec<RemoteEntry>>;

    /// Fetches the full content of the file at `path`.
    async fn download(&self, path: &str) -> CoreResult<Vec<u8>>;
}
