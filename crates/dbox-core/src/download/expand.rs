//! Expansion of a selection into the full list of entries to materialize.

use crate::remote::entry::RemoteEntry;
use crate::remote::RemoteStore;

/// Result of walking a selection.
#[derive(Debug, Default)]
pub struct Expansion {
    /// Files and folders in depth-first pre-order.
    pub items: Vec<RemoteEntry>,
    /// One message per folder whose listing failed.
    pub errors: Vec<String>,
}

/// Walks `selection`, descending into folders with an explicit stack.
///
/// A folder is emitted just before its descendants, and only if its own
/// listing succeeded; a failed listing drops that whole subtree and records
/// an error while sibling branches carry on.
pub async fn expand_selection<S>(store: &S, selection: &[RemoteEntry]) -> Expansion
where
    S: RemoteStore + ?Sized,
{
    let mut expansion = Expansion::default();
    let mut stack: Vec<RemoteEntry> = selection.iter().rev().cloned().collect();

    while let Some(entry) = stack.pop() {
        if !entry.is_folder() {
            expansion.items.push(entry);
            continue;
        }
        match store.list(entry.path()).await {
            Ok(children) => {
                tracing::debug!(path = entry.path(), children = children.len(), "expanded");
                expansion.items.push(entry);
                stack.extend(children.into_iter().rev());
            }
            Err(e) => {
                tracing::warn!(path = entry.path(), error = %e, "expand failed");
                expansion
                    .errors
                    .push(format!("Failed to list folder {}: {e}", entry.path()));
            }
        }
    }
    expansion
}
