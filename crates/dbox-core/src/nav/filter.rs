//! Sorting for remote listings.

use std::cmp::Ordering;

use crate::remote::entry::RemoteEntry;

/// Sorts a listing for display.
///
/// Folders always appear before files; within each group entries are
/// ordered by case-insensitive name. The sort is stable, so entries whose
/// lower-cased names collide keep their fetch order. Returns a **new**
/// `Vec` - the input slice is never mutated.
pub fn sort_entries(entries: &[RemoteEntry]) -> Vec<RemoteEntry> {
    let mut sorted: Vec<RemoteEntry> = entries.to_vec();
    sorted.sort_by(compare_entries);
    sorted
}

fn compare_entries(a: &RemoteEntry, b: &RemoteEntry) -> Ordering {
    b.is_folder()
        .cmp(&a.is_folder())
        .then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
}
