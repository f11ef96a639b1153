//! Navigation state for the folder browser.
//!
//! [`NavigationState`] holds the folder being displayed, its sorted
//! entries, the cursor and the set of selected entries. All transitions
//! consume `self` and return a new instance.

use std::collections::BTreeSet;

use crate::remote::entry::RemoteEntry;
use crate::remote::path::ROOT;

/// Number of entries skipped by a page jump.
pub const PAGE_STEP: usize = 5;

/// Cursor, selection and listing of the current folder.
///
/// The cursor is always a valid index into `entries` (or `0` when empty)
/// and `selected` only holds valid indices. Replacing the entries resets
/// the cursor to `0` and clears the selection, since indices from a
/// previous listing do not address the same entries.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    current_path: String,
    entries: Vec<RemoteEntry>,
    cursor: usize,
    selected: BTreeSet<usize>,
}

impl NavigationState {
    /// Empty state at the store root, before the first listing arrives.
    pub fn new() -> Self {
        Self {
            current_path: ROOT.to_string(),
            ..Self::default()
        }
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn entries(&self) -> &[RemoteEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Entry under the cursor, if any.
    pub fn cursor_entry(&self) -> Option<&RemoteEntry> {
        self.entries.get(self.cursor)
    }

    /// Selected indices in ascending order.
    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Selected entries in listing order.
    pub fn selected_entries(&self) -> Vec<RemoteEntry> {
        self.selected
            .iter()
            .filter_map(|&i| self.entries.get(i).cloned())
            .collect()
    }

    /// Replaces the listing: new folder, cursor at the top, nothing selected.
    pub fn with_listing(self, path: &str, entries: Vec<RemoteEntry>) -> Self {
        Self {
            current_path: path.to_string(),
            entries,
            cursor: 0,
            selected: BTreeSet::new(),
        }
    }

    /// Moves the cursor to `index`, clamped to the last entry.
    pub fn with_cursor(self, index: usize) -> Self {
        let cursor = if self.entries.is_empty() {
            0
        } else {
            index.min(self.entries.len() - 1)
        };
        Self { cursor, ..self }
    }

    /// Moves the cursor by `delta`, stopping at either end.
    pub fn move_by(self, delta: isize) -> Self {
        if self.entries.is_empty() {
            return self;
        }
        let target = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor.saturating_add(delta as usize)
        };
        self.with_cursor(target)
    }

    pub fn move_up(self) -> Self {
        self.move_by(-1)
    }

    pub fn move_down(self) -> Self {
        self.move_by(1)
    }

    pub fn page_up(self) -> Self {
        self.move_by(-(PAGE_STEP as isize))
    }

    pub fn page_down(self) -> Self {
        self.move_by(PAGE_STEP as isize)
    }

    pub fn go_to_first(self) -> Self {
        self.with_cursor(0)
    }

    pub fn go_to_last(self) -> Self {
        let last = self.entries.len().saturating_sub(1);
        self.with_cursor(last)
    }

    /// Flips the selection of `index`. Out-of-range indices are ignored.
    pub fn toggle_selection(self, index: usize) -> Self {
        if index >= self.entries.len() {
            return self;
        }
        let mut selected = self.selected;
        if !selected.remove(&index) {
            selected.insert(index);
        }
        Self { selected, ..self }
    }

    /// Flips the selection of the entry under the cursor.
    pub fn toggle_cursor_selection(self) -> Self {
        let index = self.cursor;
        self.toggle_selection(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: usize) -> Vec<RemoteEntry> {
        (0..n)
            .map(|i| RemoteEntry::file(&format!("f{i}"), &format!("/f{i}"), 1, None))
            .collect()
    }

    fn state(n: usize) -> NavigationState {
        NavigationState::new().with_listing("", entries(n))
    }

    #[test]
    fn new_state_is_empty_at_root() {
        let nav = NavigationState::new();
        assert_eq!(nav.current_path(), "");
        assert!(nav.entries().is_empty());
        assert_eq!(nav.cursor(), 0);
        assert!(nav.cursor_entry().is_none());
    }

    #[test]
    fn move_down_and_up() {
        let nav = state(3).move_down().move_down();
        assert_eq!(nav.cursor(), 2);
        let nav = nav.move_down();
        assert_eq!(nav.cursor(), 2, "stays on last entry");
        let nav = nav.move_up().move_up().move_up();
        assert_eq!(nav.cursor(), 0, "stays on first entry");
    }

    #[test]
    fn page_jumps_clamp() {
        let nav = state(12).page_down();
        assert_eq!(nav.cursor(), 5);
        let nav = nav.page_down().page_down();
        assert_eq!(nav.cursor(), 11);
        let nav = nav.page_up();
        assert_eq!(nav.cursor(), 6);
        let nav = nav.page_up().page_up();
        assert_eq!(nav.cursor(), 0);
    }

    #[test]
    fn first_and_last() {
        let nav = state(4).go_to_last();
        assert_eq!(nav.cursor(), 3);
        assert_eq!(nav.go_to_first().cursor(), 0);
    }

    #[test]
    fn movement_on_empty_is_noop() {
        let nav = state(0).move_down().page_down().go_to_last().move_up();
        assert_eq!(nav.cursor(), 0);
    }

    #[test]
    fn with_cursor_clamps() {
        assert_eq!(state(2).with_cursor(100).cursor(), 1);
        assert_eq!(state(0).with_cursor(5).cursor(), 0);
    }

    #[test]
    fn toggle_selection_flips_membership() {
        let nav = state(3).toggle_selection(1);
        assert!(nav.is_selected(1));
        let nav = nav.toggle_selection(1);
        assert!(!nav.is_selected(1));
    }

    #[test]
    fn toggle_out_of_range_is_ignored() {
        let nav = state(2).toggle_selection(2);
        assert!(nav.selected().is_empty());
    }

    #[test]
    fn selected_entries_in_listing_order() {
        let nav = state(4)
            .toggle_selection(3)
            .toggle_selection(0)
            .with_cursor(2)
            .toggle_cursor_selection();
        let names: Vec<String> = nav
            .selected_entries()
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, vec!["f0", "f2", "f3"]);
    }

    #[test]
    fn with_listing_resets_cursor_and_selection() {
        let nav = state(5).with_cursor(4).toggle_selection(4);
        let nav = nav.with_listing("/other", entries(2));
        assert_eq!(nav.current_path(), "/other");
        assert_eq!(nav.cursor(), 0);
        assert!(nav.selected().is_empty());
        assert_eq!(nav.entries().len(), 2);
    }
}
