//! Unified action system for dbox.
//!
//! Every user-triggerable action is represented by the [`Action`] enum.
//! [`ActionRegistry`] provides metadata (id, name, description, category)
//! used for keymap parsing and the help overlay.

/// Every user-triggerable action in dbox.
///
/// Variants carry no parameters - context is determined at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    CursorUp,
    CursorDown,
    PageUp,
    PageDown,
    CursorTop,
    CursorBottom,
    Open,
    GoParent,
    // Selection
    ToggleSelect,
    Download,
    // Remote
    Reload,
    ClearCache,
    OpenInBrowser,
    // System
    Help,
    Quit,
    ForceQuit,
}

/// Broad category for grouping actions in the help overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Selection,
    Remote,
    System,
}

impl ActionCategory {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Selection => "Selection",
            Self::Remote => "Remote",
            Self::System => "System",
        }
    }
}

/// Metadata for a single action.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub action: Action,
    /// Snake-case identifier used in `keymap.toml` (e.g. `"cursor_up"`).
    pub id: &'static str,
    /// Human-readable name (e.g. `"Cursor Up"`).
    pub name: &'static str,
    /// Short description (e.g. `"Move cursor up one entry"`).
    pub description: &'static str,
    pub category: ActionCategory,
}

/// Registry of all available actions.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    descriptors: Vec<ActionDescriptor>,
}

impl ActionRegistry {
    /// Builds the registry containing every known action.
    pub fn new() -> Self {
        let descriptors = vec![
            // Navigation
            ActionDescriptor {
                action: Action::CursorUp,
                id: "cursor_up",
                name: "Cursor Up",
                description: "Move cursor up one entry",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::CursorDown,
                id: "cursor_down",
                name: "Cursor Down",
                description: "Move cursor down one entry",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::PageUp,
                id: "page_up",
                name: "Page Up",
                description: "Move cursor up five entries",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::PageDown,
                id: "page_down",
                name: "Page Down",
                description: "Move cursor down five entries",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::CursorTop,
                id: "go_first",
                name: "Go to First",
                description: "Jump to the first entry",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::CursorBottom,
                id: "go_last",
                name: "Go to Last",
                description: "Jump to the last entry",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::Open,
                id: "open",
                name: "Open",
                description: "Enter folder or open file",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::GoParent,
                id: "go_parent",
                name: "Go Parent",
                description: "Navigate to parent folder",
                category: ActionCategory::Navigation,
            },
            // Selection
            ActionDescriptor {
                action: Action::ToggleSelect,
                id: "toggle_select",
                name: "Toggle Selection",
                description: "Select or deselect entry under cursor",
                category: ActionCategory::Selection,
            },
            ActionDescriptor {
                action: Action::Download,
                id: "download",
                name: "Download",
                description: "Download selected entries",
                category: ActionCategory::Selection,
            },
            // Remote
            ActionDescriptor {
                action: Action::Reload,
                id: "reload",
                name: "Reload",
                description: "Re-fetch current folder",
                category: ActionCategory::Remote,
            },
            ActionDescriptor {
                action: Action::ClearCache,
                id: "clear_cache",
                name: "Clear Cache",
                description: "Forget all cached listings",
                category: ActionCategory::Remote,
            },
            ActionDescriptor {
                action: Action::OpenInBrowser,
                id: "open_browser",
                name: "Open in Browser",
                description: "Open current folder on the web",
                category: ActionCategory::Remote,
            },
            // System
            ActionDescriptor {
                action: Action::Help,
                id: "help",
                name: "Help",
                description: "Show keyboard shortcuts",
                category: ActionCategory::System,
            },
            ActionDescriptor {
                action: Action::Quit,
                id: "quit",
                name: "Quit",
                description: "Exit dbox",
                category: ActionCategory::System,
            },
            ActionDescriptor {
                action: Action::ForceQuit,
                id: "force_quit",
                name: "Force Quit",
                description: "Exit immediately, aborting downloads",
                category: ActionCategory::System,
            },
        ];
        Self { descriptors }
    }

    /// Returns all descriptors.
    pub fn all(&self) -> &[ActionDescriptor] {
        &self.descriptors
    }

    /// Finds an action by its string id (for keymap.toml parsing).
    pub fn find_by_id(&self, id: &str) -> Option<Action> {
        self.descriptors
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.action)
    }

    /// Returns the descriptor for a given action.
    pub fn descriptor_for(&self, action: Action) -> Option<&ActionDescriptor> {
        self.descriptors.iter().find(|d| d.action == action)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
