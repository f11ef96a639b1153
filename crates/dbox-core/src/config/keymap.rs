//! Key binding configuration.
//!
//! Key bindings map key names (e.g. `"j"`, `"gg"`, `"Enter"`, `"Ctrl+d"`)
//! to [`Action`] values. The default bindings follow vim conventions.
//!
//! TOML files use string action identifiers (e.g. `"cursor_down"`);
//! these are resolved to [`Action`] via [`ActionRegistry::find_by_id`] at load time.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionRegistry};
use crate::error::{CoreError, CoreResult};

/// Raw TOML representation - deserialized first, then resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawKeymap {
    #[serde(default)]
    bindings: HashMap<String, String>,
}

/// Complete set of key bindings.
///
/// Stores bindings as a `HashMap<String, Action>` for O(1) lookup.
/// The default instance provides vim-style navigation plus arrow keys.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<String, Action>,
    /// Reverse map: Action → list of key strings (for help display).
    reverse: HashMap<Action, Vec<String>>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        // Navigation
        bindings.insert("j".to_string(), Action::CursorDown);
        bindings.insert("Down".to_string(), Action::CursorDown);
        bindings.insert("k".to_string(), Action::CursorUp);
        bindings.insert("Up".to_string(), Action::CursorUp);
        bindings.insert("Ctrl+d".to_string(), Action::PageDown);
        bindings.insert("Ctrl+u".to_string(), Action::PageUp);
        bindings.insert("gg".to_string(), Action::CursorTop);
        bindings.insert("G".to_string(), Action::CursorBottom);
        bindings.insert("Enter".to_string(), Action::Open);
        bindings.insert("l".to_string(), Action::Open);
        bindings.insert("Right".to_string(), Action::Open);
        bindings.insert("Esc".to_string(), Action::GoParent);
        bindings.insert("h".to_string(), Action::GoParent);
        bindings.insert("Left".to_string(), Action::GoParent);

        // Selection
        bindings.insert("Space".to_string(), Action::ToggleSelect);
        bindings.insert("d".to_string(), Action::Download);

        // Remote
        bindings.insert("R".to_string(), Action::Reload);
        bindings.insert("C".to_string(), Action::ClearCache);
        bindings.insert("b".to_string(), Action::OpenInBrowser);

        // System
        bindings.insert("?".to_string(), Action::Help);
        bindings.insert("q".to_string(), Action::Quit);
        bindings.insert("Ctrl+c".to_string(), Action::ForceQuit);

        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }
}

/// Builds the reverse mapping from Action → Vec<key string>.
fn build_reverse(bindings: &HashMap<String, Action>) -> HashMap<Action, Vec<String>> {
    let mut reverse: HashMap<Action, Vec<String>> = HashMap::new();
    for (key, action) in bindings {
        reverse.entry(*action).or_default().push(key.clone());
    }
    // Sort keys for deterministic display
    for keys in reverse.values_mut() {
        keys.sort();
    }
    reverse
}

impl Keymap {
    /// Loads key bindings from a TOML file at `path`.
    ///
    /// String action identifiers are resolved via `ActionRegistry`.
    /// Unknown action strings are silently ignored. A loaded keymap replaces
    /// the defaults entirely.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        let raw: RawKeymap =
            toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        Ok(Self::from_raw(raw))
    }

    /// Converts a raw (string-based) keymap into a resolved one.
    fn from_raw(raw: RawKeymap) -> Self {
        let registry = ActionRegistry::new();
        let bindings: HashMap<String, Action> = raw
            .bindings
            .into_iter()
            .filter_map(|(key, action_id)| {
                registry.find_by_id(&action_id).map(|action| (key, action))
            })
            .collect();
        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }

    /// Returns the action mapped to `key`, or `None` if unbound.
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Returns the key(s) bound to a given action (for the help overlay).
    pub fn keys_for_action(&self, action: Action) -> Option<&[String]> {
        self.reverse.get(&action).map(|v| v.as_slice())
    }

    /// Returns `true` if some binding is a two-key sequence starting with `first`.
    pub fn has_sequence_starting_with(&self, first: char) -> bool {
        self.bindings.keys().any(|k| {
            let mut chars = k.chars();
            chars.next() == Some(first) && chars.next().is_some() && chars.next().is_none()
        })
    }

    /// Returns all bindings (for iteration / display).
    pub fn bindings(&self) -> &HashMap<String, Action> {
        &self.bindings
    }
}
