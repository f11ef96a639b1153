use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dbox_core::action::Action;
use dbox_core::config::keymap::Keymap;

/// Tracks state for multi-key sequences like "gg".
#[derive(Debug, Default)]
pub struct InputState {
    pending_g: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self { pending_g: false }
    }

    pub fn is_pending(&self) -> bool {
        self.pending_g
    }
}

/// Maps a key event to an [`Action`].
/// Returns the action and a new InputState (immutable pattern).
///
/// Keys are resolved through the `Keymap`; Ctrl+C is hardcoded so a
/// remapped keymap can never lose the way out.
pub fn handle_key(key: KeyEvent, state: &InputState, keymap: &Keymap) -> (Option<Action>, InputState) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return (Some(Action::ForceQuit), InputState::new());
    }

    // Handle "gg" sequence
    if state.pending_g {
        let new_state = InputState::new();
        return match key.code {
            KeyCode::Char('g') => (keymap.action_for_key("gg"), new_state),
            _ => (None, new_state),
        };
    }

    if key.code == KeyCode::Char('g')
        && key.modifiers.difference(KeyModifiers::SHIFT).is_empty()
        && keymap.has_sequence_starting_with('g')
    {
        return (None, InputState { pending_g: true });
    }

    let action = key_name(&key).and_then(|name| keymap.action_for_key(&name));
    (action, InputState::new())
}

/// Name of a key as written in `keymap.toml`.
pub fn key_name(key: &KeyEvent) -> Option<String> {
    let name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            format!("Ctrl+{}", c.to_ascii_lowercase())
        }
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use std::fs;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn key_with_mod(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn press(code: KeyCode) -> Option<Action> {
        handle_key(key(code), &InputState::new(), &Keymap::default()).0
    }

    #[test]
    fn vim_and_arrow_navigation() {
        assert_eq!(press(KeyCode::Char('j')), Some(Action::CursorDown));
        assert_eq!(press(KeyCode::Down), Some(Action::CursorDown));
        assert_eq!(press(KeyCode::Char('k')), Some(Action::CursorUp));
        assert_eq!(press(KeyCode::Up), Some(Action::CursorUp));
        assert_eq!(press(KeyCode::Char('G')), Some(Action::CursorBottom));
    }

    #[test]
    fn open_and_parent_keys() {
        assert_eq!(press(KeyCode::Enter), Some(Action::Open));
        assert_eq!(press(KeyCode::Char('l')), Some(Action::Open));
        assert_eq!(press(KeyCode::Right), Some(Action::Open));
        assert_eq!(press(KeyCode::Esc), Some(Action::GoParent));
        assert_eq!(press(KeyCode::Char('h')), Some(Action::GoParent));
        assert_eq!(press(KeyCode::Left), Some(Action::GoParent));
    }

    #[test]
    fn space_toggles_selection() {
        assert_eq!(press(KeyCode::Char(' ')), Some(Action::ToggleSelect));
    }

    #[test]
    fn ctrl_d_and_ctrl_u_page() {
        let km = Keymap::default();
        let state = InputState::new();
        let (down, _) = handle_key(
            key_with_mod(KeyCode::Char('d'), KeyModifiers::CONTROL),
            &state,
            &km,
        );
        let (up, _) = handle_key(
            key_with_mod(KeyCode::Char('u'), KeyModifiers::CONTROL),
            &state,
            &km,
        );
        assert_eq!(down, Some(Action::PageDown));
        assert_eq!(up, Some(Action::PageUp));
        assert_eq!(press(KeyCode::Char('d')), Some(Action::Download));
    }

    #[test]
    fn gg_sequence() {
        let km = Keymap::default();
        let (first, state) = handle_key(key(KeyCode::Char('g')), &InputState::new(), &km);
        assert_eq!(first, None);
        assert!(state.is_pending());

        let (second, state) = handle_key(key(KeyCode::Char('g')), &state, &km);
        assert_eq!(second, Some(Action::CursorTop));
        assert!(!state.is_pending());
    }

    #[test]
    fn g_then_other_key_cancels() {
        let km = Keymap::default();
        let (_, state) = handle_key(key(KeyCode::Char('g')), &InputState::new(), &km);
        let (action, state) = handle_key(key(KeyCode::Char('j')), &state, &km);
        assert_eq!(action, None);
        assert!(!state.is_pending());
    }

    #[test]
    fn ctrl_c_always_force_quits() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("keymap.toml");
        fs::write(&path, "[bindings]\nx = \"quit\"\n").unwrap();
        let km = Keymap::load(&path).unwrap();

        let (_, pending) = handle_key(key(KeyCode::Char('g')), &InputState::new(), &km);
        assert!(!pending.is_pending(), "no g-sequence bound");

        let (action, _) = handle_key(
            key_with_mod(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &InputState { pending_g: true },
            &km,
        );
        assert_eq!(action, Some(Action::ForceQuit));
    }

    #[test]
    fn q_quits_and_unbound_is_none() {
        assert_eq!(press(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(press(KeyCode::Char('z')), None);
        assert_eq!(press(KeyCode::F(5)), None);
    }

    #[test]
    fn key_names() {
        assert_eq!(key_name(&key(KeyCode::Char(' '))).as_deref(), Some("Space"));
        assert_eq!(key_name(&key(KeyCode::Char('?'))).as_deref(), Some("?"));
        assert_eq!(
            key_name(&key_with_mod(KeyCode::Char('D'), KeyModifiers::CONTROL)).as_deref(),
            Some("Ctrl+d")
        );
        assert_eq!(key_name(&key(KeyCode::Insert)), None);
    }
}
