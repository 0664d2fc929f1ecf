//! Key bindings: arrows, vim-style and WASD.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mergetui::Direction;

/// Command from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    NewGame,
    Undo,
    ToggleTheme,
    ToggleSound,
    Continue,
    Quit,
    None,
}

/// Map key event to a command. Anything unrecognized is `Action::None`.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
        return Action::Quit;
    }
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return Action::None;
    }
    match code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Up | KeyCode::Char('k' | 'w') => Action::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('j' | 's') => Action::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('h' | 'a') => Action::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('l' | 'd') => Action::Move(Direction::Right),
        KeyCode::Char('n' | 'N' | 'r' | 'R') => Action::NewGame,
        KeyCode::Char('u' | 'U') | KeyCode::Backspace => Action::Undo,
        KeyCode::Char('t' | 'T') => Action::ToggleTheme,
        KeyCode::Char('m' | 'M') => Action::ToggleSound,
        KeyCode::Char('c' | 'C') | KeyCode::Enter => Action::Continue,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Action {
        key_to_action(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn arrows_and_vim_keys_move() {
        assert_eq!(press(KeyCode::Left), Action::Move(Direction::Left));
        assert_eq!(press(KeyCode::Char('l')), Action::Move(Direction::Right));
        assert_eq!(press(KeyCode::Char('k')), Action::Move(Direction::Up));
        assert_eq!(press(KeyCode::Char('s')), Action::Move(Direction::Down));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert_eq!(press(KeyCode::Char('z')), Action::None);
        assert_eq!(press(KeyCode::F(5)), Action::None);
        let alt = KeyEvent::new(KeyCode::Left, KeyModifiers::ALT);
        assert_eq!(key_to_action(alt), Action::None);
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(key), Action::Quit);
    }
}
