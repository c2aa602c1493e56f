use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::Direction;

/// Scancodes of the non-arrow keys the game reacts to
pub const SCANCODE_RETURN: u16 = 40;
pub const SCANCODE_ESCAPE: u16 = 41;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Only presses count; terminals that report releases would double up
        if key.kind != KeyEventKind::Press {
            return KeyAction::None;
        }

        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if let Some(direction) = Self::direction_for(key.code) {
            return KeyAction::Turn(direction);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => KeyAction::Restart,
            _ => KeyAction::None,
        }
    }

    /// Translate a raw scancode event from hosts that report key releases.
    ///
    /// Only releases (`key_up`) act, matching how such hosts deliver one
    /// event per physical key stroke.
    pub fn handle_scancode(&self, code: u16, key_up: bool) -> KeyAction {
        if !key_up {
            return KeyAction::None;
        }

        match code {
            SCANCODE_RETURN => KeyAction::Restart,
            SCANCODE_ESCAPE => KeyAction::Quit,
            _ => Direction::from_scancode(code)
                .map(KeyAction::Turn)
                .unwrap_or(KeyAction::None),
        }
    }

    /// Arrow keys and WASD
    pub fn direction_for(code: KeyCode) -> Option<Direction> {
        match code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(up), KeyAction::Turn(Direction::Up));

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(down), KeyAction::Turn(Direction::Down));

        let left = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(left), KeyAction::Turn(Direction::Left));

        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(right), KeyAction::Turn(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        let w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(w), KeyAction::Turn(Direction::Up));

        let a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(a), KeyAction::Turn(Direction::Left));

        let s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(s), KeyAction::Turn(Direction::Down));

        let d = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(d), KeyAction::Turn(Direction::Right));
    }

    #[test]
    fn test_release_ignored() {
        let handler = InputHandler::new();

        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handler.handle_key_event(release), KeyAction::None);
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(q), KeyAction::Quit);

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(esc), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_restart_keys() {
        let handler = InputHandler::new();

        let r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(r), KeyAction::Restart);

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(enter), KeyAction::Restart);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();

        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(x), KeyAction::None);
    }

    #[test]
    fn test_scancodes_act_on_key_up() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_scancode(82, true), KeyAction::Turn(Direction::Up));
        assert_eq!(handler.handle_scancode(80, true), KeyAction::Turn(Direction::Left));
        assert_eq!(handler.handle_scancode(82, false), KeyAction::None);
        assert_eq!(handler.handle_scancode(SCANCODE_RETURN, true), KeyAction::Restart);
        assert_eq!(handler.handle_scancode(SCANCODE_ESCAPE, true), KeyAction::Quit);
    }

    #[test]
    fn test_unmapped_scancode_is_noop() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_scancode(4, true), KeyAction::None);
        assert_eq!(handler.handle_scancode(200, true), KeyAction::None);
    }
}
