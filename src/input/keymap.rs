//! Keyboard normalization so terminal keys map onto the same logical controls as buttons.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::LogicalControl;

/// Keys the display port reports; everything else is dropped at the port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Backspace,
    Esc,
    Char(char),
    /// Ctrl-C while the terminal is in raw mode.
    Interrupt,
}

impl Key {
    pub fn from_crossterm(event: KeyEvent) -> Option<Key> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char('c') | KeyCode::Char('C') => Some(Key::Interrupt),
                _ => None,
            };
        }
        match event.code {
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Esc => Some(Key::Esc),
            KeyCode::Char(ch) => Some(Key::Char(ch)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Control(LogicalControl),
    Quit,
}

pub fn map_key(key: Key) -> Option<KeyInput> {
    let control = match key {
        Key::Interrupt | Key::Char('q') => return Some(KeyInput::Quit),
        Key::Up | Key::Char('k') => LogicalControl::Up,
        Key::Down | Key::Char('j') => LogicalControl::Down,
        Key::Left | Key::Char('h') => LogicalControl::Left,
        Key::Right | Key::Char('l') => LogicalControl::Right,
        Key::Enter | Key::Char('\n') | Key::Char('\r') => LogicalControl::Select,
        Key::Backspace | Key::Esc | Key::Char('\u{7f}') => LogicalControl::Back,
        Key::Char('+') | Key::Char('=') => LogicalControl::VolUp,
        Key::Char('-') | Key::Char('_') => LogicalControl::VolDown,
        Key::Char(_) => return None,
    };
    Some(KeyInput::Control(control))
}
