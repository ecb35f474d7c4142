//! Terminal input: crossterm key events to [`KeyCombo`]s.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::trace;

use crate::keybinds::{Key, KeyCombo, Modifiers};

fn key_for(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Char(c) => Key::char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        _ => return None,
    };
    Some(key)
}

/// Convert a crossterm key event for [`SelectMachine::key_down`] and
/// friends.
///
/// Release events and keys no dropdown reacts to map to `None`.
///
/// [`SelectMachine::key_down`]: crate::machine::select::SelectMachine::key_down
pub fn convert_key_event(event: KeyEvent) -> Option<KeyCombo> {
    if event.kind == KeyEventKind::Release {
        trace!("Ignoring key release: {:?}", event.code);
        return None;
    }

    let key = key_for(event.code)?;
    let modifiers = Modifiers {
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        // BackTab carries an implicit shift
        shift: event.modifiers.contains(KeyModifiers::SHIFT) || event.code == KeyCode::BackTab,
        alt: event.modifiers.contains(KeyModifiers::ALT),
    };

    Some(KeyCombo::new(key, modifiers))
}
