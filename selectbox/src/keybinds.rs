//! Key model used by the machines' keydown entry points.

/// Held modifier keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// Ctrl or alt are held. Chords like these are never routed to a widget.
    pub fn is_chord(&self) -> bool {
        self.ctrl || self.alt
    }
}

/// A pressed key and the modifiers held with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A bare key press.
    pub const fn key(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub const fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub const fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub const fn alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    /// Whether the key moves focus, navigates or commits rather than
    /// producing text.
    pub fn is_navigation(&self) -> bool {
        self.key.is_navigation()
    }
}

impl From<Key> for KeyCombo {
    fn from(key: Key) -> Self {
        Self::key(key)
    }
}

/// The keys a dropdown reacts to.
///
/// Space has its own variant because it opens and commits; [`Key::char`]
/// normalizes `' '` to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Space,
    Enter,
    Escape,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Backspace,
    Delete,
}

impl Key {
    pub const fn char(c: char) -> Self {
        match c {
            ' ' => Self::Space,
            c => Self::Char(c),
        }
    }

    /// Up, down, enter, escape, tab and space.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::Up | Key::Down | Key::Enter | Key::Escape | Key::Tab | Key::Space | Key::Char(' ')
        )
    }

    /// The printable character this key produces, if any.
    pub fn printable(&self) -> Option<char> {
        match self {
            Key::Char(c) if !c.is_control() && *c != ' ' => Some(*c),
            _ => None,
        }
    }
}
