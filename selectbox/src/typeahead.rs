//! Type-ahead buffer.
//!
//! Keystrokes typed while a listbox is open accumulate into a short-lived
//! string. The owning machine schedules a reset after a period of
//! inactivity; until then every new character extends the query, so typing
//! "th" quickly jumps to "third" rather than to the first item with a "t".

use log::debug;
use tokio::time::Duration;

use crate::item::DecoratedItem;

/// Inactivity period after which the buffer is cleared.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(350);

#[derive(Debug, Clone, Default)]
pub struct TypeAhead {
    buffer: String,
}

impl TypeAhead {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current accumulated string.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Append a keystroke, lowercased.
    pub fn push(&mut self, c: char) -> &str {
        self.buffer.extend(c.to_lowercase());
        debug!("Type-ahead buffer: {:?}", self.buffer);
        &self.buffer
    }

    pub fn reset(&mut self) {
        if !self.buffer.is_empty() {
            debug!("Type-ahead buffer reset (was {:?})", self.buffer);
            self.buffer.clear();
        }
    }

    /// Index of the first item matching the whole buffer.
    pub fn find<T>(
        &self,
        items: &[DecoratedItem<T>],
        matches: impl Fn(&DecoratedItem<T>, &str) -> bool,
    ) -> Option<usize> {
        if self.buffer.is_empty() {
            return None;
        }
        items.iter().position(|item| matches(item, &self.buffer))
    }
}
