//! Capabilities the host injects into a machine.
//!
//! The machines never touch rendered elements directly. Everything they need
//! from the presentation layer goes through [`Environment`]: reading the
//! geometry of an item and of the list, scrolling the list, requesting focus,
//! setting the text selection of an input and, as a last resort, reading an
//! item's rendered text. Tests substitute fakes for all of them.

use crate::item::ItemHandle;

/// Geometry of a rendered item, relative to the list's content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemGeometry {
    /// Offset of the item's top edge from the top of the list content.
    pub top: u32,
    /// Rendered height of the item.
    pub height: u32,
}

impl ItemGeometry {
    pub fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }
}

/// Geometry of the scrollable list container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListGeometry {
    /// Current scroll offset.
    pub scroll_top: u32,
    /// Height of the visible window.
    pub height: u32,
}

impl ListGeometry {
    pub fn new(scroll_top: u32, height: u32) -> Self {
        Self { scroll_top, height }
    }

    /// Bottom edge of the visible window, in content coordinates.
    pub fn visible_bottom(&self) -> u32 {
        self.scroll_top.saturating_add(self.height)
    }
}

/// Elements a machine may ask the host to focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// The filter text input of a filterable select.
    FilterInput,
    /// The list container.
    List,
    /// The text input of a combobox.
    Combobox,
}

/// Host capabilities.
///
/// Every method degrades gracefully: measurements return `None` when the
/// element isn't mounted, and `focus` reports whether the target existed.
pub trait Environment {
    /// Geometry of a rendered item.
    fn item_geometry(&self, handle: ItemHandle) -> Option<ItemGeometry>;

    /// Geometry of the list container.
    fn list_geometry(&self) -> Option<ListGeometry>;

    /// Scroll the list container.
    fn set_list_scroll_top(&mut self, scroll_top: u32);

    /// Request focus. Returns `false` if the target isn't present.
    fn focus(&mut self, target: FocusTarget) -> bool;

    /// Select `start..end` (character offsets) in the focused text input.
    fn set_selection_range(&mut self, start: usize, end: usize);

    /// Rendered text of an item.
    ///
    /// Only used when the host supplies neither a matcher nor a display
    /// accessor. Items that aren't rendered yet have no text and never match.
    fn rendered_text(&self, _handle: ItemHandle) -> Option<String> {
        None
    }
}

/// An environment with nothing mounted.
///
/// Every measurement is unavailable and every request is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEnvironment;

impl Environment for NullEnvironment {
    fn item_geometry(&self, _handle: ItemHandle) -> Option<ItemGeometry> {
        None
    }

    fn list_geometry(&self) -> Option<ListGeometry> {
        None
    }

    fn set_list_scroll_top(&mut self, _scroll_top: u32) {}

    fn focus(&mut self, _target: FocusTarget) -> bool {
        false
    }

    fn set_selection_range(&mut self, _start: usize, _end: usize) {}
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn item_geometry(&self, handle: ItemHandle) -> Option<ItemGeometry> {
        (**self).item_geometry(handle)
    }

    fn list_geometry(&self) -> Option<ListGeometry> {
        (**self).list_geometry()
    }

    fn set_list_scroll_top(&mut self, scroll_top: u32) {
        (**self).set_list_scroll_top(scroll_top)
    }

    fn focus(&mut self, target: FocusTarget) -> bool {
        (**self).focus(target)
    }

    fn set_selection_range(&mut self, start: usize, end: usize) {
        (**self).set_selection_range(start, end)
    }

    fn rendered_text(&self, handle: ItemHandle) -> Option<String> {
        (**self).rendered_text(handle)
    }
}
