//! Active-item navigation and scroll-into-view.

use log::trace;

use crate::env::{Environment, ItemGeometry, ListGeometry};
use crate::item::ItemHandle;

/// Next active index, wrapping past the last item back to the first.
///
/// Starting from no active item targets the first item. An empty list has
/// no valid index.
pub fn increment(index: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match index {
        Some(i) if i + 1 < len => Some(i + 1),
        _ => Some(0),
    }
}

/// Previous active index, wrapping before the first item to the last.
///
/// Starting from no active item (or an index that no longer exists) targets
/// the last item.
pub fn decrement(index: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match index {
        Some(i) if i > 0 && i < len => Some(i - 1),
        _ => Some(len - 1),
    }
}

/// New scroll offset that brings `item` into the list's visible window.
///
/// Returns `None` when the item is already fully visible.
pub fn scroll_adjustment(item: ItemGeometry, list: ListGeometry) -> Option<u32> {
    if item.bottom() > list.visible_bottom() {
        // Align the item's bottom with the list's bottom
        Some(item.bottom().saturating_sub(list.height))
    } else if item.top < list.scroll_top {
        Some(item.top)
    } else {
        None
    }
}

/// Scroll the list so the item behind `handle` is visible.
///
/// No-op when either element can't be measured.
pub fn adjust_scroll<E: Environment + ?Sized>(env: &mut E, handle: ItemHandle) {
    let (Some(item), Some(list)) = (env.item_geometry(handle), env.list_geometry()) else {
        trace!("adjust_scroll: geometry unavailable for {}", handle);
        return;
    };

    if let Some(scroll_top) = scroll_adjustment(item, list) {
        trace!(
            "adjust_scroll: {} scroll_top {} -> {}",
            handle, list.scroll_top, scroll_top
        );
        env.set_list_scroll_top(scroll_top);
    }
}
