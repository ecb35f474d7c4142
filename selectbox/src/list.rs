//! Decorated items, the filtered view and the active index.
//!
//! Both machines keep their list data here. The invariant maintained by every
//! mutation: `active` is either `None` or a valid index into `filtered`.

use log::trace;

use crate::item::{DecoratedItem, ItemHandle, decorate, position_of};
use crate::navigation::{decrement, increment};

#[derive(Debug, Clone)]
pub struct ListState<T> {
    /// All items, decorated.
    items: Vec<DecoratedItem<T>>,
    /// Items passing the current filter, in source order.
    filtered: Vec<DecoratedItem<T>>,
    /// Index into `filtered`.
    active: Option<usize>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            filtered: Vec::new(),
            active: None,
        }
    }
}

impl<T: Clone + PartialEq> ListState<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        let items = decorate(items);
        Self {
            filtered: items.clone(),
            items,
            active: None,
        }
    }

    // -------------------------------------------------------------------------
    // Item access
    // -------------------------------------------------------------------------

    pub fn items(&self) -> &[DecoratedItem<T>] {
        &self.items
    }

    pub fn filtered(&self) -> &[DecoratedItem<T>] {
        &self.filtered
    }

    pub fn len(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Look up a handle among the filtered items, then among all items.
    pub fn find(&self, handle: ItemHandle) -> Option<&DecoratedItem<T>> {
        self.filtered
            .iter()
            .chain(self.items.iter())
            .find(|d| d.handle == handle)
    }

    /// Replace the source items.
    ///
    /// Returns `false` (keeping the existing handles) when the new items are
    /// equal to the current ones.
    pub fn set_items(&mut self, items: Vec<T>) -> bool {
        let unchanged = items.len() == self.items.len()
            && items.iter().zip(&self.items).all(|(a, b)| *a == b.item);
        if unchanged {
            trace!("set_items: {} items unchanged, keeping handles", items.len());
            return false;
        }
        self.items = decorate(items);
        true
    }

    // -------------------------------------------------------------------------
    // Filtered view
    // -------------------------------------------------------------------------

    /// Replace the filtered view and revalidate the active index.
    ///
    /// With `auto_target` the first item becomes active. Otherwise the
    /// previously active item stays active if it is still present.
    pub fn set_filtered(&mut self, filtered: Vec<DecoratedItem<T>>, auto_target: bool) {
        let previous = self.active_item().map(|d| d.item.clone());
        self.filtered = filtered;

        self.active = if self.filtered.is_empty() {
            None
        } else if auto_target {
            Some(0)
        } else {
            previous.and_then(|item| self.filtered.iter().position(|d| d.item == item))
        };
        trace!(
            "set_filtered: {} items, active {:?}",
            self.filtered.len(),
            self.active
        );
    }

    /// Show every item again and clear the active index.
    pub fn reset(&mut self) {
        self.filtered = self.items.clone();
        self.active = None;
    }

    // -------------------------------------------------------------------------
    // Active item
    // -------------------------------------------------------------------------

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_item(&self) -> Option<&DecoratedItem<T>> {
        self.active.and_then(|i| self.filtered.get(i))
    }

    /// Set the active index. Out-of-range indices clear it.
    pub fn set_active(&mut self, index: Option<usize>) {
        self.active = index.filter(|i| *i < self.filtered.len());
    }

    /// Make the filtered item behind `handle` active.
    pub fn set_active_handle(&mut self, handle: ItemHandle) -> bool {
        match position_of(&self.filtered, handle) {
            Some(index) => {
                self.active = Some(index);
                true
            }
            None => false,
        }
    }

    /// Target the first item, if there is one.
    pub fn target_first(&mut self) {
        self.active = if self.filtered.is_empty() { None } else { Some(0) };
    }

    /// Move to the next item, wrapping. Returns the newly active handle.
    pub fn increment(&mut self) -> Option<ItemHandle> {
        self.active = increment(self.active, self.filtered.len());
        self.active_item().map(|d| d.handle)
    }

    /// Move to the previous item, wrapping. Returns the newly active handle.
    pub fn decrement(&mut self) -> Option<ItemHandle> {
        self.active = decrement(self.active, self.filtered.len());
        self.active_item().map(|d| d.handle)
    }

    pub fn is_active(&self, decorated: &DecoratedItem<T>) -> bool {
        self.active_item()
            .is_some_and(|active| active.handle == decorated.handle)
    }
}
