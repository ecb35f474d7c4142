//! Item decoration.
//!
//! Every item shown by a machine is paired with an [`ItemHandle`]. The handle
//! carries no state of its own; the host uses it to associate a rendered
//! element with the item so the machine can ask for that element's geometry
//! or rendered text through the environment.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Opaque handle for a decorated item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemHandle(usize);

impl ItemHandle {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ItemHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__item_{}", self.0)
    }
}

/// An item paired with its handle.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratedItem<T> {
    /// The application's item.
    pub item: T,
    /// Handle used for measurement and focus only.
    pub handle: ItemHandle,
}

impl<T> DecoratedItem<T> {
    /// Decorate a single item with a fresh handle.
    pub fn new(item: T) -> Self {
        Self {
            item,
            handle: ItemHandle::new(),
        }
    }
}

/// Decorate a list of items, one fresh handle per item, order preserved.
pub fn decorate<T>(items: impl IntoIterator<Item = T>) -> Vec<DecoratedItem<T>> {
    items.into_iter().map(DecoratedItem::new).collect()
}

/// Find the position of a handle in a decorated list.
pub fn position_of<T>(items: &[DecoratedItem<T>], handle: ItemHandle) -> Option<usize> {
    items.iter().position(|d| d.handle == handle)
}
