//! Selection values and commit semantics.
//!
//! The host owns the selection. Machines only compute the selection that
//! *would* result from committing an item and report it through a callback;
//! the host decides whether to keep it and syncs it back.

/// Selection mode for a select machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// At most one item
    #[default]
    Single,
    /// Any number of items, toggled individually
    Multiple,
}

/// A single value or an ordered list of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    /// Single-select: nothing, or one item.
    Single(Option<T>),
    /// Multi-select: items in the order they were added.
    Multiple(Vec<T>),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::Single(None)
    }
}

impl<T: Clone + PartialEq> Selection<T> {
    /// Empty selection for the given mode.
    pub fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single => Self::Single(None),
            SelectionMode::Multiple => Self::Multiple(Vec::new()),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        match self {
            Self::Single(_) => SelectionMode::Single,
            Self::Multiple(_) => SelectionMode::Multiple,
        }
    }

    /// Check if an item is selected.
    pub fn contains(&self, item: &T) -> bool {
        match self {
            Self::Single(selected) => selected.as_ref() == Some(item),
            Self::Multiple(selected) => selected.contains(item),
        }
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(selected) => selected.is_none(),
            Self::Multiple(selected) => selected.is_empty(),
        }
    }

    /// Number of selected items.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(selected) => usize::from(selected.is_some()),
            Self::Multiple(selected) => selected.len(),
        }
    }

    /// Selected items in order.
    pub fn items(&self) -> Vec<&T> {
        match self {
            Self::Single(selected) => selected.iter().collect(),
            Self::Multiple(selected) => selected.iter().collect(),
        }
    }

    /// The selection that results from committing `candidate`.
    ///
    /// Single mode replaces the value. Multiple mode removes the candidate if
    /// it is already selected, otherwise appends it.
    pub fn commit(&self, candidate: &T) -> Self {
        match self {
            Self::Single(_) => Self::Single(Some(candidate.clone())),
            Self::Multiple(selected) => {
                if selected.contains(candidate) {
                    Self::Multiple(
                        selected
                            .iter()
                            .filter(|item| *item != candidate)
                            .cloned()
                            .collect(),
                    )
                } else {
                    let mut next = selected.clone();
                    next.push(candidate.clone());
                    Self::Multiple(next)
                }
            }
        }
    }
}
