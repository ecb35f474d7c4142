//! The select and combobox state machines.
//!
//! Both machines follow the same shape: a two-state [`Status`], a transition
//! function matching on `(status, event)`, entry/exit actions for the open
//! state, and a [`Timers`](crate::timers::Timers) map for deferred work.
//! Every public entry point first fires the timers that are already due, so
//! deferred actions always happen before the next event is handled.

pub mod combobox;
pub mod select;

use uuid::Uuid;

/// Unique identifier for a machine instance, used in log output.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct MachineId(Uuid);

impl MachineId {
    /// Create a new unique machine ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MachineId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MachineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Open/closed status of a dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Status {
    #[default]
    Closed,
    Open,
}

impl Status {
    pub fn is_open(&self) -> bool {
        matches!(self, Status::Open)
    }
}

/// Typestate marker: builder still needs an environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeedsEnv;

/// Typestate marker: builder has an environment.
#[derive(Debug, Clone)]
pub struct HasEnv<E>(pub(crate) E);
