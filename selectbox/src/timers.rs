//! Keyed deadlines for deferred machine work.
//!
//! Each kind of timer has at most one pending deadline. Scheduling a kind
//! that is already pending replaces it, which is how a keypress cancels and
//! reschedules the type-ahead reset instead of stacking timers.

use std::collections::HashMap;

use log::trace;
use tokio::time::{Duration, Instant};

/// The deferred actions a machine can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    /// Focus the filter input, list or combobox after opening.
    Focus,
    /// Clear the type-ahead buffer after inactivity.
    TypeAheadReset,
    /// Apply the inline-autocomplete text selection.
    SelectionRange,
}

/// Pending deadlines by kind.
#[derive(Debug, Clone, Default)]
pub struct Timers {
    pending: HashMap<TimerKind, Instant>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire `delay` after `now`, replacing any pending
    /// deadline of the same kind.
    pub fn schedule(&mut self, kind: TimerKind, now: Instant, delay: Duration) {
        let deadline = now + delay;
        if self.pending.insert(kind, deadline).is_some() {
            trace!("Rescheduled {:?} timer", kind);
        }
    }

    /// Cancel a pending timer. Returns true if one was pending.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.pending.remove(&kind).is_some()
    }

    /// Cancel every pending timer.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    /// Remove and return every timer due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerKind> {
        let mut due: Vec<(Instant, TimerKind)> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(kind, deadline)| (*deadline, *kind))
            .collect();
        due.sort();

        for (_, kind) in &due {
            self.pending.remove(kind);
        }
        due.into_iter().map(|(_, kind)| kind).collect()
    }
}
