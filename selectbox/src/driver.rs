//! Async driver.
//!
//! Feeds a stream of events into a machine and fires its timers at their
//! deadlines, for hosts that already run on tokio.

use futures::{Stream, StreamExt};
use log::{debug, trace};
use tokio::time::{Instant, sleep_until};

use crate::env::Environment;
use crate::machine::combobox::{ComboboxEvent, ComboboxMachine};
use crate::machine::select::{SelectEvent, SelectMachine};

/// A machine the driver can run.
pub trait Drive {
    type Event;

    fn send(&mut self, event: Self::Event);

    fn poll_timers(&mut self);

    fn next_deadline(&self) -> Option<Instant>;

    fn teardown(&mut self);
}

impl<T: Clone + PartialEq + std::fmt::Debug, E: Environment> Drive for SelectMachine<T, E> {
    type Event = SelectEvent<T>;

    fn send(&mut self, event: Self::Event) {
        SelectMachine::send(self, event);
    }

    fn poll_timers(&mut self) {
        SelectMachine::poll_timers(self);
    }

    fn next_deadline(&self) -> Option<Instant> {
        SelectMachine::next_deadline(self)
    }

    fn teardown(&mut self) {
        SelectMachine::teardown(self);
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug, E: Environment> Drive for ComboboxMachine<T, E> {
    type Event = ComboboxEvent<T>;

    fn send(&mut self, event: Self::Event) {
        ComboboxMachine::send(self, event);
    }

    fn poll_timers(&mut self) {
        ComboboxMachine::poll_timers(self);
    }

    fn next_deadline(&self) -> Option<Instant> {
        ComboboxMachine::next_deadline(self)
    }

    fn teardown(&mut self) {
        ComboboxMachine::teardown(self);
    }
}

/// Sleep until the deadline, or forever if there is none.
///
/// This is used as a conditional branch in tokio::select!
async fn sleep_until_optional(deadline: Option<Instant>) {
    match deadline {
        Some(d) => sleep_until(d).await,
        None => std::future::pending::<()>().await,
    }
}

/// Run a machine until the event stream ends, then tear it down.
pub async fn run<M, S>(machine: &mut M, mut events: S)
where
    M: Drive,
    S: Stream<Item = M::Event> + Unpin,
{
    debug!("Driver started");
    loop {
        let next_deadline = machine.next_deadline();

        tokio::select! {
            event = events.next() => match event {
                Some(event) => machine.send(event),
                None => break,
            },
            _ = sleep_until_optional(next_deadline) => {
                trace!("Driver: deadline reached");
                machine.poll_timers();
            }
        }
    }
    machine.teardown();
    debug!("Driver stopped");
}
