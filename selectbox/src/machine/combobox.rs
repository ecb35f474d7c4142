//! Combobox machine.
//!
//! A free-text input doubles as trigger and filter field. Typing opens the
//! list, filters it by prefix and, with inline autocomplete, completes the
//! value to the first match with the completed suffix selected.

use log::{debug, trace};
use tokio::time::Instant;

use crate::env::{Environment, FocusTarget};
use crate::filter::{DisplayFn, ItemMatcher, Matching, filter_items};
use crate::item::{DecoratedItem, ItemHandle};
use crate::keybinds::{Key, KeyCombo};
use crate::list::ListState;
use crate::navigation::adjust_scroll;
use crate::options::ComboboxOptions;
use crate::timers::{TimerKind, Timers};

use super::{HasEnv, MachineId, NeedsEnv, Status};

/// Callback invoked with the committed item.
pub type OnCommit<T> = Box<dyn FnMut(&T)>;

/// Callback invoked whenever the input value changes.
pub type OnValueChange = Box<dyn FnMut(&str)>;

/// Events understood by [`ComboboxMachine`].
#[derive(Debug, Clone, PartialEq)]
pub enum ComboboxEvent<T> {
    /// The user edited the input.
    ValueChanged(String),
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Tab,
    /// The input lost focus.
    Blur,
    /// Any other key pressed in the input.
    OtherKey,
    ClickItem(ItemHandle),
    HoverItem(ItemHandle),
    ItemsUpdated(Vec<T>),
}

/// Classify a key pressed in the combobox input.
pub fn classify_key<T>(key: &KeyCombo) -> Option<ComboboxEvent<T>> {
    if key.modifiers.is_chord() {
        return None;
    }
    Some(match key.key {
        Key::Up => ComboboxEvent::ArrowUp,
        Key::Down => ComboboxEvent::ArrowDown,
        Key::Enter => ComboboxEvent::Enter,
        Key::Escape => ComboboxEvent::Escape,
        Key::Tab => ComboboxEvent::Tab,
        _ => ComboboxEvent::OtherKey,
    })
}

/// State machine for a combobox.
pub struct ComboboxMachine<T, E> {
    id: MachineId,
    status: Status,
    list: ListState<T>,
    /// What the input shows, including any completed suffix.
    value: String,
    /// What the user actually typed.
    stem: String,
    /// The stem holds committed text rather than typed text.
    committed: bool,
    timers: Timers,
    options: ComboboxOptions,
    matching: Matching<T>,
    env: E,
    on_select: Option<OnCommit<T>>,
    on_value_change: Option<OnValueChange>,
    disposed: bool,
}

impl<T: std::fmt::Debug, E: std::fmt::Debug> std::fmt::Debug for ComboboxMachine<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComboboxMachine")
            .field("id", &self.id)
            .field("status", &self.status)
            .field("list", &self.list)
            .field("value", &self.value)
            .field("stem", &self.stem)
            .field("committed", &self.committed)
            .field("timers", &self.timers)
            .field("options", &self.options)
            .field("matching", &self.matching)
            .field("env", &self.env)
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug, E: Environment> ComboboxMachine<T, E> {
    pub fn id(&self) -> MachineId {
        self.id
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    pub fn items(&self) -> &[DecoratedItem<T>] {
        self.list.items()
    }

    pub fn filtered_items(&self) -> &[DecoratedItem<T>] {
        self.list.filtered()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.list.active_index()
    }

    pub fn active_item(&self) -> Option<&DecoratedItem<T>> {
        self.list.active_item()
    }

    pub fn is_item_active(&self, decorated: &DecoratedItem<T>) -> bool {
        self.list.is_active(decorated)
    }

    /// The value shown in the input.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The part of the value the user typed; the rest is completion.
    pub fn stem_value(&self) -> &str {
        &self.stem
    }

    pub fn options(&self) -> &ComboboxOptions {
        &self.options
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Process one event to completion.
    pub fn send(&mut self, event: ComboboxEvent<T>) {
        if self.disposed {
            trace!("[{}] disposed, dropping {:?}", self.id, event);
            return;
        }
        let now = Instant::now();
        self.fire_due_timers(now);
        self.transition(event, now);
    }

    /// Route a key pressed in the input. Returns true if the key mapped to
    /// an event.
    pub fn key_down(&mut self, key: &KeyCombo) -> bool {
        match classify_key(key) {
            Some(event) => {
                self.send(event);
                true
            }
            None => {
                trace!("[{}] unrouted key {:?}", self.id, key);
                false
            }
        }
    }

    pub fn change_value(&mut self, value: impl Into<String>) {
        self.send(ComboboxEvent::ValueChanged(value.into()));
    }

    pub fn blur(&mut self) {
        self.send(ComboboxEvent::Blur);
    }

    pub fn click_item(&mut self, handle: ItemHandle) {
        self.send(ComboboxEvent::ClickItem(handle));
    }

    pub fn hover_item(&mut self, handle: ItemHandle) {
        self.send(ComboboxEvent::HoverItem(handle));
    }

    pub fn sync_items(&mut self, items: impl IntoIterator<Item = T>) {
        self.send(ComboboxEvent::ItemsUpdated(items.into_iter().collect()));
    }

    pub fn poll_timers(&mut self) {
        if self.disposed {
            return;
        }
        self.fire_due_timers(Instant::now());
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    fn transition(&mut self, event: ComboboxEvent<T>, now: Instant) {
        match (self.status, event) {
            (Status::Closed, ComboboxEvent::ValueChanged(value)) => {
                self.enter_open(now);
                self.update_value(value, now);
            }
            (Status::Open, ComboboxEvent::ValueChanged(value)) => {
                self.update_value(value, now);
            }
            (Status::Open, ComboboxEvent::ArrowUp) => {
                if let Some(handle) = self.list.decrement() {
                    adjust_scroll(&mut self.env, handle);
                }
            }
            (Status::Open, ComboboxEvent::ArrowDown) => {
                if let Some(handle) = self.list.increment() {
                    adjust_scroll(&mut self.env, handle);
                }
            }
            (Status::Open, ComboboxEvent::Enter) => {
                let Some(active) = self.list.active_item().cloned() else {
                    trace!("[{}] no active item, ignoring enter", self.id);
                    return;
                };
                self.accept(&active);
                if self.options.inline_autocomplete {
                    let end = self.value.chars().count();
                    self.env.set_selection_range(end, end);
                }
                self.exit_open();
            }
            (Status::Open, ComboboxEvent::Escape) => {
                if self.value != self.stem {
                    self.value = self.stem.clone();
                    self.notify_value();
                }
                self.exit_open();
            }
            (Status::Open, ComboboxEvent::Tab | ComboboxEvent::Blur) => {
                self.exit_open();
            }
            (Status::Open, ComboboxEvent::ClickItem(handle)) => {
                match self.list.find(handle).cloned() {
                    Some(clicked) => {
                        self.accept(&clicked);
                        self.exit_open();
                    }
                    None => debug!("[{}] click on unknown item {}", self.id, handle),
                }
            }
            (Status::Open, ComboboxEvent::HoverItem(handle)) => {
                self.list.set_active_handle(handle);
            }
            (Status::Open, ComboboxEvent::OtherKey) => {
                if let Some(handle) = self.list.active_item().map(|d| d.handle) {
                    adjust_scroll(&mut self.env, handle);
                }
            }
            (status, ComboboxEvent::ItemsUpdated(items)) => {
                if self.list.set_items(items) {
                    debug!("[{}] items updated: {}", self.id, self.list.items().len());
                    if status.is_open() {
                        self.refilter();
                    } else {
                        self.list.reset();
                    }
                }
            }
            (status, event) => {
                trace!("[{}] {:?} ignored while {:?}", self.id, event, status);
            }
        }
    }

    fn enter_open(&mut self, now: Instant) {
        debug!("[{}] open", self.id);
        self.status = Status::Open;
        self.timers.schedule(TimerKind::Focus, now, self.options.focus_delay);
    }

    fn exit_open(&mut self) {
        debug!("[{}] close", self.id);
        self.status = Status::Closed;
        self.timers.cancel(TimerKind::SelectionRange);
        self.timers.cancel(TimerKind::Focus);
        self.list.reset();
    }

    /// Apply a value typed by the user.
    fn update_value(&mut self, typed: String, now: Instant) {
        self.stem_refilter(&typed);

        let value = if !self.options.inline_autocomplete
            || typed == self.stem
            || self.is_backspace(&typed)
        {
            typed.clone()
        } else {
            self.completion_for(&typed).unwrap_or_else(|| typed.clone())
        };
        trace!("[{}] typed {:?}, value {:?}", self.id, typed, value);

        self.value = value;
        self.stem = typed;
        self.committed = false;
        self.notify_value();

        self.timers.schedule(TimerKind::SelectionRange, now, tokio::time::Duration::ZERO);
    }

    /// Typed text got shorter than the stem.
    ///
    /// After a commit the stem is the committed text, so only edits that
    /// trim it count; a fresh short entry still completes.
    fn is_backspace(&self, typed: &str) -> bool {
        typed.chars().count() < self.stem.chars().count()
            && (!self.committed || self.stem.starts_with(typed))
    }

    /// `typed` followed by the rest of the active item's display text, if
    /// that text starts with `typed` ignoring case.
    fn completion_for(&self, typed: &str) -> Option<String> {
        let active = self.list.active_item()?;
        let text = self.matching.display_text(active, &self.env)?;

        let mut rest = text.chars();
        for typed_char in typed.chars() {
            let text_char = rest.next()?;
            if !text_char.to_lowercase().eq(typed_char.to_lowercase()) {
                return None;
            }
        }

        let mut completed = typed.to_string();
        completed.extend(rest);
        Some(completed)
    }

    fn stem_refilter(&mut self, typed: &str) {
        let matching = &self.matching;
        let env = &self.env;
        let filtered = filter_items(self.list.items(), typed, |d, q| matching.matches_prefix(d, q, env));
        self.list.set_filtered(filtered, self.options.targets_first_item());
    }

    fn refilter(&mut self) {
        let stem = self.stem.clone();
        self.stem_refilter(&stem);
    }

    /// Take an item's display text as the value and report the commit.
    fn accept(&mut self, decorated: &DecoratedItem<T>) {
        let text = self
            .matching
            .display_text(decorated, &self.env)
            .unwrap_or_else(|| self.value.clone());
        debug!("[{}] commit {:?} as {:?}", self.id, decorated.item, text);

        let changed = text != self.value;
        self.value = text;
        self.stem = self.value.clone();
        self.committed = true;
        if changed {
            self.notify_value();
        }
        if let Some(on_select) = self.on_select.as_mut() {
            on_select(&decorated.item);
        }
    }

    fn notify_value(&mut self) {
        if let Some(on_value_change) = self.on_value_change.as_mut() {
            on_value_change(&self.value);
        }
    }

    fn fire_due_timers(&mut self, now: Instant) {
        for kind in self.timers.take_due(now) {
            trace!("[{}] timer {:?} fired", self.id, kind);
            match kind {
                TimerKind::Focus => {
                    if self.status.is_open() {
                        self.env.focus(FocusTarget::Combobox);
                    }
                }
                TimerKind::SelectionRange => {
                    if self.options.inline_autocomplete {
                        let start = self.stem.chars().count();
                        let end = self.value.chars().count();
                        if start <= end {
                            self.env.set_selection_range(start, end);
                        }
                    }
                }
                TimerKind::TypeAheadReset => {}
            }
        }
    }
}

impl<T, E> ComboboxMachine<T, E> {
    /// Cancel every pending timer and stop accepting events.
    pub fn teardown(&mut self) {
        if !self.disposed {
            debug!("[{}] teardown, cancelling {} timers", self.id, self.timers.len());
            self.timers.cancel_all();
            self.disposed = true;
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl<T, E> Drop for ComboboxMachine<T, E> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Builder for [`ComboboxMachine`].
pub struct ComboboxMachineBuilder<T, S = NeedsEnv> {
    env: S,
    items: Vec<T>,
    value: String,
    options: ComboboxOptions,
    matching: Matching<T>,
    on_select: Option<OnCommit<T>>,
    on_value_change: Option<OnValueChange>,
}

impl<T> Default for ComboboxMachineBuilder<T, NeedsEnv> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ComboboxMachineBuilder<T, NeedsEnv> {
    pub fn new() -> Self {
        Self {
            env: NeedsEnv,
            items: Vec::new(),
            value: String::new(),
            options: ComboboxOptions::default(),
            matching: Matching::default(),
            on_select: None,
            on_value_change: None,
        }
    }

    /// Set the environment. Required before calling `build()`.
    pub fn env<E: Environment>(self, env: E) -> ComboboxMachineBuilder<T, HasEnv<E>> {
        ComboboxMachineBuilder {
            env: HasEnv(env),
            items: self.items,
            value: self.value,
            options: self.options,
            matching: self.matching,
            on_select: self.on_select,
            on_value_change: self.on_value_change,
        }
    }
}

impl<T, S> ComboboxMachineBuilder<T, S> {
    pub fn items(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.items = items.into_iter().collect();
        self
    }

    /// Initial input value.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn options(mut self, options: ComboboxOptions) -> Self {
        self.options = options;
        self
    }

    pub fn matcher(mut self, matcher: ItemMatcher<T>) -> Self {
        self.matching.matcher = Some(matcher);
        self
    }

    pub fn display(mut self, display: DisplayFn<T>) -> Self {
        self.matching.display = Some(display);
        self
    }

    pub fn on_select(mut self, f: impl FnMut(&T) + 'static) -> Self {
        self.on_select = Some(Box::new(f));
        self
    }

    pub fn on_value_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_value_change = Some(Box::new(f));
        self
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug, E: Environment> ComboboxMachineBuilder<T, HasEnv<E>> {
    pub fn build(self) -> ComboboxMachine<T, E> {
        let machine = ComboboxMachine {
            id: MachineId::new(),
            status: Status::Closed,
            list: ListState::new(self.items),
            stem: self.value.clone(),
            value: self.value,
            committed: false,
            timers: Timers::new(),
            options: self.options,
            matching: self.matching,
            env: self.env.0,
            on_select: self.on_select,
            on_value_change: self.on_value_change,
            disposed: false,
        };
        debug!(
            "[{}] combobox built: {} items, {:?}",
            machine.id,
            machine.list.items().len(),
            machine.options
        );
        machine
    }
}
