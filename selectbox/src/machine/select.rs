//! Listbox select machine.
//!
//! Drives single-selects, multi-selects and filterable selects. The host
//! renders a trigger, an optional filter input and a list; it forwards input
//! to the machine and reads view data back.
//!
//! # Example
//!
//! ```ignore
//! let mut select = SelectMachineBuilder::new()
//!     .items(vec!["first", "second", "third"])
//!     .selection(Selection::Single(None))
//!     .on_select(|item, next| println!("{item} -> {next:?}"))
//!     .env(NullEnvironment)
//!     .build()?;
//!
//! select.click_trigger();
//! select.key_down(&KeyCombo::key(Key::Down));
//! select.key_down(&KeyCombo::key(Key::Enter));
//! ```

use log::{debug, trace};
use tokio::time::Instant;

use crate::env::{Environment, FocusTarget};
use crate::error::ConfigError;
use crate::filter::{DisplayFn, ItemMatcher, Matching, filter_items};
use crate::item::{DecoratedItem, ItemHandle};
use crate::keybinds::{Key, KeyCombo};
use crate::list::ListState;
use crate::navigation::adjust_scroll;
use crate::options::SelectOptions;
use crate::selection::Selection;
use crate::timers::{TimerKind, Timers};
use crate::typeahead::TypeAhead;

use super::{HasEnv, MachineId, NeedsEnv, Status};

/// Callback invoked with the committed item and the resulting selection.
pub type OnSelect<T> = Box<dyn FnMut(&T, &Selection<T>)>;

/// Callback invoked when the filter string should change.
pub type OnFilterChange = Box<dyn FnMut(&str)>;

/// Events understood by [`SelectMachine`].
#[derive(Debug, Clone, PartialEq)]
pub enum SelectEvent<T> {
    /// The trigger was clicked.
    ClickTrigger,
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Enter.
    Enter,
    /// Space. Opens when closed, commits when open.
    Space,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// A printable key typed at the trigger or list.
    TypeAhead(char),
    /// A rendered item was clicked.
    ClickItem(ItemHandle),
    /// The pointer moved over a rendered item.
    HoverItem(ItemHandle),
    /// The user edited the filter input.
    FilterChanged(String),
    /// The host echoes its filter string (controlled filter string).
    FilterStringUpdated(String),
    /// The host's selection changed.
    SelectionUpdated(Selection<T>),
    /// The host's item list changed.
    ItemsUpdated(Vec<T>),
}

/// Classify a key pressed on the trigger or list.
pub fn classify_key<T>(key: &KeyCombo) -> Option<SelectEvent<T>> {
    if key.modifiers.is_chord() {
        return None;
    }
    if !key.is_navigation() {
        return key.key.printable().map(SelectEvent::TypeAhead);
    }
    match key.key {
        Key::Up => Some(SelectEvent::ArrowUp),
        Key::Down => Some(SelectEvent::ArrowDown),
        Key::Enter => Some(SelectEvent::Enter),
        Key::Escape => Some(SelectEvent::Escape),
        Key::Tab => Some(SelectEvent::Tab),
        _ => Some(SelectEvent::Space),
    }
}

/// Classify a key pressed in the filter input.
///
/// Text keys are left to the input; its edits arrive as `FilterChanged`.
pub fn classify_filter_key<T>(key: &KeyCombo) -> Option<SelectEvent<T>> {
    if key.modifiers.is_chord() {
        return None;
    }
    match key.key {
        Key::Up => Some(SelectEvent::ArrowUp),
        Key::Down => Some(SelectEvent::ArrowDown),
        Key::Enter => Some(SelectEvent::Enter),
        Key::Escape => Some(SelectEvent::Escape),
        Key::Tab => Some(SelectEvent::Tab),
        _ => None,
    }
}

/// State machine for a listbox select.
pub struct SelectMachine<T, E> {
    id: MachineId,
    status: Status,
    list: ListState<T>,
    selection: Selection<T>,
    filter_string: String,
    typeahead: TypeAhead,
    timers: Timers,
    options: SelectOptions,
    matching: Matching<T>,
    env: E,
    on_select: Option<OnSelect<T>>,
    on_filter_change: Option<OnFilterChange>,
    disposed: bool,
}

impl<T: std::fmt::Debug, E: std::fmt::Debug> std::fmt::Debug for SelectMachine<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectMachine")
            .field("id", &self.id)
            .field("status", &self.status)
            .field("list", &self.list)
            .field("selection", &self.selection)
            .field("filter_string", &self.filter_string)
            .field("typeahead", &self.typeahead)
            .field("timers", &self.timers)
            .field("options", &self.options)
            .field("matching", &self.matching)
            .field("env", &self.env)
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug, E: Environment> SelectMachine<T, E> {
    // -------------------------------------------------------------------------
    // View data
    // -------------------------------------------------------------------------

    pub fn id(&self) -> MachineId {
        self.id
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// All items, decorated.
    pub fn items(&self) -> &[DecoratedItem<T>] {
        self.list.items()
    }

    /// Items passing the current filter, in source order.
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

    pub fn is_item_selected(&self, decorated: &DecoratedItem<T>) -> bool {
        self.selection.contains(&decorated.item)
    }

    /// The last selection synced from the host.
    pub fn selection(&self) -> &Selection<T> {
        &self.selection
    }

    pub fn filter_string(&self) -> &str {
        &self.filter_string
    }

    /// Current type-ahead buffer.
    pub fn ephemeral_string(&self) -> &str {
        self.typeahead.as_str()
    }

    pub fn options(&self) -> &SelectOptions {
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

    // -------------------------------------------------------------------------
    // Entry points
    // -------------------------------------------------------------------------

    /// Process one event to completion.
    pub fn send(&mut self, event: SelectEvent<T>) {
        if self.disposed {
            trace!("[{}] disposed, dropping {:?}", self.id, event);
            return;
        }
        let now = Instant::now();
        self.fire_due_timers(now);
        self.transition(event, now);
    }

    /// Route a key pressed on the trigger or list. Returns true if the key
    /// mapped to an event.
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

    /// Route a key pressed in the filter input.
    pub fn filter_key_down(&mut self, key: &KeyCombo) -> bool {
        match classify_filter_key(key) {
            Some(event) => {
                self.send(event);
                true
            }
            None => false,
        }
    }

    pub fn click_trigger(&mut self) {
        self.send(SelectEvent::ClickTrigger);
    }

    pub fn click_item(&mut self, handle: ItemHandle) {
        self.send(SelectEvent::ClickItem(handle));
    }

    pub fn hover_item(&mut self, handle: ItemHandle) {
        self.send(SelectEvent::HoverItem(handle));
    }

    pub fn change_filter(&mut self, filter: impl Into<String>) {
        self.send(SelectEvent::FilterChanged(filter.into()));
    }

    pub fn sync_filter_string(&mut self, filter: impl Into<String>) {
        self.send(SelectEvent::FilterStringUpdated(filter.into()));
    }

    pub fn sync_selection(&mut self, selection: Selection<T>) {
        self.send(SelectEvent::SelectionUpdated(selection));
    }

    pub fn sync_items(&mut self, items: impl IntoIterator<Item = T>) {
        self.send(SelectEvent::ItemsUpdated(items.into_iter().collect()));
    }

    /// Fire every timer that is due.
    pub fn poll_timers(&mut self) {
        if self.disposed {
            return;
        }
        self.fire_due_timers(Instant::now());
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    fn transition(&mut self, event: SelectEvent<T>, now: Instant) {
        match (self.status, event) {
            (Status::Closed, SelectEvent::ClickTrigger | SelectEvent::Space) => {
                self.enter_open(now);
            }
            (Status::Open, SelectEvent::ClickTrigger | SelectEvent::Escape | SelectEvent::Tab) => {
                self.exit_open();
            }
            (Status::Open, SelectEvent::ArrowUp) => {
                if let Some(handle) = self.list.decrement() {
                    adjust_scroll(&mut self.env, handle);
                }
            }
            (Status::Open, SelectEvent::ArrowDown) => {
                if let Some(handle) = self.list.increment() {
                    adjust_scroll(&mut self.env, handle);
                }
            }
            (Status::Open, SelectEvent::Enter | SelectEvent::Space) => {
                match self.can_select_item() {
                    Some(item) => {
                        self.commit(&item);
                        self.exit_open();
                    }
                    None => trace!("[{}] no active item, ignoring commit key", self.id),
                }
            }
            (Status::Open, SelectEvent::ClickItem(handle)) => {
                match self.list.find(handle).map(|d| d.item.clone()) {
                    Some(item) => {
                        self.commit(&item);
                        self.exit_open();
                    }
                    None => debug!("[{}] click on unknown item {}", self.id, handle),
                }
            }
            (Status::Open, SelectEvent::HoverItem(handle)) => {
                if !self.list.set_active_handle(handle) {
                    trace!("[{}] hover on item {} outside the filtered list", self.id, handle);
                }
            }
            (Status::Open, SelectEvent::FilterChanged(filter)) => {
                self.handle_filter_changed(filter);
            }
            (Status::Open, SelectEvent::TypeAhead(c)) => {
                self.type_ahead(c, now);
            }
            (_, SelectEvent::FilterStringUpdated(filter)) => {
                if filter != self.filter_string {
                    self.filter_string = filter;
                    self.refilter();
                }
            }
            (_, SelectEvent::SelectionUpdated(selection)) => {
                trace!("[{}] selection synced: {:?}", self.id, selection);
                self.selection = selection;
            }
            (_, SelectEvent::ItemsUpdated(items)) => {
                if self.list.set_items(items) {
                    debug!("[{}] items updated: {}", self.id, self.list.items().len());
                    self.refilter();
                }
            }
            (status, event) => {
                trace!("[{}] {:?} ignored while {:?}", self.id, event, status);
            }
        }
    }

    /// Entry actions for the open state.
    fn enter_open(&mut self, now: Instant) {
        debug!("[{}] open", self.id);
        self.status = Status::Open;
        self.timers.schedule(TimerKind::Focus, now, self.options.focus_delay);
        if self.options.auto_target_first_item {
            self.list.target_first();
        }
    }

    /// Exit actions for the open state.
    ///
    /// Runs for every way of closing so the widget always reopens clean.
    fn exit_open(&mut self) {
        debug!("[{}] close", self.id);
        self.status = Status::Closed;

        self.timers.cancel(TimerKind::TypeAheadReset);
        self.timers.cancel(TimerKind::Focus);
        self.typeahead.reset();

        self.filter_string.clear();
        if let Some(on_filter_change) = self.on_filter_change.as_mut() {
            on_filter_change("");
        }

        self.list.reset();
    }

    /// Guard for keyboard commits: the active item, if any.
    fn can_select_item(&self) -> Option<T> {
        self.list.active_item().map(|d| d.item.clone())
    }

    fn commit(&mut self, item: &T) {
        let next = self.selection.commit(item);
        debug!("[{}] commit {:?} -> {:?}", self.id, item, next);
        if let Some(on_select) = self.on_select.as_mut() {
            on_select(item, &next);
        }
    }

    fn handle_filter_changed(&mut self, filter: String) {
        if let Some(on_filter_change) = self.on_filter_change.as_mut() {
            on_filter_change(&filter);
        }
        if self.options.filter_string_controlled {
            // Applied when the host echoes it back
            trace!("[{}] controlled filter string, awaiting sync", self.id);
            return;
        }
        self.filter_string = filter;
        self.refilter();
    }

    /// Recompute the filtered view from the items and the filter string.
    fn refilter(&mut self) {
        let filtered = if self.options.filtering_controlled {
            self.list.items().to_vec()
        } else {
            let matching = &self.matching;
            let env = &self.env;
            filter_items(self.list.items(), &self.filter_string, |d, f| {
                matching.matches_filter(d, f, env)
            })
        };
        let auto_target = self.options.auto_target_first_item && self.status.is_open();
        self.list.set_filtered(filtered, auto_target);
    }

    fn type_ahead(&mut self, c: char, now: Instant) {
        self.typeahead.push(c);
        self.timers
            .schedule(TimerKind::TypeAheadReset, now, self.options.typeahead_timeout);

        let matching = &self.matching;
        let env = &self.env;
        let found = self
            .typeahead
            .find(self.list.filtered(), |d, q| matching.matches_prefix(d, q, env));

        match found {
            Some(index) => {
                self.list.set_active(Some(index));
                if let Some(handle) = self.list.active_item().map(|d| d.handle) {
                    adjust_scroll(&mut self.env, handle);
                }
            }
            None => trace!(
                "[{}] no match for {:?}, keeping active item",
                self.id,
                self.typeahead.as_str()
            ),
        }
    }

    fn fire_due_timers(&mut self, now: Instant) {
        for kind in self.timers.take_due(now) {
            trace!("[{}] timer {:?} fired", self.id, kind);
            match kind {
                TimerKind::Focus => {
                    if self.status.is_open() && !self.env.focus(FocusTarget::FilterInput) {
                        self.env.focus(FocusTarget::List);
                    }
                }
                TimerKind::TypeAheadReset => self.typeahead.reset(),
                TimerKind::SelectionRange => {}
            }
        }
    }
}

impl<T, E> SelectMachine<T, E> {
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

impl<T, E> Drop for SelectMachine<T, E> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Builder for [`SelectMachine`].
///
/// Uses typestate to enforce `env()` is called before `build()`.
pub struct SelectMachineBuilder<T, S = NeedsEnv> {
    env: S,
    items: Vec<T>,
    selection: Selection<T>,
    filter_string: String,
    options: SelectOptions,
    matching: Matching<T>,
    on_select: Option<OnSelect<T>>,
    on_filter_change: Option<OnFilterChange>,
}

impl<T> Default for SelectMachineBuilder<T, NeedsEnv> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SelectMachineBuilder<T, NeedsEnv> {
    pub fn new() -> Self {
        Self {
            env: NeedsEnv,
            items: Vec::new(),
            selection: Selection::Single(None),
            filter_string: String::new(),
            options: SelectOptions::default(),
            matching: Matching::default(),
            on_select: None,
            on_filter_change: None,
        }
    }

    /// Set the environment. Required before calling `build()`.
    pub fn env<E: Environment>(self, env: E) -> SelectMachineBuilder<T, HasEnv<E>> {
        SelectMachineBuilder {
            env: HasEnv(env),
            items: self.items,
            selection: self.selection,
            filter_string: self.filter_string,
            options: self.options,
            matching: self.matching,
            on_select: self.on_select,
            on_filter_change: self.on_filter_change,
        }
    }
}

impl<T, S> SelectMachineBuilder<T, S> {
    pub fn items(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.items = items.into_iter().collect();
        self
    }

    /// Initial selection. Its variant decides single or multiple mode.
    pub fn selection(mut self, selection: Selection<T>) -> Self {
        self.selection = selection;
        self
    }

    /// Initial filter string.
    pub fn filter_string(mut self, filter: impl Into<String>) -> Self {
        self.filter_string = filter.into();
        self
    }

    pub fn options(mut self, options: SelectOptions) -> Self {
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

    pub fn on_select(mut self, f: impl FnMut(&T, &Selection<T>) + 'static) -> Self {
        self.on_select = Some(Box::new(f));
        self
    }

    pub fn on_filter_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_filter_change = Some(Box::new(f));
        self
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug, E: Environment> SelectMachineBuilder<T, HasEnv<E>> {
    /// Validate the options and build the machine.
    pub fn build(self) -> Result<SelectMachine<T, E>, ConfigError> {
        self.options.validate(self.matching.matcher.is_some())?;

        let mut machine = SelectMachine {
            id: MachineId::new(),
            status: Status::Closed,
            list: ListState::new(self.items),
            selection: self.selection,
            filter_string: self.filter_string,
            typeahead: TypeAhead::new(),
            timers: Timers::new(),
            options: self.options,
            matching: self.matching,
            env: self.env.0,
            on_select: self.on_select,
            on_filter_change: self.on_filter_change,
            disposed: false,
        };
        if !machine.filter_string.is_empty() {
            machine.refilter();
        }
        debug!(
            "[{}] select built: {} items, {:?}",
            machine.id,
            machine.list.items().len(),
            machine.options
        );
        Ok(machine)
    }
}
