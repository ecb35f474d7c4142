//! Headless state machines for dropdown widgets.
//!
//! `selectbox` implements the interaction logic shared by listbox selects,
//! multi-selects, filterable selects and comboboxes: open/closed status,
//! active-item targeting, filtering, keyboard routing, type-ahead,
//! scroll-into-view and selection commits. Rendering stays with the host,
//! which reads view data back from the machine and supplies measurement,
//! focus and text-selection capabilities through [`env::Environment`].

pub mod driver;
pub mod env;
pub mod error;
pub mod events;
pub mod filter;
pub mod item;
pub mod keybinds;
pub mod list;
pub mod machine;
pub mod navigation;
pub mod options;
pub mod selection;
pub mod timers;
pub mod typeahead;

pub mod prelude {
    pub use crate::driver::{Drive, run};
    pub use crate::env::{Environment, FocusTarget, ItemGeometry, ListGeometry, NullEnvironment};
    pub use crate::error::ConfigError;
    pub use crate::events::convert_key_event;
    pub use crate::filter::{
        DisplayFn, ItemMatcher, Matching, filter_items, fuzzy_matcher, prefix_matcher, substring_matcher,
    };
    pub use crate::item::{DecoratedItem, ItemHandle, decorate};
    pub use crate::keybinds::{Key, KeyCombo, Modifiers};
    pub use crate::machine::combobox::{ComboboxEvent, ComboboxMachine, ComboboxMachineBuilder};
    pub use crate::machine::select::{SelectEvent, SelectMachine, SelectMachineBuilder};
    pub use crate::machine::{MachineId, Status};
    pub use crate::navigation::{adjust_scroll, decrement, increment, scroll_adjustment};
    pub use crate::options::{ComboboxOptions, SelectOptions};
    pub use crate::selection::{Selection, SelectionMode};
    pub use crate::timers::{TimerKind, Timers};
    pub use crate::typeahead::TypeAhead;
}
