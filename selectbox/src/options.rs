//! Machine options.
//!
//! Options are plain data so a host can load them from its own configuration
//! files. Durations are serialized as milliseconds.

use serde::Deserialize;
use tokio::time::Duration;

use crate::error::ConfigError;
use crate::typeahead::DEFAULT_TIMEOUT;

/// Options for a [`SelectMachine`](crate::machine::select::SelectMachine).
///
/// # Example
///
/// ```ignore
/// let options = SelectOptions::default()
///     .auto_target_first_item(true)
///     .filter_string_controlled(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectOptions {
    /// Target the first item on open and whenever the filtered list changes.
    pub auto_target_first_item: bool,

    /// The host owns the filter string and echoes changes back with
    /// `sync_filter_string`.
    pub filter_string_controlled: bool,

    /// The host passes already-filtered items; the machine does no filtering.
    pub filtering_controlled: bool,

    /// Inactivity before the type-ahead buffer resets.
    #[serde(rename = "typeahead_timeout_ms", with = "millis")]
    pub typeahead_timeout: Duration,

    /// Delay between opening and the focus request.
    #[serde(rename = "focus_delay_ms", with = "millis")]
    pub focus_delay: Duration,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            auto_target_first_item: false,
            filter_string_controlled: false,
            filtering_controlled: false,
            typeahead_timeout: DEFAULT_TIMEOUT,
            focus_delay: Duration::ZERO,
        }
    }
}

impl SelectOptions {
    pub fn auto_target_first_item(mut self, enabled: bool) -> Self {
        self.auto_target_first_item = enabled;
        self
    }

    pub fn filter_string_controlled(mut self, controlled: bool) -> Self {
        self.filter_string_controlled = controlled;
        self
    }

    pub fn filtering_controlled(mut self, controlled: bool) -> Self {
        self.filtering_controlled = controlled;
        self
    }

    pub fn typeahead_timeout(mut self, timeout: Duration) -> Self {
        self.typeahead_timeout = timeout;
        self
    }

    pub fn focus_delay(mut self, delay: Duration) -> Self {
        self.focus_delay = delay;
        self
    }

    /// Check the options for contradictions.
    pub fn validate(&self, has_matcher: bool) -> Result<(), ConfigError> {
        if self.typeahead_timeout.is_zero() {
            return Err(ConfigError::ZeroTypeAheadTimeout);
        }
        if self.filtering_controlled && has_matcher {
            return Err(ConfigError::MatcherWithControlledFiltering);
        }
        Ok(())
    }
}

/// Options for a [`ComboboxMachine`](crate::machine::combobox::ComboboxMachine).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ComboboxOptions {
    /// Target the first match whenever the value changes.
    pub auto_target_first_item: bool,

    /// Complete the value to the active item's text, with the completed
    /// suffix selected so the next keystroke replaces it.
    pub inline_autocomplete: bool,

    /// Delay between opening and the focus request.
    #[serde(rename = "focus_delay_ms", with = "millis")]
    pub focus_delay: Duration,
}

impl Default for ComboboxOptions {
    fn default() -> Self {
        Self {
            auto_target_first_item: false,
            inline_autocomplete: false,
            focus_delay: Duration::ZERO,
        }
    }
}

impl ComboboxOptions {
    pub fn auto_target_first_item(mut self, enabled: bool) -> Self {
        self.auto_target_first_item = enabled;
        self
    }

    pub fn inline_autocomplete(mut self, enabled: bool) -> Self {
        self.inline_autocomplete = enabled;
        self
    }

    pub fn focus_delay(mut self, delay: Duration) -> Self {
        self.focus_delay = delay;
        self
    }

    /// Inline completion always targets the first match.
    pub(crate) fn targets_first_item(&self) -> bool {
        self.auto_target_first_item || self.inline_autocomplete
    }
}

mod millis {
    use serde::{Deserialize, Deserializer};
    use tokio::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
