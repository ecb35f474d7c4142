//! Filtering of decorated items.

use std::cell::RefCell;
use std::sync::Arc;

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::env::Environment;
use crate::item::DecoratedItem;

/// Caller-supplied predicate: does `item` match the query string?
pub type ItemMatcher<T> = Arc<dyn Fn(&T, &str) -> bool>;

/// Caller-supplied accessor for an item's display text.
pub type DisplayFn<T> = Arc<dyn Fn(&T) -> String>;

/// Filter decorated items, preserving order.
///
/// An empty filter string returns the full list without consulting the
/// predicate.
pub fn filter_items<T: Clone>(
    items: &[DecoratedItem<T>],
    filter: &str,
    matches: impl Fn(&DecoratedItem<T>, &str) -> bool,
) -> Vec<DecoratedItem<T>> {
    if filter.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|decorated| matches(decorated, filter))
        .cloned()
        .collect()
}

/// How a machine decides whether an item matches a query.
///
/// The caller's matcher always wins. Without one, the default comparisons run
/// against the item's display text: the display accessor if there is one,
/// otherwise whatever text the host rendered for the item. The rendered-text
/// fallback only works for items that are already on screen.
pub struct Matching<T> {
    pub matcher: Option<ItemMatcher<T>>,
    pub display: Option<DisplayFn<T>>,
}

impl<T> Default for Matching<T> {
    fn default() -> Self {
        Self {
            matcher: None,
            display: None,
        }
    }
}

impl<T> Clone for Matching<T> {
    fn clone(&self) -> Self {
        Self {
            matcher: self.matcher.clone(),
            display: self.display.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Matching<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matching")
            .field("matcher", &self.matcher.is_some())
            .field("display", &self.display.is_some())
            .finish()
    }
}

impl<T> Matching<T> {
    /// Display text for an item, if any can be found.
    pub fn display_text<E: Environment + ?Sized>(
        &self,
        decorated: &DecoratedItem<T>,
        env: &E,
    ) -> Option<String> {
        match &self.display {
            Some(display) => Some(display(&decorated.item)),
            None => env.rendered_text(decorated.handle),
        }
    }

    /// Filter predicate: the matcher, or a case-insensitive substring match
    /// of the trimmed filter string.
    pub fn matches_filter<E: Environment + ?Sized>(
        &self,
        decorated: &DecoratedItem<T>,
        filter: &str,
        env: &E,
    ) -> bool {
        if let Some(matcher) = &self.matcher {
            return matcher(&decorated.item, filter);
        }
        self.display_text(decorated, env)
            .is_some_and(|text| contains_ignore_case(&text, filter.trim()))
    }

    /// Type-ahead and autocomplete predicate: the matcher, or a
    /// case-insensitive prefix match.
    pub fn matches_prefix<E: Environment + ?Sized>(
        &self,
        decorated: &DecoratedItem<T>,
        query: &str,
        env: &E,
    ) -> bool {
        if let Some(matcher) = &self.matcher {
            return matcher(&decorated.item, query);
        }
        self.display_text(decorated, env)
            .is_some_and(|text| starts_with_ignore_case(&text, query))
    }
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub(crate) fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack.to_lowercase().starts_with(&prefix.to_lowercase())
}

/// Matcher: case-insensitive substring of the trimmed query.
pub fn substring_matcher<T: 'static>(display: impl Fn(&T) -> String + 'static) -> ItemMatcher<T> {
    Arc::new(move |item: &T, query: &str| contains_ignore_case(&display(item), query.trim()))
}

/// Matcher: case-insensitive prefix.
pub fn prefix_matcher<T: 'static>(display: impl Fn(&T) -> String + 'static) -> ItemMatcher<T> {
    Arc::new(move |item: &T, query: &str| starts_with_ignore_case(&display(item), query))
}

/// Matcher: fuzzy match using nucleo-matcher.
///
/// Only decides membership; filtering still keeps the source order.
///
/// # Example
///
/// ```ignore
/// let matcher = fuzzy_matcher(|s: &String| s.clone());
/// assert!(matcher(&"apricot".to_string(), "apt"));
/// ```
pub fn fuzzy_matcher<T: 'static>(display: impl Fn(&T) -> String + 'static) -> ItemMatcher<T> {
    let matcher = RefCell::new(Matcher::new(Config::DEFAULT));
    Arc::new(move |item: &T, query: &str| {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        let pattern = Pattern::new(
            query,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );
        let label = display(item);
        let mut buf = Vec::new();
        let haystack = Utf32Str::new(&label, &mut buf);
        let mut matcher = matcher.borrow_mut();
        pattern.score(haystack, &mut *matcher).is_some()
    })
}
