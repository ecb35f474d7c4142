mod common;

use std::cell::RefCell;
use std::rc::Rc;

use selectbox::prelude::*;

use common::{FakeEnvironment, display_string, init_logging};

struct Harness {
    machine: ComboboxMachine<String, FakeEnvironment>,
    commits: Rc<RefCell<Vec<String>>>,
    values: Rc<RefCell<Vec<String>>>,
}

fn combobox(items: &[&str], options: ComboboxOptions) -> Harness {
    init_logging();
    let commits = Rc::new(RefCell::new(Vec::new()));
    let values = Rc::new(RefCell::new(Vec::new()));
    let commit_log = commits.clone();
    let value_log = values.clone();

    let machine = ComboboxMachineBuilder::new()
        .items(items.iter().map(|s| s.to_string()))
        .display(display_string())
        .options(options)
        .on_select(move |item: &String| commit_log.borrow_mut().push(item.clone()))
        .on_value_change(move |value| value_log.borrow_mut().push(value.to_string()))
        .env(FakeEnvironment::mounted())
        .build();

    Harness {
        machine,
        commits,
        values,
    }
}

fn inline() -> ComboboxOptions {
    ComboboxOptions::default().inline_autocomplete(true)
}

fn names(items: &[DecoratedItem<String>]) -> Vec<&str> {
    items.iter().map(|d| d.item.as_str()).collect()
}

#[test]
fn test_typing_opens_and_filters_by_prefix() {
    let mut h = combobox(&["apple", "Apricot", "banana"], ComboboxOptions::default());
    assert!(!h.machine.is_open());

    h.machine.change_value("ap");
    assert!(h.machine.is_open());
    assert_eq!(names(h.machine.filtered_items()), vec!["apple", "Apricot"]);
    assert_eq!(h.machine.value(), "ap");
    assert_eq!(h.machine.stem_value(), "ap");
    assert_eq!(h.machine.active_index(), None);
    assert_eq!(*h.values.borrow(), vec!["ap".to_string()]);
}

#[test]
fn test_auto_target_first_item() {
    let mut h = combobox(
        &["apple", "apricot", "banana"],
        ComboboxOptions::default().auto_target_first_item(true),
    );
    h.machine.change_value("b");
    assert_eq!(h.machine.active_item().map(|d| d.item.as_str()), Some("banana"));

    h.machine.change_value("z");
    assert_eq!(h.machine.active_index(), None);
}

#[test]
fn test_inline_autocomplete_completes_with_suffix_selected() {
    let mut h = combobox(&["first", "fourth"], inline());

    h.machine.change_value("f");
    assert_eq!(h.machine.value(), "first");
    assert_eq!(h.machine.stem_value(), "f");
    assert_eq!(h.machine.active_index(), Some(0));

    h.machine.poll_timers();
    assert_eq!(h.machine.env().selection_ranges, vec![(1, 5)]);
}

#[test]
fn test_deleting_suggestion_keeps_stem() {
    let mut h = combobox(&["first", "fourth"], inline());
    h.machine.change_value("f");

    // Backspace removes the selected suffix
    h.machine.change_value("f");
    assert_eq!(h.machine.value(), "f");

    h.machine.change_value("");
    assert_eq!(h.machine.value(), "");
    assert_eq!(h.machine.filtered_items().len(), 2);
}

#[test]
fn test_backspace_below_stem_does_not_complete() {
    let mut h = combobox(&["first", "fourth"], inline());
    h.machine.change_value("f");
    h.machine.change_value("fo");
    assert_eq!(h.machine.value(), "fourth");
    assert_eq!(h.machine.stem_value(), "fo");

    h.machine.change_value("f");
    assert_eq!(h.machine.value(), "f");
    assert_eq!(h.machine.stem_value(), "f");
}

#[test]
fn test_completion_keeps_typed_casing() {
    let mut h = combobox(&["First", "fourth"], inline());
    h.machine.change_value("f");
    assert_eq!(h.machine.active_item().map(|d| d.item.as_str()), Some("First"));
    assert_eq!(h.machine.value(), "first");
    assert_eq!(h.machine.stem_value(), "f");

    h.machine.poll_timers();
    assert_eq!(h.machine.env().selection_ranges, vec![(1, 5)]);
}

#[test]
fn test_no_completion_when_active_text_does_not_extend_value() {
    init_logging();
    let mut machine = ComboboxMachineBuilder::new()
        .items(["brief".to_string()])
        .display(display_string())
        .matcher(fuzzy_matcher(|s: &String| s.clone()))
        .options(inline())
        .env(FakeEnvironment::mounted())
        .build();

    machine.change_value("bf");
    assert_eq!(machine.active_item().map(|d| d.item.as_str()), Some("brief"));
    assert_eq!(machine.value(), "bf");
}

#[test]
fn test_fresh_entry_after_commit_completes() {
    let mut h = combobox(&["first", "second"], inline());
    h.machine.change_value("f");
    h.machine.key_down(&KeyCombo::key(Key::Enter));
    assert_eq!(h.machine.value(), "first");

    h.machine.change_value("s");
    assert_eq!(h.machine.value(), "second");
    assert_eq!(h.machine.stem_value(), "s");
}

#[test]
fn test_backspace_after_commit_does_not_complete() {
    let mut h = combobox(&["first", "second"], inline());
    h.machine.change_value("f");
    h.machine.key_down(&KeyCombo::key(Key::Enter));

    h.machine.change_value("firs");
    assert_eq!(h.machine.value(), "firs");

    // The next longer edit completes again
    h.machine.change_value("first");
    assert_eq!(h.machine.value(), "first");
}

#[test]
fn test_selection_range_uses_char_offsets() {
    let mut h = combobox(&["été", "étage"], inline());
    h.machine.change_value("ét");
    assert_eq!(h.machine.value(), "été");
    h.machine.poll_timers();
    assert_eq!(h.machine.env().selection_ranges, vec![(2, 3)]);
}

#[test]
fn test_without_inline_selection_range_untouched() {
    let mut h = combobox(&["first"], ComboboxOptions::default());
    h.machine.change_value("f");
    h.machine.poll_timers();
    assert!(h.machine.env().selection_ranges.is_empty());
}

#[test]
fn test_enter_commits_active_item() {
    let mut h = combobox(&["first", "fourth"], inline());
    h.machine.change_value("f");
    h.machine.key_down(&KeyCombo::key(Key::Down));
    assert_eq!(h.machine.active_item().map(|d| d.item.as_str()), Some("fourth"));

    h.machine.key_down(&KeyCombo::key(Key::Enter));
    assert!(!h.machine.is_open());
    assert_eq!(h.machine.value(), "fourth");
    assert_eq!(*h.commits.borrow(), vec!["fourth".to_string()]);
    // Selection range collapsed to the end
    assert_eq!(h.machine.env().selection_ranges.last(), Some(&(6, 6)));
    assert_eq!(h.machine.active_index(), None);
    assert_eq!(h.machine.filtered_items().len(), 2);
}

#[test]
fn test_enter_without_active_item_is_noop() {
    let mut h = combobox(&["first"], ComboboxOptions::default());
    h.machine.change_value("f");
    h.machine.key_down(&KeyCombo::key(Key::Enter));
    assert!(h.machine.is_open());
    assert!(h.commits.borrow().is_empty());
}

#[test]
fn test_escape_reverts_to_stem() {
    let mut h = combobox(&["first", "fourth"], inline());
    h.machine.change_value("f");
    assert_eq!(h.machine.value(), "first");

    h.machine.key_down(&KeyCombo::key(Key::Escape));
    assert!(!h.machine.is_open());
    assert_eq!(h.machine.value(), "f");
    assert_eq!(h.values.borrow().last().map(String::as_str), Some("f"));
    assert!(h.commits.borrow().is_empty());
}

#[test]
fn test_blur_and_tab_close_without_commit() {
    for close in [ComboboxEvent::Blur, ComboboxEvent::Tab] {
        let mut h = combobox(&["first"], ComboboxOptions::default().auto_target_first_item(true));
        h.machine.change_value("f");
        h.machine.send(close);
        assert!(!h.machine.is_open());
        assert_eq!(h.machine.value(), "f");
        assert!(h.commits.borrow().is_empty());
        assert!(h.machine.timers().is_empty());
    }
}

#[test]
fn test_click_item_commits() {
    let mut h = combobox(&["first", "fourth"], ComboboxOptions::default());
    h.machine.change_value("f");
    let fourth = h.machine.filtered_items()[1].handle;
    h.machine.click_item(fourth);

    assert!(!h.machine.is_open());
    assert_eq!(h.machine.value(), "fourth");
    assert_eq!(*h.commits.borrow(), vec!["fourth".to_string()]);
}

#[test]
fn test_hover_and_other_keys() {
    let mut h = combobox(&["a1", "a2", "a3", "a4"], ComboboxOptions::default());
    let items = h.machine.items().to_vec();
    h.machine.env_mut().layout(&items, 10, 2);

    h.machine.change_value("a");
    h.machine.hover_item(items[3].handle);
    assert_eq!(h.machine.active_index(), Some(3));
    assert!(h.machine.env().scrolls.is_empty());

    // Cursor keys keep the active item in view
    h.machine.key_down(&KeyCombo::key(Key::Left));
    assert_eq!(h.machine.env().scrolls, vec![20]);
}

#[test]
fn test_focus_on_open() {
    let mut h = combobox(&["first"], ComboboxOptions::default());
    h.machine.change_value("f");
    h.machine.poll_timers();
    assert_eq!(h.machine.env().focused, vec![FocusTarget::Combobox]);
}

#[test]
fn test_items_update_refilters_with_typed_value() {
    let mut h = combobox(&["apple", "banana"], ComboboxOptions::default());
    h.machine.change_value("b");
    h.machine.key_down(&KeyCombo::key(Key::Down));

    h.machine.sync_items(["blackberry", "banana", "cherry"].map(String::from));
    assert_eq!(names(h.machine.filtered_items()), vec!["blackberry", "banana"]);
    assert_eq!(h.machine.active_item().map(|d| d.item.as_str()), Some("banana"));
}

#[test]
fn test_items_update_while_closed_shows_all() {
    let mut h = combobox(&["apple"], ComboboxOptions::default());
    h.machine.sync_items(["kiwi", "lime"].map(String::from));
    assert_eq!(names(h.machine.filtered_items()), vec!["kiwi", "lime"]);
}

#[test]
fn test_keys_ignored_while_closed() {
    let mut h = combobox(&["first"], ComboboxOptions::default());
    h.machine.key_down(&KeyCombo::key(Key::Down));
    assert!(!h.machine.is_open());
    assert_eq!(h.machine.active_index(), None);
}

#[test]
fn test_teardown() {
    let mut h = combobox(&["first"], inline());
    h.machine.change_value("f");
    h.machine.teardown();
    assert!(h.machine.timers().is_empty());

    h.machine.change_value("fi");
    assert_eq!(h.machine.value(), "first");
    h.machine.poll_timers();
    assert!(h.machine.env().selection_ranges.is_empty());
}
