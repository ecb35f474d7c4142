use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use selectbox::machine::{combobox, select};
use selectbox::prelude::*;

#[test]
fn test_convert_plain_keys() {
    let event = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
    assert_eq!(convert_key_event(event), Some(KeyCombo::key(Key::Down)));

    let event = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
    assert_eq!(convert_key_event(event), Some(KeyCombo::key(Key::Space)));

    let event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
    assert_eq!(convert_key_event(event), Some(KeyCombo::key(Key::Char('x'))));
}

#[test]
fn test_convert_modifiers() {
    let event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
    assert_eq!(
        convert_key_event(event),
        Some(KeyCombo::key(Key::Char('a')).ctrl())
    );
}

#[test]
fn test_convert_backtab() {
    let event = KeyEvent::new(KeyCode::BackTab, KeyModifiers::NONE);
    assert_eq!(convert_key_event(event), Some(KeyCombo::key(Key::Tab).shift()));
}

#[test]
fn test_release_ignored() {
    let event = KeyEvent::new_with_kind(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Release);
    assert_eq!(convert_key_event(event), None);
}

#[test]
fn test_unsupported_key() {
    let event = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
    assert_eq!(convert_key_event(event), None);
}

#[test]
fn test_navigation_keys() {
    for key in [Key::Up, Key::Down, Key::Enter, Key::Escape, Key::Tab, Key::Space] {
        assert!(key.is_navigation(), "{key:?}");
        assert_eq!(key.printable(), None);
    }
    assert_eq!(Key::char('q').printable(), Some('q'));
    assert!(!Key::Backspace.is_navigation());
}

#[test]
fn test_select_key_classification() {
    assert_eq!(
        select::classify_key::<u8>(&KeyCombo::key(Key::Space)),
        Some(SelectEvent::Space)
    );
    assert_eq!(
        select::classify_key::<u8>(&KeyCombo::key(Key::Char(' '))),
        Some(SelectEvent::Space)
    );
    assert_eq!(
        select::classify_key::<u8>(&KeyCombo::key(Key::Char('Q'))),
        Some(SelectEvent::TypeAhead('Q'))
    );
    assert_eq!(
        select::classify_key::<u8>(&KeyCombo::key(Key::Char('q')).ctrl()),
        None
    );
    assert_eq!(select::classify_key::<u8>(&KeyCombo::key(Key::Home)), None);
}

#[test]
fn test_filter_input_routes_navigation_only() {
    assert_eq!(
        select::classify_filter_key::<u8>(&KeyCombo::key(Key::Enter)),
        Some(SelectEvent::Enter)
    );
    assert_eq!(
        select::classify_filter_key::<u8>(&KeyCombo::key(Key::Char('a'))),
        None
    );
    assert_eq!(
        select::classify_filter_key::<u8>(&KeyCombo::key(Key::Space)),
        None
    );
}

#[test]
fn test_combobox_key_classification() {
    assert_eq!(
        combobox::classify_key::<u8>(&KeyCombo::key(Key::Escape)),
        Some(ComboboxEvent::Escape)
    );
    assert_eq!(
        combobox::classify_key::<u8>(&KeyCombo::key(Key::Left)),
        Some(ComboboxEvent::OtherKey)
    );
    assert_eq!(
        combobox::classify_key::<u8>(&KeyCombo::key(Key::Up).alt()),
        None
    );
}
