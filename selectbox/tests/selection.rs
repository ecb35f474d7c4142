use selectbox::prelude::*;

#[test]
fn test_single_commit_replaces() {
    let selection = Selection::Single(Some("apple"));
    let next = selection.commit(&"banana");
    assert_eq!(next, Selection::Single(Some("banana")));
    // Never mutates in place
    assert_eq!(selection, Selection::Single(Some("apple")));
}

#[test]
fn test_single_commit_of_selected_item_keeps_it() {
    let selection = Selection::Single(Some("apple"));
    assert_eq!(selection.commit(&"apple"), Selection::Single(Some("apple")));
}

#[test]
fn test_multiple_commit_appends_in_order() {
    let selection = Selection::Multiple(vec!["cherry"]);
    let next = selection.commit(&"apple");
    assert_eq!(next, Selection::Multiple(vec!["cherry", "apple"]));
}

#[test]
fn test_multiple_commit_toggles_off() {
    let selection = Selection::Multiple(vec!["cherry", "apple", "banana"]);
    let next = selection.commit(&"apple");
    assert_eq!(next, Selection::Multiple(vec!["cherry", "banana"]));
}

#[test]
fn test_multiple_commit_twice_restores() {
    let selection = Selection::Multiple(vec!["a", "b"]);
    assert_eq!(selection.commit(&"c").commit(&"c"), selection);
}

#[test]
fn test_queries() {
    let empty: Selection<u8> = Selection::empty(SelectionMode::Multiple);
    assert!(empty.is_empty());
    assert_eq!(empty.mode(), SelectionMode::Multiple);

    let single = Selection::Single(Some(3u8));
    assert!(single.contains(&3));
    assert!(!single.contains(&4));
    assert_eq!(single.len(), 1);
    assert_eq!(single.items(), vec![&3]);
    assert_eq!(Selection::<u8>::default(), Selection::Single(None));
}
