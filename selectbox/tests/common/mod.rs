#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use selectbox::prelude::*;
use simplelog::{Config, LevelFilter, TestLogger};

pub fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

pub fn fruits() -> Vec<String> {
    ["apple", "apricot", "banana", "blueberry", "cherry"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn display_string() -> DisplayFn<String> {
    Arc::new(|s: &String| s.clone())
}

/// In-memory environment recording every side effect.
#[derive(Debug, Default)]
pub struct FakeEnvironment {
    pub items: HashMap<ItemHandle, ItemGeometry>,
    pub list: Option<ListGeometry>,
    pub scrolls: Vec<u32>,
    pub focused: Vec<FocusTarget>,
    pub present: HashSet<FocusTarget>,
    pub selection_ranges: Vec<(usize, usize)>,
    pub rendered: HashMap<ItemHandle, String>,
}

impl FakeEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every focus target is mounted.
    pub fn mounted() -> Self {
        let mut env = Self::new();
        env.present.extend([
            FocusTarget::FilterInput,
            FocusTarget::List,
            FocusTarget::Combobox,
        ]);
        env
    }

    /// Lay items out in rows of `row_height` inside a list showing
    /// `visible_rows` rows.
    pub fn layout<T>(&mut self, items: &[DecoratedItem<T>], row_height: u32, visible_rows: u32) {
        self.items = items
            .iter()
            .enumerate()
            .map(|(i, d)| (d.handle, ItemGeometry::new(i as u32 * row_height, row_height)))
            .collect();
        self.list = Some(ListGeometry::new(0, row_height * visible_rows));
    }

    pub fn render<T>(&mut self, items: &[DecoratedItem<T>], text: impl Fn(&T) -> String) {
        self.rendered = items.iter().map(|d| (d.handle, text(&d.item))).collect();
    }
}

impl Environment for FakeEnvironment {
    fn item_geometry(&self, handle: ItemHandle) -> Option<ItemGeometry> {
        self.items.get(&handle).copied()
    }

    fn list_geometry(&self) -> Option<ListGeometry> {
        self.list
    }

    fn set_list_scroll_top(&mut self, scroll_top: u32) {
        if let Some(list) = self.list.as_mut() {
            list.scroll_top = scroll_top;
        }
        self.scrolls.push(scroll_top);
    }

    fn focus(&mut self, target: FocusTarget) -> bool {
        if self.present.contains(&target) {
            self.focused.push(target);
            true
        } else {
            false
        }
    }

    fn set_selection_range(&mut self, start: usize, end: usize) {
        self.selection_ranges.push((start, end));
    }

    fn rendered_text(&self, handle: ItemHandle) -> Option<String> {
        self.rendered.get(&handle).cloned()
    }
}
