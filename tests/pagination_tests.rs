// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use spendlens::pagination::{Pager, DEFAULT_PAGE_SIZE};
use spendlens::palette::{Palette, COLORS};

#[test]
fn twenty_five_items_make_three_pages() {
    let items: Vec<u32> = (1..=25).collect();
    let pager = Pager::default();
    assert_eq!(pager.per_page, DEFAULT_PAGE_SIZE);
    assert_eq!(pager.total_pages(items.len()), 3);

    assert_eq!(pager.slice(&items), &(1..=10).collect::<Vec<_>>()[..]);
    assert!(!pager.has_prev());
    assert!(pager.has_next(items.len()));

    let last = pager.next(items.len()).next(items.len());
    assert_eq!(last.page, 3);
    assert_eq!(last.slice(&items), &[21, 22, 23, 24, 25]);
    assert!(!last.has_next(items.len()));
    assert!(last.has_prev());

    // Next on the last page stays put
    assert_eq!(last.next(items.len()).page, 3);
}

#[test]
fn prev_stops_at_first_page() {
    let pager = Pager::default();
    assert_eq!(pager.prev().page, 1);
}

#[test]
fn empty_list_has_no_pages() {
    let items: Vec<u32> = Vec::new();
    let pager = Pager::default();
    assert_eq!(pager.total_pages(0), 0);
    assert!(!pager.has_next(0));
    assert!(pager.slice(&items).is_empty());
}

#[test]
fn page_past_end_is_empty() {
    let items: Vec<u32> = (1..=5).collect();
    let pager = Pager::new(10).go_to(1, 5);
    assert_eq!(pager.slice(&items), &[1, 2, 3, 4, 5]);
    let pager = Pager { page: 4, ..pager };
    assert!(pager.slice(&items).is_empty());
}

#[test]
fn go_to_clamps() {
    let pager = Pager::default();
    assert_eq!(pager.go_to(99, 25).page, 3);
    assert_eq!(pager.go_to(0, 25).page, 1);
    assert_eq!(pager.go_to(2, 25).page, 2);
    assert_eq!(pager.go_to(5, 0).page, 1);
}

#[test]
fn palette_memoizes_in_encounter_order() {
    let mut p = Palette::new();
    let shopping = p.color_for("Shopping");
    let groceries = p.color_for("Groceries");
    let again = p.color_for("Shopping");
    assert_eq!(shopping, again);
    assert_eq!(shopping, COLORS[0]);
    assert_eq!(groceries, COLORS[1]);
    assert_eq!(p.color_for("Fuel"), COLORS[2]);
}

#[test]
fn palette_cycles_when_exhausted() {
    let mut p = Palette::new();
    for i in 0..COLORS.len() {
        p.color_for(&format!("cat-{}", i));
    }
    assert_eq!(p.color_for("one more"), COLORS[0]);
    assert_eq!(p.color_for("cat-3"), COLORS[3]);
}
