// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;

#[test]
fn arrow_keys_step_one_view() {
    assert_eq!(nav_target("ArrowDown", 0, 5), Some(1));
    assert_eq!(nav_target("PageDown", 3, 5), Some(4));
    assert_eq!(nav_target("ArrowUp", 2, 5), Some(1));
    assert_eq!(nav_target("PageUp", 1, 5), Some(0));
    assert_eq!(nav_target("j", 0, 5), Some(1));
    assert_eq!(nav_target("K", 4, 5), Some(3));
}

#[test]
fn stepping_saturates_at_the_deck_edges() {
    assert_eq!(nav_target("ArrowDown", 4, 5), None);
    assert_eq!(nav_target("ArrowUp", 0, 5), None);
}

#[test]
fn home_and_end_jump_to_the_ends() {
    assert_eq!(nav_target("Home", 3, 5), Some(0));
    assert_eq!(nav_target("Home", 0, 5), None);
    assert_eq!(nav_target("End", 0, 5), Some(4));
    assert_eq!(nav_target("End", 4, 5), None);
}

#[test]
fn digits_address_views_directly() {
    assert_eq!(nav_target("1", 2, 5), Some(0));
    assert_eq!(nav_target("5", 0, 5), Some(4));
    assert_eq!(nav_target("3", 2, 5), None, "already on view 3");
    assert_eq!(nav_target("6", 0, 5), None, "past the deck");
    assert_eq!(nav_target("0", 0, 5), None);
}

#[test]
fn non_navigation_keys_are_ignored() {
    for key in ["a", "Escape", "Shift", " ", "Enter", "-12"] {
        assert_eq!(nav_target(key, 1, 5), None, "key {key:?}");
    }
}

#[test]
fn empty_deck_never_navigates() {
    assert_eq!(nav_target("ArrowDown", 0, 0), None);
}

#[test]
fn offset_targets_the_top_of_the_view() {
    assert_eq!(offset_for_view(0, 900.0), 0.0);
    assert_eq!(offset_for_view(3, 900.0), 2700.0);
}
