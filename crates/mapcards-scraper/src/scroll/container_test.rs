use mapcards_core::ScrollOptions;

use super::super::fake_page::{FakeElement, FakePage, FakeState};
use super::super::page::{Overflow, ScrollExtent, ScrollTarget};
use super::super::selectors::{CONTAINER_SELECTORS, ITEM_COUNT_SELECTORS};
use super::*;

#[test]
fn count_items_skips_rejected_selectors() {
    let page = FakePage::new(FakeState {
        items: 7,
        rejected_selector: Some(ITEM_COUNT_SELECTORS[2]),
        ..FakeState::default()
    });
    assert_eq!(count_items(&page), 7);
}

#[test]
fn count_items_sums_across_groups() {
    let page = FakePage::new(FakeState {
        items: 3,
        elements: vec![FakeElement::scrollable(1, Some(ITEM_COUNT_SELECTORS[3]))],
        ..FakeState::default()
    });
    assert_eq!(count_items(&page), 4);
}

#[test]
fn priority_selector_wins_over_document_order() {
    let page = FakePage::new(FakeState {
        elements: vec![
            FakeElement::scrollable(1, Some(CONTAINER_SELECTORS[2])),
            FakeElement::scrollable(2, Some(CONTAINER_SELECTORS[1])),
        ],
        ..FakeState::default()
    });
    assert_eq!(find_results_container(&page), Some(2));
}

#[test]
fn non_scrollable_or_empty_candidates_are_skipped() {
    let mut hidden = FakeElement::scrollable(1, Some(CONTAINER_SELECTORS[0]));
    hidden.overflow = Overflow::Hidden;
    let mut short = FakeElement::scrollable(2, Some(CONTAINER_SELECTORS[0]));
    short.extent = ScrollExtent {
        scroll_top: 0.0,
        client_height: 600.0,
        scroll_height: 600.0,
    };
    let mut empty = FakeElement::scrollable(3, Some(CONTAINER_SELECTORS[0]));
    empty.has_results = false;
    let good = FakeElement::scrollable(4, Some(CONTAINER_SELECTORS[3]));

    let page = FakePage::new(FakeState {
        elements: vec![hidden, short, empty, good],
        ..FakeState::default()
    });
    assert_eq!(find_results_container(&page), Some(4));
}

#[test]
fn falls_back_to_scanning_all_elements() {
    let page = FakePage::new(FakeState {
        elements: vec![FakeElement::scrollable(9, None)],
        ..FakeState::default()
    });
    assert_eq!(resolve_target(&page), ScrollTarget::Element(9));
}

#[test]
fn falls_back_to_document_when_nothing_scrolls() {
    let mut el = FakeElement::scrollable(1, Some(CONTAINER_SELECTORS[0]));
    el.overflow = Overflow::Visible;
    let page = FakePage::new(FakeState {
        elements: vec![el],
        ..FakeState::default()
    });
    assert_eq!(resolve_target(&page), ScrollTarget::Document);
}

#[test]
fn near_end_uses_threshold_for_the_target_kind() {
    let mut el = FakeElement::scrollable(1, Some(CONTAINER_SELECTORS[0]));
    // 60px from the end: outside the container threshold.
    el.extent = ScrollExtent {
        scroll_top: 340.0,
        client_height: 600.0,
        scroll_height: 1_000.0,
    };
    let page = FakePage::new(FakeState {
        elements: vec![el],
        // Also 60px from the end: inside the document threshold.
        document: ScrollExtent {
            scroll_top: 340.0,
            client_height: 600.0,
            scroll_height: 1_000.0,
        },
        ..FakeState::default()
    });
    let options = ScrollOptions::default();

    assert!(!is_near_end(&page, &ScrollTarget::Element(1), &options));
    assert!(is_near_end(&page, &ScrollTarget::Document, &options));
}
