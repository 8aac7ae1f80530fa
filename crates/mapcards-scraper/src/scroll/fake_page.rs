//! In-memory page for scroll tests.

use std::sync::{Mutex, MutexGuard};

use super::page::{Overflow, ScrollExtent, ScrollPage, ScrollTarget};
use super::selectors::ITEM_COUNT_SELECTORS;
use crate::error::SelectorError;

/// Ids at or above this are item placeholders, never containers.
const ITEM_ID_BASE: usize = 10_000;

#[derive(Debug, Clone)]
pub(crate) struct FakeElement {
    pub id: usize,
    /// Selector list this element answers to, if any.
    pub matches: Option<&'static str>,
    pub overflow: Overflow,
    pub extent: ScrollExtent,
    pub has_results: bool,
}

impl FakeElement {
    pub(crate) fn scrollable(id: usize, matches: Option<&'static str>) -> Self {
        Self {
            id,
            matches,
            overflow: Overflow::Auto,
            extent: ScrollExtent {
                scroll_top: 0.0,
                client_height: 600.0,
                scroll_height: 5_000.0,
            },
            has_results: true,
        }
    }
}

#[derive(Debug)]
pub(crate) struct FakeState {
    /// Matched by the first item selector group.
    pub items: usize,
    /// Items appended per scroll step.
    pub items_per_step: usize,
    pub rejected_selector: Option<&'static str>,
    pub elements: Vec<FakeElement>,
    pub document: ScrollExtent,
    pub viewport_height: f64,
    pub scrolls: Vec<(ScrollTarget<usize>, f64)>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            items: 0,
            items_per_step: 0,
            rejected_selector: None,
            elements: Vec::new(),
            document: ScrollExtent {
                scroll_top: 0.0,
                client_height: 1_000.0,
                scroll_height: 100_000.0,
            },
            viewport_height: 1_000.0,
            scrolls: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakePage {
    state: Mutex<FakeState>,
}

impl FakePage {
    pub(crate) fn new(state: FakeState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }
}

impl ScrollPage for FakePage {
    type Element = usize;

    fn query_all(&self, selector: &str) -> Result<Vec<usize>, SelectorError> {
        let state = self.state();
        if state.rejected_selector == Some(selector) {
            return Err(SelectorError {
                selector: selector.to_owned(),
                reason: "rejected by fake".to_owned(),
            });
        }
        if selector == ITEM_COUNT_SELECTORS[0] {
            return Ok((ITEM_ID_BASE..ITEM_ID_BASE + state.items).collect());
        }
        Ok(state
            .elements
            .iter()
            .filter(|el| el.matches == Some(selector))
            .map(|el| el.id)
            .collect())
    }

    fn all_elements(&self) -> Vec<usize> {
        self.state().elements.iter().map(|el| el.id).collect()
    }

    fn overflow_y(&self, element: &usize) -> Overflow {
        self.state()
            .elements
            .iter()
            .find(|el| el.id == *element)
            .map_or(Overflow::Visible, |el| el.overflow)
    }

    fn extent(&self, element: &usize) -> ScrollExtent {
        self.state()
            .elements
            .iter()
            .find(|el| el.id == *element)
            .map_or_else(ScrollExtent::default, |el| el.extent)
    }

    fn contains(&self, element: &usize, _selector: &str) -> Result<bool, SelectorError> {
        Ok(self
            .state()
            .elements
            .iter()
            .any(|el| el.id == *element && el.has_results))
    }

    fn document_extent(&self) -> ScrollExtent {
        self.state().document
    }

    fn viewport_height(&self) -> f64 {
        self.state().viewport_height
    }

    fn scroll_by(&self, target: &ScrollTarget<usize>, dy: f64) {
        let mut state = self.state();
        match target {
            ScrollTarget::Element(id) => {
                if let Some(el) = state.elements.iter_mut().find(|el| el.id == *id) {
                    el.extent.scroll_top += dy;
                }
            }
            ScrollTarget::Document => state.document.scroll_top += dy,
        }
        let grown = state.items_per_step;
        state.items += grown;
        state.scrolls.push((target.clone(), dy));
    }
}
