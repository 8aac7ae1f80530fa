//! Item counting and results-container discovery.

use mapcards_core::ScrollOptions;

use super::page::{ScrollPage, ScrollTarget};
use super::selectors::{CONTAINER_SELECTORS, ITEM_COUNT_SELECTORS, RESULT_ITEM_SELECTOR};

/// Sum of matches across every item selector group. Rejected selectors
/// count as zero.
pub(crate) fn count_items<P: ScrollPage>(page: &P) -> usize {
    ITEM_COUNT_SELECTORS
        .iter()
        .map(|selector| match page.query_all(selector) {
            Ok(elements) => elements.len(),
            Err(e) => {
                tracing::trace!(error = %e, "skipping item selector");
                0
            }
        })
        .sum()
}

/// First element, by selector priority then document order, that scrolls
/// and holds result items. Falls back to scanning the whole document.
pub(crate) fn find_results_container<P: ScrollPage>(page: &P) -> Option<P::Element> {
    for selector in CONTAINER_SELECTORS {
        let elements = match page.query_all(selector) {
            Ok(elements) => elements,
            Err(e) => {
                tracing::trace!(error = %e, "skipping container selector");
                continue;
            }
        };
        if let Some(found) = elements
            .into_iter()
            .find(|el| is_results_container(page, el))
        {
            return Some(found);
        }
    }

    let fallback = page
        .all_elements()
        .into_iter()
        .find(|el| is_results_container(page, el));
    if fallback.is_none() {
        tracing::debug!("no scrollable results container; falling back to document");
    }
    fallback
}

fn is_results_container<P: ScrollPage>(page: &P, element: &P::Element) -> bool {
    page.overflow_y(element).allows_scrolling()
        && page.extent(element).overflows()
        && page
            .contains(element, RESULT_ITEM_SELECTOR)
            .unwrap_or(false)
}

pub(crate) fn resolve_target<P: ScrollPage>(page: &P) -> ScrollTarget<P::Element> {
    find_results_container(page).map_or(ScrollTarget::Document, ScrollTarget::Element)
}

/// End-of-content check against the container threshold or, for the
/// document fallback, the document threshold.
pub(crate) fn is_near_end<P: ScrollPage>(
    page: &P,
    target: &ScrollTarget<P::Element>,
    options: &ScrollOptions,
) -> bool {
    match target {
        ScrollTarget::Element(el) => page
            .extent(el)
            .is_near_end(options.container_end_threshold),
        ScrollTarget::Document => page
            .document_extent()
            .is_near_end(options.document_end_threshold),
    }
}

#[cfg(test)]
#[path = "container_test.rs"]
mod tests;
