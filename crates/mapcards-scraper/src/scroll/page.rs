use crate::error::SelectorError;

/// Computed `overflow-y` of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Clip,
    Scroll,
    Auto,
}

impl Overflow {
    #[must_use]
    pub fn allows_scrolling(self) -> bool {
        matches!(self, Self::Scroll | Self::Auto)
    }
}

/// Vertical scroll geometry in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollExtent {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl ScrollExtent {
    /// Content is taller than the visible box.
    #[must_use]
    pub fn overflows(&self) -> bool {
        self.scroll_height > self.client_height
    }

    /// The visible bottom edge is within `threshold` pixels of the content end.
    #[must_use]
    pub fn is_near_end(&self, threshold: f64) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - threshold
    }
}

/// What a scroll step moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget<E> {
    Element(E),
    Document,
}

/// The page surface the scroll driver needs.
///
/// Implementations bridge to a real document (a browser binding, a headless
/// session) or to a fake in tests. Calls are synchronous and must not block.
pub trait ScrollPage: Send + Sync + 'static {
    type Element: Clone + Send + Sync + 'static;

    /// Elements matching a CSS selector list, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] when the page rejects the selector.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Element>, SelectorError>;

    /// Every element in the document, in document order.
    fn all_elements(&self) -> Vec<Self::Element>;

    fn overflow_y(&self, element: &Self::Element) -> Overflow;

    fn extent(&self, element: &Self::Element) -> ScrollExtent;

    /// Whether `element` has a descendant matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] when the page rejects the selector.
    fn contains(&self, element: &Self::Element, selector: &str) -> Result<bool, SelectorError>;

    /// Whole-document geometry: viewport height, window scroll offset and
    /// body scroll height.
    fn document_extent(&self) -> ScrollExtent;

    fn viewport_height(&self) -> f64;

    fn scroll_by(&self, target: &ScrollTarget<Self::Element>, dy: f64);
}
