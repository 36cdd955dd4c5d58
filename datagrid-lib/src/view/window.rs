//! Virtualization window: which rows of a scrolled list must be materialized.

use std::ops::Range;

/// Rows rendered beyond each edge of the viewport by default.
pub const DEFAULT_OVERSCAN: usize = 3;

/// Distance from the bottom, in pixels, below which more rows should load.
pub const LOAD_MORE_THRESHOLD: f64 = 200.0;

/// The contiguous run of rows to materialize for one scroll position.
///
/// Derived on demand from item count, row height, viewport height, scroll
/// offset and overscan; nothing here is cached between scroll events.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    /// First materialized row.
    pub start_index: usize,
    /// Last materialized row (inclusive); `None` when nothing is visible.
    pub end_index: Option<usize>,
    /// Every index from `start_index` to `end_index`, in order.
    pub visible_indices: Vec<usize>,
    /// Height of the full scrollable content in pixels.
    pub total_height: f64,
    /// Height of the scrolling viewport in pixels.
    pub viewport_height: f64,
    /// Height of one row in pixels.
    pub item_height: f64,
}

impl Window {
    fn empty(start_index: usize, total_height: f64, viewport_height: f64, item_height: f64) -> Self {
        Self {
            start_index,
            end_index: None,
            visible_indices: Vec::new(),
            total_height,
            viewport_height,
            item_height,
        }
    }

    /// Whether no row is visible.
    pub fn is_empty(&self) -> bool {
        self.end_index.is_none()
    }

    /// Number of materialized rows.
    pub fn len(&self) -> usize {
        self.visible_indices.len()
    }

    /// Materialized rows as a half-open range.
    pub fn range(&self) -> Range<usize> {
        match self.end_index {
            Some(end) => self.start_index..end + 1,
            None => self.start_index..self.start_index,
        }
    }

    /// Top edge of row `index` within the scrollable content, in pixels.
    pub fn item_offset(&self, index: usize) -> f64 {
        index as f64 * self.item_height
    }
}

/// Computes the window of rows to materialize.
///
/// - `start = max(0, floor(scroll_offset / item_height) - overscan)`
/// - `end = min(item_count - 1, start + ceil(viewport_height / item_height) + 2 * overscan)`
///
/// Negative offsets clamp to the top. An empty list, a scroll position past
/// the last row, or a non-positive row height gives an empty window.
///
/// # Example
///
/// ```
/// use datagrid_lib::view::compute_window;
///
/// let window = compute_window(100, 40.0, 200.0, 120.0, 2);
/// assert_eq!(window.start_index, 1);
/// assert_eq!(window.end_index, Some(10));
/// ```
pub fn compute_window(
    item_count: usize,
    item_height: f64,
    viewport_height: f64,
    scroll_offset: f64,
    overscan: usize,
) -> Window {
    if !(item_height > 0.0 && item_height.is_finite()) {
        log::warn!("cannot window rows of height {}", item_height);
        return Window::empty(0, 0.0, viewport_height, item_height);
    }

    let total_height = item_count as f64 * item_height;
    let visible_count = whole(viewport_height / item_height, f64::ceil);
    let first_in_view = whole(scroll_offset / item_height, f64::floor);

    let start_index = first_in_view.saturating_sub(overscan);
    let Some(last_index) = item_count.checked_sub(1) else {
        return Window::empty(start_index, total_height, viewport_height, item_height);
    };
    let end_index = start_index
        .saturating_add(visible_count)
        .saturating_add(overscan.saturating_mul(2))
        .min(last_index);

    if end_index < start_index {
        return Window::empty(start_index, total_height, viewport_height, item_height);
    }

    Window {
        start_index,
        end_index: Some(end_index),
        visible_indices: (start_index..=end_index).collect(),
        total_height,
        viewport_height,
        item_height,
    }
}

/// Rounds a pixel ratio to a row count; negative and `NaN` ratios are 0.
fn whole(ratio: f64, round: fn(f64) -> f64) -> usize {
    let rounded = round(ratio);
    if rounded.is_nan() || rounded <= 0.0 {
        0
    } else {
        rounded as usize
    }
}

/// Whether a scroll container is close enough to its end to load more rows.
///
/// Pure trigger test; fetching the rows is the caller's business.
pub fn near_end(scroll_height: f64, scroll_top: f64, client_height: f64, threshold: f64) -> bool {
    scroll_height - scroll_top - client_height < threshold
}

/// Scroll position of a virtualized list.
///
/// The offset is the only state; the window is recomputed from it whenever
/// it is asked for.
///
/// # Example
///
/// ```
/// use datagrid_lib::view::VirtualScroll;
///
/// let mut scroll = VirtualScroll::new(40.0, 200.0).with_overscan(2);
/// scroll.set_offset(120.0);
/// assert_eq!(scroll.window(100).start_index, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualScroll {
    /// Height of one row in pixels.
    pub item_height: f64,
    /// Height of the viewport in pixels.
    pub viewport_height: f64,
    /// Rows rendered beyond each viewport edge.
    pub overscan: usize,
    offset: f64,
}

impl VirtualScroll {
    /// Creates scroll state at the top of the list.
    pub fn new(item_height: f64, viewport_height: f64) -> Self {
        Self {
            item_height,
            viewport_height,
            overscan: DEFAULT_OVERSCAN,
            offset: 0.0,
        }
    }

    /// Sets the overscan.
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Current scroll offset in pixels.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Records a new scroll offset, as reported by a scroll event.
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    /// Scrolls by `delta` pixels, clamped to the content of `item_count` rows.
    pub fn scroll_by(&mut self, delta: f64, item_count: usize) {
        self.offset = (self.offset + delta).clamp(0.0, self.max_offset(item_count));
    }

    /// Scrolls the least distance that brings row `index` fully into view.
    pub fn scroll_into_view(&mut self, index: usize) {
        let top = index as f64 * self.item_height;
        let bottom = top + self.item_height;
        if top < self.offset {
            self.offset = top;
        } else if bottom > self.offset + self.viewport_height {
            self.offset = (bottom - self.viewport_height).max(0.0);
        }
    }

    /// Sets the viewport height, e.g. after the container is measured.
    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    /// Largest useful offset for `item_count` rows.
    pub fn max_offset(&self, item_count: usize) -> f64 {
        (item_count as f64 * self.item_height - self.viewport_height).max(0.0)
    }

    /// Window for the current offset over `item_count` rows.
    pub fn window(&self, item_count: usize) -> Window {
        compute_window(
            item_count,
            self.item_height,
            self.viewport_height,
            self.offset,
            self.overscan,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_at_top() {
        let window = compute_window(100, 40.0, 200.0, 0.0, 2);
        assert_eq!(window.start_index, 0);
        assert_eq!(window.end_index, Some(9));
        assert_eq!(window.visible_indices, (0..10).collect::<Vec<_>>());
        assert_eq!(window.total_height, 4000.0);
    }

    #[test]
    fn test_window_after_scroll() {
        let window = compute_window(100, 40.0, 200.0, 120.0, 2);
        assert_eq!(window.start_index, 1);
        assert!(window.visible_indices.contains(&3));
        assert!(window.visible_indices.contains(&4));
    }

    #[test]
    fn test_window_empty_list() {
        let window = compute_window(0, 40.0, 200.0, 0.0, 2);
        assert!(window.is_empty());
        assert!(window.visible_indices.is_empty());
        assert_eq!(window.range(), 0..0);
    }

    #[test]
    fn test_window_clamped_by_overscan() {
        let window = compute_window(4, 40.0, 200.0, 0.0, 50);
        assert_eq!(window.start_index, 0);
        assert_eq!(window.end_index, Some(3));
    }

    #[test]
    fn test_window_at_bottom() {
        let window = compute_window(100, 40.0, 200.0, 3800.0, 2);
        assert_eq!(window.start_index, 93);
        assert_eq!(window.end_index, Some(99));
    }

    #[test]
    fn test_window_negative_offset() {
        let window = compute_window(100, 40.0, 200.0, -500.0, 2);
        assert_eq!(window.start_index, 0);
        assert_eq!(window.end_index, Some(9));
    }

    #[test]
    fn test_window_past_end() {
        let window = compute_window(10, 40.0, 200.0, 10_000.0, 2);
        assert!(window.is_empty());
        assert!(window.visible_indices.is_empty());
    }

    #[test]
    fn test_window_zero_height() {
        assert!(compute_window(10, 0.0, 200.0, 0.0, 2).is_empty());
    }

    #[test]
    fn test_item_offset() {
        let window = compute_window(100, 40.0, 200.0, 0.0, 2);
        assert_eq!(window.item_offset(3), 120.0);
    }

    #[test]
    fn test_near_end() {
        assert!(near_end(1000.0, 650.0, 200.0, LOAD_MORE_THRESHOLD));
        assert!(!near_end(1000.0, 500.0, 200.0, LOAD_MORE_THRESHOLD));
    }

    #[test]
    fn test_scroll_into_view() {
        let mut scroll = VirtualScroll::new(40.0, 200.0);
        scroll.scroll_into_view(10);
        assert_eq!(scroll.offset(), 240.0);
        scroll.scroll_into_view(2);
        assert_eq!(scroll.offset(), 80.0);
    }

    #[test]
    fn test_scroll_by_clamps() {
        let mut scroll = VirtualScroll::new(40.0, 200.0);
        scroll.scroll_by(-50.0, 100);
        assert_eq!(scroll.offset(), 0.0);
        scroll.scroll_by(10_000.0, 100);
        assert_eq!(scroll.offset(), 3800.0);
    }
}
