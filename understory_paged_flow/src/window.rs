// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Windowing over a strip of uniformly sized pages.

use core::ops::RangeInclusive;

/// A dense strip of `len` pages that all share the same `extent` along the paging axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageStrip {
    len: usize,
    extent: f64,
}

impl PageStrip {
    /// Creates a strip of `len` pages, each `extent` long.
    #[must_use]
    pub fn new(len: usize, extent: f64) -> Self {
        debug_assert!(
            !extent.is_nan(),
            "PageStrip extents must not be NaN; got {extent:?}"
        );
        Self {
            len,
            // Clamp negative values to `0.0`; a zero extent yields no window.
            extent: if extent.is_sign_negative() {
                0.0
            } else {
                extent
            },
        }
    }

    /// Number of pages.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the strip has no pages.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Extent of a single page.
    #[must_use]
    pub const fn extent(&self) -> f64 {
        self.extent
    }

    /// Returns `true` if pages have a usable, strictly positive extent.
    #[must_use]
    pub fn has_extent(&self) -> bool {
        self.extent > 0.0 && self.extent.is_finite()
    }

    /// Offset of the leading edge of page `index`.
    #[must_use]
    pub fn offset_of(&self, index: usize) -> f64 {
        self.extent * index as f64
    }

    /// Total extent of all pages.
    #[must_use]
    pub fn total_extent(&self) -> f64 {
        self.offset_of(self.len)
    }

    /// Index of the page containing `offset`, clamped into `0..len`.
    ///
    /// Negative offsets map to the first page and offsets past the end map to
    /// the last one. Returns `0` for empty strips and zero extents.
    #[must_use]
    pub fn index_at_offset(&self, offset: f64) -> usize {
        if self.len == 0 || !self.has_extent() {
            return 0;
        }
        floor_index(offset / self.extent).min(self.len - 1)
    }

    /// Index of the last page whose leading edge lies strictly before `offset`,
    /// clamped into `0..len`.
    #[must_use]
    pub fn last_index_before(&self, offset: f64) -> usize {
        if self.len == 0 || !self.has_extent() {
            return 0;
        }
        ceil_index(offset / self.extent)
            .saturating_sub(1)
            .min(self.len - 1)
    }
}

/// Floors a ratio into an index. Negative values and NaN map to `0`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Float-to-int casts saturate; callers clamp the result to bounds"
)]
pub(crate) fn floor_index(ratio: f64) -> usize {
    ratio as usize
}

fn ceil_index(ratio: f64) -> usize {
    let floor = floor_index(ratio);
    if (floor as f64) < ratio {
        floor.saturating_add(1)
    } else {
        floor
    }
}

/// An inclusive, non-empty range of page indices `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRange {
    /// First index in the range (inclusive).
    pub start: usize,
    /// Last index in the range (inclusive).
    pub end: usize,
}

impl PageRange {
    /// Creates a range covering `start..=end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "PageRange start must not exceed end");
        Self { start, end }
    }

    /// Number of indices in the range.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always `false`; a [`PageRange`] holds at least one index.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if `index` lies within the range.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }

    /// Iterator over the indices in the range.
    #[must_use]
    pub const fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Computes the range of pages to realize for a viewport over `strip`.
///
/// - `offset`: leading edge of the viewport in strip coordinates. Negative
///   values (overscroll, or a viewport wider than one page) are clamped to `0`.
/// - `viewport_extent`: size of the viewport along the paging axis.
///
/// The strictly visible pages are those whose span `[i * extent, (i + 1) * extent)`
/// intersects `[offset, offset + viewport_extent)`; at least the page under
/// `offset` is always included. The result extends that run by one page on each
/// side, clamped to `0` and `len - 1`.
///
/// Returns `None` for an empty strip or one whose pages have no extent.
#[must_use]
pub fn compute_visible_range(
    strip: &PageStrip,
    offset: f64,
    viewport_extent: f64,
) -> Option<PageRange> {
    if strip.is_empty() || !strip.has_extent() {
        return None;
    }
    let last = strip.len() - 1;
    let offset = offset.max(0.0);
    let viewport_extent = viewport_extent.max(0.0);

    // An offset past the end of the content pins the window to the last page.
    let start = strip.index_at_offset(offset);
    let end = strip
        .last_index_before(offset + viewport_extent)
        .max(start);

    Some(PageRange::new(
        start.saturating_sub(1),
        end.saturating_add(1).min(last),
    ))
}

#[cfg(test)]
mod tests {
    use super::{PageRange, PageStrip, compute_visible_range};

    #[test]
    fn index_lookups_clamp_into_bounds() {
        let strip = PageStrip::new(5, 10.0);
        assert_eq!(strip.total_extent(), 50.0);
        assert_eq!(strip.index_at_offset(-3.0), 0);
        assert_eq!(strip.index_at_offset(9.9), 0);
        assert_eq!(strip.index_at_offset(10.0), 1);
        assert_eq!(strip.index_at_offset(100.0), 4);
        assert_eq!(strip.last_index_before(10.0), 0);
        assert_eq!(strip.last_index_before(10.5), 1);
        assert_eq!(strip.last_index_before(500.0), 4);
    }

    #[test]
    fn negative_extent_is_clamped_and_yields_no_window() {
        let strip = PageStrip::new(3, -5.0);
        assert_eq!(strip.extent(), 0.0);
        assert_eq!(compute_visible_range(&strip, 0.0, 100.0), None);
    }

    #[test]
    fn empty_strip_has_no_window() {
        let strip = PageStrip::new(0, 100.0);
        assert_eq!(compute_visible_range(&strip, 0.0, 100.0), None);
    }

    #[test]
    fn single_page_is_always_its_own_window() {
        let strip = PageStrip::new(1, 100.0);
        for offset in [-50.0, 0.0, 30.0, 100.0, 1_000.0] {
            assert_eq!(
                compute_visible_range(&strip, offset, 320.0),
                Some(PageRange::new(0, 0))
            );
        }
    }

    #[test]
    fn settled_page_gets_one_neighbour_each_side() {
        let strip = PageStrip::new(8, 100.0);
        assert_eq!(
            compute_visible_range(&strip, 200.0, 100.0),
            Some(PageRange::new(1, 3))
        );
        // At the start only the trailing neighbour exists.
        assert_eq!(
            compute_visible_range(&strip, 0.0, 100.0),
            Some(PageRange::new(0, 1))
        );
        // At the end only the leading neighbour exists.
        assert_eq!(
            compute_visible_range(&strip, 700.0, 100.0),
            Some(PageRange::new(6, 7))
        );
    }

    /// The last strictly visible page is 3 here, not 2, so the window ends at 4.
    /// Only a settled offset (200) yields `[1, 3]`.
    #[test]
    fn straddling_viewport_realizes_both_pages_plus_neighbours() {
        // Viewport [250, 350) intersects pages 2 and 3.
        let strip = PageStrip::new(8, 100.0);
        assert_eq!(
            compute_visible_range(&strip, 250.0, 100.0),
            Some(PageRange::new(1, 4))
        );
    }

    #[test]
    fn offset_past_content_pins_to_last_page() {
        let strip = PageStrip::new(4, 100.0);
        assert_eq!(
            compute_visible_range(&strip, 10_000.0, 100.0),
            Some(PageRange::new(2, 3))
        );
    }

    #[test]
    fn viewport_larger_than_content_covers_everything() {
        let strip = PageStrip::new(3, 100.0);
        assert_eq!(
            compute_visible_range(&strip, 0.0, 1_000.0),
            Some(PageRange::new(0, 2))
        );
        assert_eq!(
            compute_visible_range(&strip, 150.0, 1_000.0),
            Some(PageRange::new(0, 2))
        );
    }

    #[test]
    fn zero_viewport_keeps_the_page_under_the_offset() {
        let strip = PageStrip::new(6, 100.0);
        assert_eq!(
            compute_visible_range(&strip, 300.0, 0.0),
            Some(PageRange::new(2, 4))
        );
    }

    #[test]
    fn window_is_minimal_cover_of_intersecting_pages() {
        let strip = PageStrip::new(20, 100.0);
        let viewport = 260.0;
        let mut offset = 0.0;
        while offset < 2_000.0 {
            let range = compute_visible_range(&strip, offset, viewport).unwrap();
            let first = (0..20)
                .find(|&i| strip.offset_of(i + 1) > offset)
                .unwrap();
            let last = (0..20)
                .rev()
                .find(|&i| strip.offset_of(i) < offset + viewport)
                .unwrap()
                .max(first);
            assert_eq!(range.start, first.saturating_sub(1), "offset {offset}");
            assert_eq!(range.end, (last + 1).min(19), "offset {offset}");
            // ceil(260 / 100) + 1 straddled page + 2 neighbours.
            assert!(range.len() <= 6, "offset {offset}");
            offset += 37.5;
        }
    }

    #[test]
    fn page_range_queries() {
        let range = PageRange::new(2, 4);
        assert_eq!(range.len(), 3);
        assert!(range.contains(2));
        assert!(range.contains(4));
        assert!(!range.contains(5));
        assert_eq!(range.indices().collect::<alloc::vec::Vec<_>>(), [2, 3, 4]);
    }
}
