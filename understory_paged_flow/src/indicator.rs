// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page indicator ("dots") state.

use kurbo::{Rect, Size};

/// Height of the indicator strip.
pub const INDICATOR_HEIGHT: f64 = 10.0;

/// State of the page indicator drawn over the flow.
///
/// The flow keeps the page count and current page in sync; hosts render it.
#[derive(Clone, Debug, PartialEq)]
pub struct PageIndicator {
    number_of_pages: usize,
    current_page: usize,
    hidden: bool,
    bottom_offset: f64,
}

impl Default for PageIndicator {
    fn default() -> Self {
        Self::new(10.0, true)
    }
}

impl PageIndicator {
    /// Creates an indicator placed `bottom_offset` above the bottom edge.
    #[must_use]
    pub fn new(bottom_offset: f64, visible: bool) -> Self {
        Self {
            number_of_pages: 0,
            current_page: 0,
            hidden: !visible,
            bottom_offset,
        }
    }

    /// Number of dots.
    #[must_use]
    pub const fn number_of_pages(&self) -> usize {
        self.number_of_pages
    }

    /// Highlighted dot.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns `true` if hosts should not draw the indicator.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Distance between the bottom of the indicator and the bottom of the flow.
    #[must_use]
    pub const fn bottom_offset(&self) -> f64 {
        self.bottom_offset
    }

    pub(crate) fn set_number_of_pages(&mut self, count: usize) {
        self.number_of_pages = count;
        if self.current_page >= count {
            self.current_page = 0;
        }
    }

    pub(crate) fn set_current_page(&mut self, index: usize) {
        self.current_page = index;
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub(crate) fn set_bottom_offset(&mut self, offset: f64) {
        self.bottom_offset = offset;
    }

    /// Frame of the indicator for a flow of size `bounds`: a strip spanning the
    /// full width, [`INDICATOR_HEIGHT`] tall.
    #[must_use]
    pub fn frame(&self, bounds: Size) -> Rect {
        let bottom = bounds.height - self.bottom_offset;
        Rect::new(0.0, bottom - INDICATOR_HEIGHT, bounds.width, bottom)
    }
}
