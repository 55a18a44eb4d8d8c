// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paging axis selection and projection of 2D geometry onto it.

use kurbo::{Point, Rect, Size};

/// Direction along which pages are laid out and scrolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Pages are laid out left to right; the x axis carries paging offsets.
    #[default]
    Horizontal,
    /// Pages are laid out top to bottom; the y axis carries paging offsets.
    Vertical,
}

impl Orientation {
    /// Component of `point` along the paging axis.
    #[must_use]
    pub const fn along_point(self, point: Point) -> f64 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }

    /// Extent of `size` along the paging axis.
    #[must_use]
    pub const fn along_size(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Builds a point that sits at `offset` along the paging axis and `0` across it.
    #[must_use]
    pub const fn point_at(self, offset: f64) -> Point {
        match self {
            Self::Horizontal => Point::new(offset, 0.0),
            Self::Vertical => Point::new(0.0, offset),
        }
    }

    /// Frame of page `index` for pages of `page_size` laid out along this axis.
    #[must_use]
    pub fn page_frame(self, index: usize, page_size: Size) -> Rect {
        let offset = self.along_size(page_size) * index as f64;
        Rect::from_origin_size(self.point_at(offset), page_size)
    }

    /// Size of the scrollable content for `count` pages of `page_size`.
    #[must_use]
    pub fn content_size(self, count: usize, page_size: Size) -> Size {
        let count = count as f64;
        match self {
            Self::Horizontal => Size::new(page_size.width * count, page_size.height),
            Self::Vertical => Size::new(page_size.width, page_size.height * count),
        }
    }
}
