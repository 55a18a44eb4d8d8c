// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities the host framework provides to a [`PagedFlow`](crate::PagedFlow).

use kurbo::{Affine, Rect, Size};

use crate::CellPool;

/// A page view owned by the host's display hierarchy.
///
/// Implementations are typically thin handles (an id into a widget tree, a
/// reference-counted node, and so on). The flow owns handles for realized and
/// pooled pages and drives their geometry, attachment, and appearance.
pub trait PageView {
    /// Places the view at `frame` in scroll-content coordinates.
    fn set_frame(&mut self, frame: Rect);

    /// Sets the opacity of the view in `[0, 1]`.
    fn set_alpha(&mut self, alpha: f64);

    /// Sets the render transform of the view, in the coordinate space of its parent.
    fn set_transform(&mut self, transform: Affine);

    /// Returns `true` if the view is currently attached to the scroll surface.
    fn is_attached(&self) -> bool;

    /// Attaches the view to the scroll surface.
    fn attach(&mut self);

    /// Detaches the view from the scroll surface.
    fn detach(&mut self);
}

/// Supplies pages to a flow.
pub trait DataSource<V> {
    /// Number of pages.
    fn count(&self) -> usize;

    /// Returns a view bound to the content of page `index`.
    ///
    /// Called only for pages entering the window that are not already
    /// realized. Implementations should prefer [`CellPool::acquire`] on `reuse`
    /// and rebind the returned view before constructing a fresh one.
    fn cell_for_page(&mut self, index: usize, reuse: &mut CellPool<V>) -> V;
}

/// Receives geometry queries and notifications from a flow.
pub trait Delegate {
    /// Size of every page.
    fn page_size(&self) -> Size;

    /// Called once per settle when the current page changes.
    fn on_settled_page(&mut self, index: usize) {
        let _ = index;
    }

    /// Called when a tap lands on the scroll surface.
    fn on_tap_page(&mut self, index: usize) {
        let _ = index;
    }
}
