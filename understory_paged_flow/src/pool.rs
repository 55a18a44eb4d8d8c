// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page slots and the pool of detached, reusable page views.

use alloc::vec::Vec;
use core::mem;

use kurbo::{Affine, Rect};
use smallvec::SmallVec;

use crate::{DataSource, PageRange, PageView};

/// Association between a page index and its view.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<V> {
    /// No view is bound to this page.
    Empty,
    /// The page is realized with the given view.
    Realized(V),
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<V> Slot<V> {
    /// Returns `true` if a view is bound to this slot.
    #[must_use]
    pub const fn is_realized(&self) -> bool {
        matches!(self, Self::Realized(_))
    }

    /// Returns the bound view, if any.
    #[must_use]
    pub const fn view(&self) -> Option<&V> {
        match self {
            Self::Empty => None,
            Self::Realized(view) => Some(view),
        }
    }
}

/// Unordered bag of detached views available for rebinding to any page.
///
/// The pool is unbounded: only the window's pages are ever realized at once,
/// and every view leaving the window lands here instead of being dropped.
#[derive(Debug, Clone)]
pub struct CellPool<V> {
    views: Vec<V>,
}

impl<V> Default for CellPool<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CellPool<V> {
    /// Creates an empty pool.
    #[must_use]
    pub const fn new() -> Self {
        Self { views: Vec::new() }
    }

    /// Takes an arbitrary pooled view, or `None` if the pool is empty.
    pub fn acquire(&mut self) -> Option<V> {
        self.views.pop()
    }

    /// Returns a view to the pool.
    ///
    /// The view must already be detached and have its appearance reset.
    pub fn release(&mut self, view: V) {
        self.views.push(view);
    }

    /// Number of pooled views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Returns `true` if no views are pooled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Drops every pooled view.
    pub fn clear(&mut self) {
        self.views.clear();
    }
}

/// Indices realized and recycled by a single window update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowChange {
    /// Pages that received a view, in ascending order.
    pub realized: SmallVec<[usize; 4]>,
    /// Pages whose view went back to the pool, in ascending order.
    pub recycled: SmallVec<[usize; 4]>,
}

impl WindowChange {
    /// Returns `true` if nothing was realized or recycled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.realized.is_empty() && self.recycled.is_empty()
    }
}

/// Per-page slots plus the pool that backs them.
///
/// Invariant: every realized slot lies inside [`CellSlots::range`], so
/// window updates only ever touch the old and new ranges.
#[derive(Debug, Clone)]
pub struct CellSlots<V> {
    slots: Vec<Slot<V>>,
    pool: CellPool<V>,
    range: Option<PageRange>,
    realized: usize,
}

impl<V> Default for CellSlots<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CellSlots<V> {
    /// Creates an empty slot table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            pool: CellPool::new(),
            range: None,
            realized: 0,
        }
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if there are no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Range of slots covered by the last window update.
    #[must_use]
    pub const fn range(&self) -> Option<PageRange> {
        self.range
    }

    /// Number of realized slots.
    #[must_use]
    pub const fn realized_count(&self) -> usize {
        self.realized
    }

    /// Returns the slot at `index`, if it exists.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&Slot<V>> {
        self.slots.get(index)
    }

    /// Returns the view realized at `index`, if any.
    #[must_use]
    pub fn view(&self, index: usize) -> Option<&V> {
        self.slots.get(index).and_then(Slot::view)
    }

    /// Iterates realized views inside the current range together with their index.
    pub fn realized_views_mut(&mut self) -> impl Iterator<Item = (usize, &mut V)> {
        let (skip, take) = self.range.map_or((0, 0), |r| (r.start, r.len()));
        self.slots
            .iter_mut()
            .enumerate()
            .skip(skip)
            .take(take)
            .filter_map(|(index, slot)| match slot {
                Slot::Realized(view) => Some((index, view)),
                Slot::Empty => None,
            })
    }

    /// Shared access to the pool.
    #[must_use]
    pub const fn pool(&self) -> &CellPool<V> {
        &self.pool
    }

    /// Mutable access to the pool.
    pub fn pool_mut(&mut self) -> &mut CellPool<V> {
        &mut self.pool
    }
}

impl<V: PageView> CellSlots<V> {
    /// Discards all page-indexed state and rebuilds `len` empty slots.
    ///
    /// Realized views are detached and dropped, and the pool is cleared.
    pub fn reset(&mut self, len: usize) {
        if let Some(range) = self.range.take() {
            for index in range.indices() {
                if let Some(Slot::Realized(mut view)) =
                    self.slots.get_mut(index).map(mem::take)
                {
                    neutralize(&mut view);
                }
            }
        }
        self.pool.clear();
        self.slots.clear();
        self.slots.resize_with(len, Slot::default);
        self.realized = 0;
    }

    /// Realizes page `index` at `frame`, asking `source` for its view.
    ///
    /// Returns `false` without touching the data source if the page is
    /// already realized.
    pub fn realize(&mut self, index: usize, frame: Rect, source: &mut dyn DataSource<V>) -> bool {
        debug_assert!(
            index < self.slots.len(),
            "realize index {index} out of bounds for {} pages",
            self.slots.len()
        );
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        if slot.is_realized() {
            return false;
        }
        let mut view = source.cell_for_page(index, &mut self.pool);
        view.set_frame(frame);
        if !view.is_attached() {
            view.attach();
        }
        *slot = Slot::Realized(view);
        self.realized += 1;
        log::trace!("realized page {index}");
        true
    }

    /// Returns the view at page `index` to the pool.
    ///
    /// The view is detached and its appearance reset. Returns `false` if the
    /// page was not realized.
    pub fn recycle(&mut self, index: usize) -> bool {
        debug_assert!(
            index < self.slots.len(),
            "recycle index {index} out of bounds for {} pages",
            self.slots.len()
        );
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        match mem::take(slot) {
            Slot::Empty => false,
            Slot::Realized(mut view) => {
                neutralize(&mut view);
                self.pool.release(view);
                self.realized -= 1;
                log::trace!("recycled page {index}");
                true
            }
        }
    }

    /// Moves the window to `range`, realizing pages entering it and recycling
    /// pages leaving it.
    ///
    /// When `range` equals the current one nothing happens unless `force` is
    /// set, in which case any unrealized page inside it is filled. Pages
    /// leaving the window are recycled first so the pool can feed the pages
    /// entering it.
    pub fn apply_range(
        &mut self,
        range: Option<PageRange>,
        force: bool,
        mut frame_of: impl FnMut(usize) -> Rect,
        source: &mut dyn DataSource<V>,
    ) -> WindowChange {
        let mut change = WindowChange::default();
        if range == self.range && !force {
            return change;
        }

        if let Some(old) = self.range {
            for index in old.indices() {
                if range.is_some_and(|new| new.contains(index)) {
                    continue;
                }
                if self.recycle(index) {
                    change.recycled.push(index);
                }
            }
        }

        self.range = range;
        if let Some(new) = range {
            for index in new.indices() {
                if self.realize(index, frame_of(index), source) {
                    change.realized.push(index);
                }
            }
        }

        if !change.is_empty() {
            log::trace!(
                "window {:?}: realized {:?}, recycled {:?}",
                self.range,
                change.realized,
                change.recycled
            );
        }
        change
    }
}

/// Detaches `view` and resets the appearance applied by the flow.
fn neutralize<V: PageView>(view: &mut V) {
    view.set_transform(Affine::IDENTITY);
    view.set_alpha(1.0);
    if view.is_attached() {
        view.detach();
    }
}
