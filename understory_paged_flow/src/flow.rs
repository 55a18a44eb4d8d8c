// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paged flow controller: wires windowing, recycling, appearance, and
//! page tracking to host events.

use alloc::boxed::Box;
use core::fmt;
use core::time::Duration;

use kurbo::{Point, Rect, Size};

use crate::{
    CellSlots, DataSource, Delegate, FlowConfig, Orientation, PageIndicator, PageRange, PageStrip,
    PageTracker, PageView, WindowChange, compute_visible_range,
};

bitflags::bitflags! {
    /// Work deferred to the next [`PagedFlow::layout`] pass.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Invalidation: u8 {
        /// Re-query the data source and delegate and rebuild page slots.
        const RELOAD = 0b0000_0001;
        /// Recompute the window even if its range did not change.
        const WINDOW = 0b0000_0010;
    }
}

/// A paging container that realizes only the pages around the scroll position.
///
/// The flow owns page views handed out by its [`DataSource`], positions them
/// along the paging axis, recycles the ones that scroll out of the window, and
/// fades/scales them by distance from the scroll position. Hosts forward their
/// layout, scroll, settle, tap, and clock events to it:
///
/// | host event | method |
/// |---|---|
/// | layout pass | [`PagedFlow::layout`] |
/// | scroll position changed | [`PagedFlow::set_content_offset`] |
/// | deceleration ended | [`PagedFlow::end_decelerating`] |
/// | tap | [`PagedFlow::tap`] |
/// | frame clock | [`PagedFlow::tick`] |
///
/// The scroll surface is a page-sized frame centered in the flow's bounds
/// ([`PagedFlow::scroll_frame`]); neighbouring pages peek in around it and are
/// realized as part of the window.
pub struct PagedFlow<V: PageView> {
    config: FlowConfig,
    data_source: Option<Box<dyn DataSource<V>>>,
    delegate: Option<Box<dyn Delegate>>,

    bounds: Size,
    page_size: Size,
    page_count: usize,
    content_offset: Point,

    cells: CellSlots<V>,
    tracker: PageTracker,
    indicator: PageIndicator,
    invalidation: Invalidation,
}

impl<V: PageView> fmt::Debug for PagedFlow<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedFlow")
            .field("config", &self.config)
            .field("has_data_source", &self.data_source.is_some())
            .field("has_delegate", &self.delegate.is_some())
            .field("bounds", &self.bounds)
            .field("page_size", &self.page_size)
            .field("page_count", &self.page_count)
            .field("content_offset", &self.content_offset)
            .field("visible_range", &self.cells.range())
            .field("realized", &self.cells.realized_count())
            .field("pooled", &self.cells.pool().len())
            .field("tracker", &self.tracker)
            .field("invalidation", &self.invalidation)
            .finish_non_exhaustive()
    }
}

impl<V: PageView> Default for PagedFlow<V> {
    fn default() -> Self {
        Self::new(FlowConfig::default())
    }
}

impl<V: PageView> PagedFlow<V> {
    /// Creates a flow with no data source or delegate.
    ///
    /// Nothing is realized until a data source is set and [`PagedFlow::layout`] runs.
    #[must_use]
    pub fn new(config: FlowConfig) -> Self {
        Self {
            config,
            data_source: None,
            delegate: None,
            bounds: Size::ZERO,
            page_size: Size::ZERO,
            page_count: 0,
            content_offset: Point::ZERO,
            cells: CellSlots::new(),
            tracker: PageTracker::new(config.auto_advance),
            indicator: PageIndicator::new(config.indicator_offset, config.indicator_visible),
            invalidation: Invalidation::RELOAD | Invalidation::WINDOW,
        }
    }

    /// Sets the data source and schedules a reload.
    #[must_use]
    pub fn with_data_source(mut self, source: impl DataSource<V> + 'static) -> Self {
        self.set_data_source(Box::new(source));
        self
    }

    /// Sets the delegate and schedules a reload.
    #[must_use]
    pub fn with_delegate(mut self, delegate: impl Delegate + 'static) -> Self {
        self.set_delegate(Box::new(delegate));
        self
    }

    /// Replaces the data source and schedules a reload.
    pub fn set_data_source(&mut self, source: Box<dyn DataSource<V>>) {
        self.data_source = Some(source);
        self.reload_data();
    }

    /// Replaces the delegate and schedules a reload.
    pub fn set_delegate(&mut self, delegate: Box<dyn Delegate>) {
        self.delegate = Some(delegate);
        self.reload_data();
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Changes the paging axis.
    ///
    /// A change discards all pages, returns to the first page without
    /// notifying the delegate, and reloads.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if orientation != self.config.orientation {
            self.config.orientation = orientation;
            self.content_offset = Point::ZERO;
            self.tracker.reset();
            self.indicator.set_current_page(0);
            self.reload_data();
        }
    }

    /// Sets the alpha of pages one page away, clamped into `[0, 1]`.
    pub fn set_min_alpha(&mut self, min_alpha: f64) {
        self.config = self.config.with_min_alpha(min_alpha);
        self.refresh_appearance();
    }

    /// Sets the scale of pages one page away, clamped into `[0, 1]`.
    pub fn set_min_scale(&mut self, min_scale: f64) {
        self.config = self.config.with_min_scale(min_scale);
        self.refresh_appearance();
    }

    /// Sets the distance between the page indicator and the bottom edge.
    pub fn set_indicator_offset(&mut self, offset: f64) {
        self.config.indicator_offset = offset;
        self.indicator.set_bottom_offset(offset);
    }

    /// Shows or hides the page indicator.
    pub fn set_indicator_visible(&mut self, visible: bool) {
        self.config.indicator_visible = visible;
        self.indicator.set_hidden(!visible);
    }

    /// Sets the auto-advance interval. [`Duration::ZERO`] stops auto-advance.
    pub fn set_auto_advance(&mut self, interval: Duration) {
        self.config.auto_advance = interval;
        self.tracker.timer_mut().set_interval(interval);
    }

    /// Starts auto-advancing whenever data is (re)loaded.
    pub fn set_auto_start(&mut self, auto_start: bool) {
        self.config.auto_start = auto_start;
    }

    /// Discards every page, pooled view, and page-indexed state.
    ///
    /// The data source and delegate are queried again on the next
    /// [`PagedFlow::layout`].
    pub fn reload_data(&mut self) {
        self.cells.reset(0);
        self.page_count = 0;
        self.invalidation |= Invalidation::RELOAD | Invalidation::WINDOW;
        log::debug!("paged flow reload requested");
    }

    /// Runs a layout pass for a flow of size `bounds`.
    ///
    /// Performs any pending reload, then recomputes the window and page
    /// appearance. If the current page no longer exists it is reset to `0`.
    pub fn layout(&mut self, bounds: Size) {
        if bounds != self.bounds {
            self.bounds = bounds;
            self.invalidation |= Invalidation::WINDOW;
            if self.page_size != self.query_page_size() {
                // Every page frame moves, so start over.
                self.invalidation |= Invalidation::RELOAD;
            }
        }
        if self.invalidation.contains(Invalidation::RELOAD) {
            self.rebuild();
        }
        self.update_window();
        self.refresh_appearance();

        if self.tracker.current() >= self.page_count {
            self.tracker.reset();
            self.indicator.set_current_page(0);
            self.scroll_to_page(0);
        }
    }

    fn rebuild(&mut self) {
        self.invalidation.remove(Invalidation::RELOAD);
        self.invalidation |= Invalidation::WINDOW;

        self.page_count = self.data_source.as_ref().map_or(0, |source| source.count());
        self.page_size = self.query_page_size();
        self.clamp_content_offset();
        self.cells.reset(self.page_count);
        self.indicator.set_number_of_pages(self.page_count);
        log::debug!(
            "paged flow rebuilt: {} pages of {:?}",
            self.page_count,
            self.page_size
        );

        // No host time is known here; the first tick anchors the countdown.
        if self.config.auto_start
            && !self.tracker.timer().is_running()
            && self.tracker.timer_mut().start().is_some()
        {
            log::debug!(
                "auto-advance started every {:?}",
                self.tracker.timer().interval()
            );
        }
    }

    /// Handles a change of the scroll surface's content offset.
    ///
    /// Returns the pages realized and recycled as a result. A laid-out flow
    /// without pages has nothing to scroll and stays at the origin.
    pub fn set_content_offset(&mut self, offset: Point) -> WindowChange {
        let empty = self.page_count == 0 && !self.invalidation.contains(Invalidation::RELOAD);
        self.content_offset = if empty { Point::ZERO } else { offset };
        let change = self.update_window();
        self.refresh_appearance();
        change
    }

    /// Handles the end of scroll deceleration by settling on the page under
    /// the content offset.
    pub fn end_decelerating(&mut self) {
        self.settle();
    }

    /// Scrolls to page `index` and settles on it.
    ///
    /// Returns `false` and does nothing if `index` is not a valid page.
    pub fn scroll_to_page(&mut self, index: usize) -> bool {
        if index >= self.page_count {
            log::debug!(
                "ignoring scroll to page {index} of {}",
                self.page_count
            );
            return false;
        }
        let axis = self.config.orientation;
        let offset = self.page_strip().offset_of(index);
        self.set_content_offset(axis.point_at(offset));
        self.settle();
        true
    }

    /// Handles a tap at `point` in flow coordinates.
    ///
    /// Taps inside [`PagedFlow::scroll_frame`] report the current page to the
    /// delegate and return it. Taps elsewhere, or on an empty flow, do nothing.
    pub fn tap(&mut self, point: Point) -> Option<usize> {
        if self.page_count == 0 || !self.scroll_frame().contains(point) {
            return None;
        }
        let index = self.tracker.current();
        if let Some(delegate) = self.delegate.as_deref_mut() {
            delegate.on_tap_page(index);
        }
        Some(index)
    }

    /// Advances the clock to `now`, firing the auto-advance task if it is due.
    ///
    /// A fired task scrolls to the next page (wrapping to the first) and
    /// schedules the following advance. Returns `true` if a task fired.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.tracker.timer_mut().poll(now).is_none() {
            return false;
        }
        if self.page_count > 0 {
            let next = (self.tracker.current() + 1) % self.page_count;
            log::debug!("auto-advancing to page {next}");
            self.scroll_to_page(next);
        }
        self.tracker.timer_mut().schedule_at(now);
        true
    }

    /// Starts the auto-advance loop at host time `now`; the first advance is
    /// due one interval later.
    ///
    /// Returns `false` if the configured interval is zero.
    pub fn start_auto_advance(&mut self, now: Duration) -> bool {
        let started = self.tracker.timer_mut().start_at(now).is_some();
        if started {
            log::debug!(
                "auto-advance started every {:?}",
                self.tracker.timer().interval()
            );
        }
        started
    }

    /// Stops the auto-advance loop and cancels the outstanding task.
    pub fn stop_auto_advance(&mut self) {
        if self.tracker.timer().is_running() {
            log::debug!("auto-advance stopped");
        }
        self.tracker.timer_mut().stop();
    }

    /// Takes a pooled view for rebinding, if one is available.
    pub fn dequeue_reusable_cell(&mut self) -> Option<V> {
        self.cells.pool_mut().acquire()
    }

    /// Page the flow is settled on.
    #[must_use]
    pub const fn current_page_index(&self) -> usize {
        self.tracker.current()
    }

    /// View realized at the current page, if any.
    #[must_use]
    pub fn current_view(&self) -> Option<&V> {
        self.cells.view(self.tracker.current())
    }

    /// View realized at page `index`, if any.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&V> {
        self.cells.view(index)
    }

    /// Pages currently realized, including the one-page margin on each side.
    #[must_use]
    pub const fn visible_range(&self) -> Option<PageRange> {
        self.cells.range()
    }

    /// Number of realized pages.
    #[must_use]
    pub const fn realized_count(&self) -> usize {
        self.cells.realized_count()
    }

    /// Number of detached views waiting for reuse.
    #[must_use]
    pub fn pooled_count(&self) -> usize {
        self.cells.pool().len()
    }

    /// Number of pages as of the last layout.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.page_count
    }

    /// Size of each page as of the last layout.
    #[must_use]
    pub const fn page_size(&self) -> Size {
        self.page_size
    }

    /// Bounds passed to the last layout.
    #[must_use]
    pub const fn bounds(&self) -> Size {
        self.bounds
    }

    /// Content offset of the scroll surface.
    #[must_use]
    pub const fn content_offset(&self) -> Point {
        self.content_offset
    }

    /// Size of the scrollable content.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.config
            .orientation
            .content_size(self.page_count, self.page_size)
    }

    /// Frame of the scroll surface in flow coordinates: one page, centered in the bounds.
    #[must_use]
    pub fn scroll_frame(&self) -> Rect {
        let origin = Point::new(
            (self.bounds.width - self.page_size.width) / 2.0,
            (self.bounds.height - self.page_size.height) / 2.0,
        );
        Rect::from_origin_size(origin, self.page_size)
    }

    /// Maps `point` in flow coordinates into scroll-content coordinates.
    ///
    /// Returns `None` if the point lies outside the flow. Hosts use this to
    /// forward drags that start in the margins around the scroll surface.
    #[must_use]
    pub fn content_point(&self, point: Point) -> Option<Point> {
        if !Rect::from_origin_size(Point::ZERO, self.bounds).contains(point) {
            return None;
        }
        Some(point - self.scroll_frame().origin().to_vec2() + self.content_offset.to_vec2())
    }

    /// Page indicator state.
    #[must_use]
    pub const fn indicator(&self) -> &PageIndicator {
        &self.indicator
    }

    /// Frame of the page indicator in flow coordinates.
    #[must_use]
    pub fn indicator_frame(&self) -> Rect {
        self.indicator.frame(self.bounds)
    }

    /// Work pending for the next layout pass.
    #[must_use]
    pub const fn invalidation(&self) -> Invalidation {
        self.invalidation
    }

    /// Due time of the next auto-advance, if one is scheduled.
    #[must_use]
    pub fn next_advance_due(&self) -> Option<Duration> {
        self.tracker.timer().due()
    }

    fn query_page_size(&self) -> Size {
        let size = self
            .delegate
            .as_ref()
            .map_or(self.bounds, |delegate| delegate.page_size());
        Size::new(size.width.max(0.0), size.height.max(0.0))
    }

    /// Pulls the offset back inside `[0, last page]` along the paging axis.
    fn clamp_content_offset(&mut self) {
        let axis = self.config.orientation;
        let strip = self.page_strip();
        let max = (strip.total_extent() - strip.extent()).max(0.0);
        let along = axis.along_point(self.content_offset).max(0.0).min(max);
        self.content_offset = axis.point_at(along);
    }

    fn page_strip(&self) -> PageStrip {
        PageStrip::new(
            self.page_count,
            self.config.orientation.along_size(self.page_size),
        )
    }

    fn update_window(&mut self) -> WindowChange {
        let axis = self.config.orientation;
        let strip = self.page_strip();
        let offset =
            axis.along_point(self.content_offset) - axis.along_point(self.scroll_frame().origin());
        let range = compute_visible_range(&strip, offset, axis.along_size(self.bounds));
        let force = self.invalidation.contains(Invalidation::WINDOW);

        let Some(source) = self.data_source.as_deref_mut() else {
            return WindowChange::default();
        };
        let page_size = self.page_size;
        let change = self.cells.apply_range(
            range,
            force,
            |index| axis.page_frame(index, page_size),
            source,
        );
        self.invalidation.remove(Invalidation::WINDOW);
        change
    }

    fn refresh_appearance(&mut self) {
        let fade = self.config.fade();
        if fade.is_disabled() {
            return;
        }
        let axis = self.config.orientation;
        let extent = axis.along_size(self.page_size);
        if extent <= 0.0 {
            return;
        }
        let scroll = axis.along_point(self.content_offset);
        let page_size = self.page_size;
        for (index, view) in self.cells.realized_views_mut() {
            let frame = axis.page_frame(index, page_size);
            let look = fade.at_offset(axis.along_point(frame.origin()), scroll, extent);
            view.set_alpha(look.alpha);
            view.set_transform(look.transform_for(frame));
        }
    }

    fn settle(&mut self) {
        let axis = self.config.orientation;
        let offset = axis.along_point(self.content_offset);
        let extent = axis.along_size(self.page_size);
        if let Some(index) = self.tracker.settle(offset, extent, self.page_count) {
            self.indicator.set_current_page(index);
            log::debug!("settled on page {index}");
            if let Some(delegate) = self.delegate.as_deref_mut() {
                delegate.on_settled_page(index);
            }
        }
    }
}

impl<V: PageView> Drop for PagedFlow<V> {
    fn drop(&mut self) {
        self.tracker.timer_mut().stop();
        self.cells.reset(0);
    }
}
