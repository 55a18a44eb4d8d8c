// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_paged_flow --heading-base-level=0

//! Understory Paged Flow: a renderer-agnostic paging container core.
//!
//! A paged flow shows one page at a time along a horizontal or vertical axis,
//! with neighbouring pages peeking in around it. Only the pages near the scroll
//! position are realized as views; everything else is recycled through a pool.
//!
//! The core concepts are:
//!
//! - [`PageStrip`] and [`compute_visible_range`]: given a scroll offset and
//!   viewport extent, which pages intersect the viewport, plus one page of
//!   margin on each side ([`PageRange`]).
//! - [`CellSlots`] and [`CellPool`]: per-page [`Slot`]s that are either
//!   [`Slot::Empty`] or [`Slot::Realized`], backed by a pool of detached views
//!   that the [`DataSource`] rebinds instead of constructing new ones.
//! - [`FadeScale`]: linear alpha/scale falloff by distance from the scroll
//!   position, applied as an [`Appearance`].
//! - [`PageTracker`] and [`AdvanceTimer`]: the settled page index and an
//!   optional auto-advance loop built from a single owned one-shot task.
//! - [`PagedFlow`]: a controller that composes all of the above and is driven
//!   by host events (layout, scroll, settle, tap, clock).
//!
//! This crate deliberately does **not** know about any particular UI
//! framework. Hosts provide:
//!
//! - a [`PageView`] handle type the flow can position, attach, detach, and style,
//! - a [`DataSource`] that counts pages and binds views to them,
//! - optionally a [`Delegate`] that sizes pages and receives settle/tap notifications,
//! - and the scroll physics that produce content offsets and settle events.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Affine, Point, Rect, Size};
//! use understory_paged_flow::{CellPool, DataSource, FlowConfig, PageRange, PageView, PagedFlow};
//!
//! #[derive(Default)]
//! struct Card {
//!     page: usize,
//!     attached: bool,
//! }
//!
//! impl PageView for Card {
//!     fn set_frame(&mut self, _frame: Rect) {}
//!     fn set_alpha(&mut self, _alpha: f64) {}
//!     fn set_transform(&mut self, _transform: Affine) {}
//!     fn is_attached(&self) -> bool {
//!         self.attached
//!     }
//!     fn attach(&mut self) {
//!         self.attached = true;
//!     }
//!     fn detach(&mut self) {
//!         self.attached = false;
//!     }
//! }
//!
//! struct Cards(usize);
//!
//! impl DataSource<Card> for Cards {
//!     fn count(&self) -> usize {
//!         self.0
//!     }
//!
//!     fn cell_for_page(&mut self, index: usize, reuse: &mut CellPool<Card>) -> Card {
//!         let mut card = reuse.acquire().unwrap_or_default();
//!         card.page = index;
//!         card
//!     }
//! }
//!
//! let mut flow = PagedFlow::new(FlowConfig::default()).with_data_source(Cards(8));
//! // Without a delegate, pages fill the flow's bounds.
//! flow.layout(Size::new(100.0, 100.0));
//! assert_eq!(flow.visible_range(), Some(PageRange::new(0, 1)));
//!
//! // The host scrolls and the scroll comes to rest on page 2.
//! flow.set_content_offset(Point::new(200.0, 0.0));
//! flow.end_decelerating();
//! assert_eq!(flow.current_page_index(), 2);
//! assert_eq!(flow.visible_range(), Some(PageRange::new(1, 3)));
//! assert_eq!(flow.current_view().map(|card| card.page), Some(2));
//! ```
//!
//! All geometry uses [`kurbo`] types in the flow's own coordinate space
//! (typically logical pixels) and is expected to be finite.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod appearance;
mod axis;
mod config;
mod flow;
mod host;
mod indicator;
mod pool;
mod tracker;
mod window;

pub use appearance::{Appearance, FadeScale};
pub use axis::Orientation;
pub use config::FlowConfig;
pub use flow::{Invalidation, PagedFlow};
pub use host::{DataSource, Delegate, PageView};
pub use indicator::{INDICATOR_HEIGHT, PageIndicator};
pub use pool::{CellPool, CellSlots, Slot, WindowChange};
pub use tracker::{AdvanceTimer, PageTracker, TaskId, settled_index};
pub use window::{PageRange, PageStrip, compute_visible_range};
