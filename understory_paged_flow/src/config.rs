// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration of a [`PagedFlow`](crate::PagedFlow).

use core::time::Duration;

use crate::{FadeScale, Orientation};

/// Configuration of a [`PagedFlow`](crate::PagedFlow).
///
/// ```rust
/// use core::time::Duration;
/// use understory_paged_flow::{FlowConfig, Orientation};
///
/// let config = FlowConfig::default()
///     .with_orientation(Orientation::Vertical)
///     .with_min_alpha(0.5)
///     .with_auto_advance(Duration::from_secs(3))
///     .with_auto_start(true);
/// assert_eq!(config.fade().min_alpha(), 0.5);
/// assert_eq!(config.fade().min_scale(), 0.8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowConfig {
    /// Paging axis.
    pub orientation: Orientation,
    /// Distance between the page indicator and the bottom edge of the flow.
    pub indicator_offset: f64,
    /// Whether hosts should draw the page indicator.
    pub indicator_visible: bool,
    /// Delay between automatic advances. [`Duration::ZERO`] disables them.
    pub auto_advance: Duration,
    /// Start auto-advancing as soon as data is loaded.
    pub auto_start: bool,
    fade: FadeScale,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            indicator_offset: 10.0,
            indicator_visible: true,
            auto_advance: Duration::ZERO,
            auto_start: false,
            fade: FadeScale::default(),
        }
    }
}

impl FlowConfig {
    /// Fade/scale falloff applied to pages.
    #[must_use]
    pub const fn fade(&self) -> FadeScale {
        self.fade
    }

    /// Sets the paging axis.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the alpha of pages one page away, clamped into `[0, 1]`.
    #[must_use]
    pub fn with_min_alpha(mut self, min_alpha: f64) -> Self {
        self.fade = FadeScale::new(min_alpha, self.fade.min_scale());
        self
    }

    /// Sets the scale of pages one page away, clamped into `[0, 1]`.
    #[must_use]
    pub fn with_min_scale(mut self, min_scale: f64) -> Self {
        self.fade = FadeScale::new(self.fade.min_alpha(), min_scale);
        self
    }

    /// Replaces the fade/scale falloff.
    #[must_use]
    pub fn with_fade(mut self, fade: FadeScale) -> Self {
        self.fade = fade;
        self
    }

    /// Sets the distance between the page indicator and the bottom edge.
    #[must_use]
    pub fn with_indicator_offset(mut self, offset: f64) -> Self {
        self.indicator_offset = offset;
        self
    }

    /// Shows or hides the page indicator.
    #[must_use]
    pub fn with_indicator_visible(mut self, visible: bool) -> Self {
        self.indicator_visible = visible;
        self
    }

    /// Sets the auto-advance interval. [`Duration::ZERO`] disables auto-advance.
    #[must_use]
    pub fn with_auto_advance(mut self, interval: Duration) -> Self {
        self.auto_advance = interval;
        self
    }

    /// Starts auto-advancing when data is loaded.
    #[must_use]
    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }
}
