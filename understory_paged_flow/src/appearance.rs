// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fade and scale of pages as they move away from the scroll position.

use kurbo::{Affine, Rect};

/// Opacity and isotropic scale applied to a realized page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
    /// Isotropic scale factor, applied about the page center.
    pub scale: f64,
}

impl Appearance {
    /// Fully opaque and unscaled.
    pub const IDENTITY: Self = Self {
        alpha: 1.0,
        scale: 1.0,
    };

    /// Transform that scales a page occupying `frame` about its center.
    #[must_use]
    pub fn transform_for(self, frame: Rect) -> Affine {
        Affine::scale_about(self.scale, frame.center())
    }
}

/// Linear fade/scale falloff over one page of distance.
///
/// A page exactly at the scroll position is drawn at [`Appearance::IDENTITY`];
/// a page one page extent away or further is drawn at the minimum alpha and
/// scale. In between both values are interpolated linearly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeScale {
    min_alpha: f64,
    min_scale: f64,
}

impl Default for FadeScale {
    fn default() -> Self {
        Self::new(0.8, 0.8)
    }
}

impl FadeScale {
    /// No fading or scaling at all.
    pub const DISABLED: Self = Self {
        min_alpha: 1.0,
        min_scale: 1.0,
    };

    /// Creates a falloff with the given minimums, clamped into `[0, 1]`.
    #[must_use]
    pub fn new(min_alpha: f64, min_scale: f64) -> Self {
        Self {
            min_alpha: clamp_unit(min_alpha),
            min_scale: clamp_unit(min_scale),
        }
    }

    /// Alpha of pages one page extent or more away.
    #[must_use]
    pub const fn min_alpha(&self) -> f64 {
        self.min_alpha
    }

    /// Scale of pages one page extent or more away.
    #[must_use]
    pub const fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Returns `true` if every page is drawn at [`Appearance::IDENTITY`].
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.min_alpha == 1.0 && self.min_scale == 1.0
    }

    /// Appearance of a page whose leading edge is `distance` away from the
    /// scroll position, for pages `page_extent` long.
    #[must_use]
    pub fn at_distance(&self, distance: f64, page_extent: f64) -> Appearance {
        if distance < page_extent {
            let ratio = distance / page_extent;
            Appearance {
                alpha: 1.0 - ratio * (1.0 - self.min_alpha),
                scale: 1.0 - ratio * (1.0 - self.min_scale),
            }
        } else {
            Appearance {
                alpha: self.min_alpha,
                scale: self.min_scale,
            }
        }
    }

    /// Appearance of a page whose leading edge sits at `page_offset` when the
    /// scroll position is `scroll_offset`.
    #[must_use]
    pub fn at_offset(&self, page_offset: f64, scroll_offset: f64, page_extent: f64) -> Appearance {
        let distance = if page_offset > scroll_offset {
            page_offset - scroll_offset
        } else {
            scroll_offset - page_offset
        };
        self.at_distance(distance, page_extent)
    }
}

fn clamp_unit(value: f64) -> f64 {
    debug_assert!(
        value.is_finite(),
        "appearance minimums must be finite; got {value:?}"
    );
    if value.is_nan() {
        return 1.0;
    }
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::{Appearance, FadeScale};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn falloff_is_linear_within_one_page() {
        let fade = FadeScale::new(0.8, 0.6);
        assert_eq!(fade.at_distance(0.0, 100.0), Appearance::IDENTITY);

        let half = fade.at_distance(50.0, 100.0);
        assert!(approx(half.alpha, 0.9));
        assert!(approx(half.scale, 0.8));

        let quarter = fade.at_offset(175.0, 200.0, 100.0);
        assert!(approx(quarter.alpha, 0.95));
        assert!(approx(quarter.scale, 0.9));
    }

    #[test]
    fn one_page_or_more_away_uses_minimums() {
        let fade = FadeScale::new(0.8, 0.6);
        for distance in [100.0, 150.0, 10_000.0] {
            let look = fade.at_distance(distance, 100.0);
            assert_eq!(look.alpha, 0.8);
            assert_eq!(look.scale, 0.6);
        }
    }

    #[test]
    fn minimums_are_clamped_into_unit_range() {
        let fade = FadeScale::new(1.5, -0.25);
        assert_eq!(fade.min_alpha(), 1.0);
        assert_eq!(fade.min_scale(), 0.0);
        assert!(FadeScale::DISABLED.is_disabled());
        assert!(!FadeScale::default().is_disabled());
    }

    #[test]
    fn scale_pivots_on_the_frame_center() {
        let frame = Rect::new(100.0, 0.0, 200.0, 50.0);
        let look = Appearance {
            alpha: 1.0,
            scale: 0.5,
        };
        let transform = look.transform_for(frame);
        assert_eq!(transform * Point::new(150.0, 25.0), Point::new(150.0, 25.0));
        assert_eq!(transform * Point::new(100.0, 0.0), Point::new(125.0, 12.5));
        assert_eq!(
            Appearance::IDENTITY.transform_for(frame) * Point::new(100.0, 0.0),
            Point::new(100.0, 0.0)
        );
    }
}
