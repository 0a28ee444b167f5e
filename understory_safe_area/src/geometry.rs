// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small value types and rectangle helpers shared by the layout stages.
//!
//! Rectangles are plain [`kurbo::Rect`]s. Container-local space puts the origin
//! at the bottom-left corner with `y` growing upwards, so `y0` is the bottom
//! edge and `y1` the top edge.

use kurbo::{Point, Rect, Size};

/// Relative tolerance used when comparing ratios and rectangle coordinates.
pub(crate) const EPSILON: f64 = 1e-5;

/// Returns `true` if `a` and `b` are equal within [`EPSILON`], scaled to the
/// magnitude of the inputs.
#[must_use]
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    let scale = 1.0_f64.max(a.abs()).max(b.abs());
    (a - b).abs() < EPSILON * scale
}

/// Returns `true` if both rectangles match coordinate by coordinate within
/// the crate tolerance.
#[must_use]
pub fn rect_approx_eq(a: Rect, b: Rect) -> bool {
    approx_eq(a.x0, b.x0) && approx_eq(a.y0, b.y0) && approx_eq(a.x1, b.x1) && approx_eq(a.y1, b.y1)
}

/// Builds a rectangle from a position and a size, clamping negative
/// dimensions to zero.
///
/// Every stage funnels its output through this so sizes never go negative.
#[must_use]
pub fn frame(origin: Point, size: Size) -> Rect {
    Rect::from_origin_size(origin, clamp_size(size))
}

/// Clamps both dimensions of `size` to be non-negative.
///
/// NaN dimensions also collapse to zero.
#[must_use]
pub fn clamp_size(size: Size) -> Size {
    Size::new(non_negative(size.width), non_negative(size.height))
}

fn non_negative(v: f64) -> f64 {
    if v > 0.0 { v } else { 0.0 }
}

/// Linearly interpolates position and size independently between two
/// rectangles.
///
/// `t` is not clamped; callers pass an eased, already-normalized value.
#[must_use]
pub fn lerp_rect(from: Rect, to: Rect, t: f64) -> Rect {
    let origin = from.origin().lerp(to.origin(), t);
    let (a, b) = (from.size(), to.size());
    let size = Size::new(lerp(a.width, b.width, t), lerp(a.height, b.height, t));
    frame(origin, size)
}

#[inline]
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Four independent scalars, one per side.
///
/// The unit is decided by whoever consumes the margins (reference pixels for
/// [`Strategy::FixedMargins`](crate::Strategy::FixedMargins), or the unit of a
/// [`Padding`](crate::Padding) transform).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins {
    /// Distance from the left edge.
    pub left: f64,
    /// Distance from the top edge.
    pub top: f64,
    /// Distance from the right edge.
    pub right: f64,
    /// Distance from the bottom edge.
    pub bottom: f64,
}

impl Margins {
    /// Zero on every side.
    pub const ZERO: Self = Self::uniform(0.0);

    /// Creates margins from explicit per-side values.
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same value on all four sides.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Multiplies every side by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(
            self.left * factor,
            self.top * factor,
            self.right * factor,
            self.bottom * factor,
        )
    }

    /// Sum of the left and right values.
    #[must_use]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of the top and bottom values.
    #[must_use]
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Shrinks `rect` by these margins.
    ///
    /// The origin moves by `(left, bottom)` and the size shrinks by the sums
    /// of opposite sides, clamped at zero.
    #[must_use]
    pub fn inset(&self, rect: Rect) -> Rect {
        let origin = Point::new(rect.x0 + self.left, rect.y0 + self.bottom);
        let size = Size::new(
            rect.width() - self.horizontal(),
            rect.height() - self.vertical(),
        );
        frame(origin, size)
    }
}

/// A value for each of the four sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sides<T> {
    /// Left side.
    pub left: T,
    /// Top side.
    pub top: T,
    /// Right side.
    pub right: T,
    /// Bottom side.
    pub bottom: T,
}

impl<T: Copy> Sides<T> {
    /// The same value on all four sides.
    #[must_use]
    pub const fn all(value: T) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

impl<T> Sides<T> {
    /// Applies `f` to every side.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Sides<U> {
        Sides {
            left: f(self.left),
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
        }
    }
}

/// Per-side configuration of the [`PerSide`](crate::Strategy::PerSide) strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SideConfig {
    /// Whether this side follows the safe-area edge.
    ///
    /// A disabled side contributes no offset, letting the element bleed to
    /// the container edge.
    pub enabled: bool,
    /// Extra distance added on top of the safe-area edge, in reference units.
    pub margin: f64,
}

impl SideConfig {
    /// A disabled side.
    pub const DISABLED: Self = Self {
        enabled: false,
        margin: 0.0,
    };

    /// An enabled side with the given margin.
    #[must_use]
    pub const fn enabled(margin: f64) -> Self {
        Self {
            enabled: true,
            margin,
        }
    }
}
