// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas scale factor resolution.

use kurbo::Size;

use crate::geometry::lerp;

/// How a canvas derives its scale factor from the screen size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScaleMode {
    /// Blend between the width ratio and the height ratio.
    ///
    /// A blend of `0.0` uses the width ratio only, `1.0` the height ratio only.
    #[default]
    MatchWidthOrHeight,
    /// Use the smaller of the two ratios so no content is clipped.
    Expand,
    /// Use the larger of the two ratios so nothing overflows.
    Shrink,
    /// Fixed pixel size; no reference-resolution scaling.
    ConstantPixelSize,
    /// Fixed physical size; no reference-resolution scaling in this crate.
    ConstantPhysicalSize,
}

/// Resolves the scale factor for a screen relative to a reference design
/// resolution.
///
/// `blend` only matters for [`ScaleMode::MatchWidthOrHeight`] and is clamped
/// into `[0, 1]`. Modes without reference scaling resolve to `1.0`, as do
/// non-positive or non-finite dimensions.
#[must_use]
pub fn resolve_scale(screen: Size, reference: Size, mode: ScaleMode, blend: f64) -> f64 {
    if !is_positive(reference.width) || !is_positive(reference.height) {
        tracing::debug!(?reference, "degenerate reference resolution; scale is 1.0");
        return 1.0;
    }
    if !is_positive(screen.width) || !is_positive(screen.height) {
        tracing::debug!(?screen, "degenerate screen size; scale is 1.0");
        return 1.0;
    }

    let width_ratio = screen.width / reference.width;
    let height_ratio = screen.height / reference.height;
    match mode {
        ScaleMode::MatchWidthOrHeight => {
            let blend = if blend.is_nan() { 0.0 } else { blend.clamp(0.0, 1.0) };
            lerp(width_ratio, height_ratio, blend)
        }
        ScaleMode::Expand => width_ratio.min(height_ratio),
        ScaleMode::Shrink => width_ratio.max(height_ratio),
        ScaleMode::ConstantPixelSize | ScaleMode::ConstantPhysicalSize => 1.0,
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Scale-factor configuration of a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasScaler {
    /// Resolution the UI was designed for.
    pub reference_resolution: Size,
    /// How the scale factor is derived.
    pub mode: ScaleMode,
    /// Width/height blend for [`ScaleMode::MatchWidthOrHeight`].
    pub match_blend: f64,
}

impl Default for CanvasScaler {
    fn default() -> Self {
        Self {
            reference_resolution: Size::new(1080.0, 1920.0),
            mode: ScaleMode::MatchWidthOrHeight,
            match_blend: 0.5,
        }
    }
}

impl CanvasScaler {
    /// A scaler that always resolves to `1.0`.
    pub const IDENTITY: Self = Self {
        reference_resolution: Size::new(1.0, 1.0),
        mode: ScaleMode::ConstantPixelSize,
        match_blend: 0.0,
    };

    /// Creates a scaler for the given reference resolution and mode.
    #[must_use]
    pub const fn new(reference_resolution: Size, mode: ScaleMode, match_blend: f64) -> Self {
        Self {
            reference_resolution,
            mode,
            match_blend,
        }
    }

    /// Scale factor for a screen of the given size.
    #[must_use]
    pub fn scale_factor(&self, screen: Size) -> f64 {
        resolve_scale(
            screen,
            self.reference_resolution,
            self.mode,
            self.match_blend,
        )
    }
}
