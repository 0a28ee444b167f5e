// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement strategies: turning a mapped safe rectangle into a target frame.

use kurbo::{Point, Rect, Size};

use crate::geometry::{Margins, SideConfig, Sides, frame};

/// Algorithm used to derive an element's target frame from the safe area.
///
/// Exactly one strategy is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Strategy {
    /// Occupy the safe rectangle exactly.
    #[default]
    Fill,
    /// Narrow the safe rectangle to at most a given aspect ratio, keeping its
    /// height and center. A safe rectangle that is already narrower is used
    /// as is.
    FitAspect {
        /// Target width / height ratio. `None` uses the container's ratio.
        aspect: Option<f64>,
    },
    /// Ignore the safe area and keep fixed margins from the container edges.
    ///
    /// Margins are in reference units and are multiplied by the canvas scale
    /// factor before use.
    FixedMargins(Margins),
    /// Follow the safe-area edge independently on each side.
    ///
    /// A disabled side is pinned to the container edge, ignoring any inset on
    /// that side.
    PerSide(Sides<SideConfig>),
}

/// Strategy plus the uniform padding applied after it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutParams {
    /// The active strategy.
    pub strategy: Strategy,
    /// Uniform padding in container units, applied on every side after the
    /// strategy runs.
    pub padding: f64,
}

impl LayoutParams {
    /// Creates parameters for `strategy` with no padding.
    #[must_use]
    pub const fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            padding: 0.0,
        }
    }

    /// Sets the uniform padding.
    #[must_use]
    pub const fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }
}

/// Computes the target frame in container-local space.
///
/// `safe` is the safe rectangle already mapped into container space,
/// `container` the container's size and `scale` the resolved canvas scale
/// factor. The uniform padding of `params` is applied last.
#[must_use]
pub fn compute_target(params: &LayoutParams, safe: Rect, container: Size, scale: f64) -> Rect {
    let target = match params.strategy {
        Strategy::Fill => fill(safe),
        Strategy::FitAspect { aspect } => fit_aspect(safe, container, aspect),
        Strategy::FixedMargins(margins) => fixed_margins(margins, container, scale),
        Strategy::PerSide(sides) => per_side(sides, safe, container, scale),
    };
    apply_uniform_padding(target, params.padding)
}

fn fill(safe: Rect) -> Rect {
    frame(safe.origin(), safe.size())
}

fn fit_aspect(safe: Rect, container: Size, aspect: Option<f64>) -> Rect {
    let safe_size = safe.size();
    let target_aspect = match aspect {
        Some(a) => a,
        None if container.height > 0.0 => container.width / container.height,
        None => {
            tracing::debug!(?container, "zero-height container; fit-aspect falls back to fill");
            return fill(safe);
        }
    };
    if safe_size.height <= 0.0 || !target_aspect.is_finite() || target_aspect <= 0.0 {
        tracing::debug!(
            ?safe_size,
            target_aspect,
            "degenerate fit-aspect input; falling back to fill"
        );
        return fill(safe);
    }

    // Only ever narrows: a safe area already narrower than the target keeps
    // its own aspect.
    let safe_aspect = safe_size.width / safe_size.height;
    if safe_aspect <= target_aspect {
        return fill(safe);
    }
    let size = Size::new(safe_size.height * target_aspect, safe_size.height);
    let center = safe.center();
    let origin = Point::new(center.x - size.width * 0.5, center.y - size.height * 0.5);
    frame(origin, size)
}

fn fixed_margins(margins: Margins, container: Size, scale: f64) -> Rect {
    let m = margins.scaled(scale);
    m.inset(Rect::from_origin_size(Point::ZERO, container))
}

fn per_side(sides: Sides<SideConfig>, safe: Rect, container: Size, scale: f64) -> Rect {
    // Distance of each safe edge from the matching container edge (y-up).
    let edge = Sides {
        left: safe.min_x(),
        top: container.height - safe.max_y(),
        right: container.width - safe.max_x(),
        bottom: safe.min_y(),
    };
    let offset = |cfg: SideConfig, distance: f64| {
        if cfg.enabled {
            distance + cfg.margin * scale
        } else {
            0.0
        }
    };
    let margins = Margins::new(
        offset(sides.left, edge.left),
        offset(sides.top, edge.top),
        offset(sides.right, edge.right),
        offset(sides.bottom, edge.bottom),
    );
    margins.inset(Rect::from_origin_size(Point::ZERO, container))
}

fn apply_uniform_padding(target: Rect, padding: f64) -> Rect {
    if padding == 0.0 {
        return target;
    }
    Margins::uniform(padding).inset(target)
}
