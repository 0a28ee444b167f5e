// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Post-process transforms applied to a target frame after the strategy.
//!
//! Each transform maps a frame to a frame and depends only on its own
//! parameters plus a small [`TransformContext`]. A [`PostProcessChain`] runs an
//! ordered list of them; later entries see the output of earlier ones, and
//! disabled entries are skipped.
//!
//! None of the transforms can fail. Degenerate frames (zero height when a
//! ratio is needed, already-satisfied constraints) pass through unchanged and
//! sizes are clamped at zero.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::geometry::{Margins, approx_eq, frame};

/// Information a transform may need beyond the frame it is given.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformContext {
    /// Size of the container, when one is resolvable.
    pub container: Option<Size>,
}

impl TransformContext {
    /// A context with a known container size.
    #[must_use]
    pub const fn with_container(container: Size) -> Self {
        Self {
            container: Some(container),
        }
    }
}

/// A single frame-to-frame adjustment.
pub trait Transform {
    /// Returns the adjusted frame.
    fn apply(&self, rect: Rect, cx: &TransformContext) -> Rect;
}

/// Returns `(min, max)` ordered so that `min <= max`.
fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Clamps without panicking on reversed bounds or NaN input.
fn clamp_to(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// How a [`WidthClamp`] redistributes the width it removes or adds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WidthClampMode {
    /// Keep the frame horizontally centered.
    #[default]
    Center,
    /// Fit the clamped ratio inside the frame, centered: a frame that is too
    /// wide loses width, one that is too narrow loses height.
    Scale,
    /// Remove the difference from the left edge.
    CropLeft,
    /// Remove the difference from the right edge.
    CropRight,
}

/// Constrains the width/height ratio by changing the width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WidthClamp {
    /// Lowest allowed width / height ratio.
    pub min_ratio: f64,
    /// Highest allowed width / height ratio.
    pub max_ratio: f64,
    /// Where the width delta goes.
    pub mode: WidthClampMode,
}

impl WidthClamp {
    /// Creates a width clamp. Bounds given in the wrong order are swapped.
    #[must_use]
    pub fn new(min_ratio: f64, max_ratio: f64, mode: WidthClampMode) -> Self {
        let (min_ratio, max_ratio) = ordered(min_ratio, max_ratio);
        Self {
            min_ratio,
            max_ratio,
            mode,
        }
    }
}

impl Default for WidthClamp {
    fn default() -> Self {
        Self::new(0.5, 2.0, WidthClampMode::Center)
    }
}

impl Transform for WidthClamp {
    fn apply(&self, rect: Rect, _cx: &TransformContext) -> Rect {
        let size = rect.size();
        if size.height <= 0.0 {
            return rect;
        }
        let (lo, hi) = ordered(self.min_ratio, self.max_ratio);
        let ratio = size.width / size.height;
        let clamped = clamp_to(ratio, lo, hi);
        if approx_eq(ratio, clamped) {
            return rect;
        }

        let width = clamped * size.height;
        let delta = size.width - width;
        match self.mode {
            WidthClampMode::Center => frame(
                Point::new(rect.x0 + delta * 0.5, rect.y0),
                Size::new(width, size.height),
            ),
            WidthClampMode::CropLeft => frame(
                Point::new(rect.x0 + delta, rect.y0),
                Size::new(width, size.height),
            ),
            WidthClampMode::CropRight => frame(rect.origin(), Size::new(width, size.height)),
            // Fit the clamped ratio inside the incoming frame, centered.
            WidthClampMode::Scale if ratio > clamped => frame(
                Point::new(rect.x0 + delta * 0.5, rect.y0),
                Size::new(width, size.height),
            ),
            WidthClampMode::Scale => {
                let height = size.width / clamped;
                let dy = size.height - height;
                frame(
                    Point::new(rect.x0, rect.y0 + dy * 0.5),
                    Size::new(size.width, height),
                )
            }
        }
    }
}

/// Semantic label for how an [`AspectClamp`] handles an out-of-range ratio.
///
/// All three modes currently produce the same geometry: the offending axis is
/// shrunk to the bound and the freed space is split evenly on both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AspectMode {
    /// Shrink the offending axis and center the result.
    #[default]
    ScaleToFit,
    /// Bars on the sides of the offending axis.
    Letterbox,
    /// Crop the offending axis.
    Crop,
}

/// Constrains the width/height ratio by shrinking whichever axis is out of
/// range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AspectClamp {
    /// Lowest allowed width / height ratio.
    pub min_ratio: f64,
    /// Highest allowed width / height ratio.
    pub max_ratio: f64,
    /// Handling mode.
    pub mode: AspectMode,
}

impl AspectClamp {
    /// Creates an aspect clamp. Bounds given in the wrong order are swapped.
    #[must_use]
    pub fn new(min_ratio: f64, max_ratio: f64, mode: AspectMode) -> Self {
        let (min_ratio, max_ratio) = ordered(min_ratio, max_ratio);
        Self {
            min_ratio,
            max_ratio,
            mode,
        }
    }
}

impl Default for AspectClamp {
    fn default() -> Self {
        Self::new(0.5, 2.0, AspectMode::ScaleToFit)
    }
}

impl Transform for AspectClamp {
    fn apply(&self, rect: Rect, _cx: &TransformContext) -> Rect {
        let size = rect.size();
        if size.height <= 0.0 {
            return rect;
        }
        let (lo, hi) = ordered(self.min_ratio, self.max_ratio);
        let ratio = size.width / size.height;

        // TODO: give Letterbox and Crop their own geometry once hosts can
        // render bars or clip content; they share the centering math for now.
        match self.mode {
            AspectMode::ScaleToFit | AspectMode::Letterbox | AspectMode::Crop => {
                if ratio > hi && !approx_eq(ratio, hi) {
                    let width = hi * size.height;
                    let dx = size.width - width;
                    frame(
                        Point::new(rect.x0 + dx * 0.5, rect.y0),
                        Size::new(width, size.height),
                    )
                } else if ratio < lo && !approx_eq(ratio, lo) {
                    let height = size.width / lo;
                    let dy = size.height - height;
                    frame(
                        Point::new(rect.x0, rect.y0 + dy * 0.5),
                        Size::new(size.width, height),
                    )
                } else {
                    rect
                }
            }
        }
    }
}

/// Unit of the values in a [`Padding`] transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PaddingUnit {
    /// Absolute container units.
    #[default]
    Pixels,
    /// Fractions of the incoming frame's size (left/right of its width,
    /// top/bottom of its height).
    FractionOfSelf,
    /// Fractions of the container's size. Falls back to [`PaddingUnit::Pixels`]
    /// when no container is known.
    FractionOfContainer,
}

/// Insets the frame by per-side padding.
///
/// Each resolved side is clamped into `[min, max]` independently before it is
/// applied. The origin moves by `(left, bottom)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Padding {
    /// Per-side padding values, in `unit`.
    pub values: Margins,
    /// Unit of `values`.
    pub unit: PaddingUnit,
    /// Lower bound for each resolved side.
    pub min: f64,
    /// Upper bound for each resolved side.
    pub max: f64,
}

impl Padding {
    /// Unbounded padding with the given values and unit.
    #[must_use]
    pub const fn new(values: Margins, unit: PaddingUnit) -> Self {
        Self {
            values,
            unit,
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }

    /// Absolute padding.
    #[must_use]
    pub const fn pixels(values: Margins) -> Self {
        Self::new(values, PaddingUnit::Pixels)
    }

    /// Sets the per-side bounds. Bounds given in the wrong order are swapped.
    #[must_use]
    pub fn with_limits(mut self, min: f64, max: f64) -> Self {
        (self.min, self.max) = ordered(min, max);
        self
    }

    /// Resolves the per-side padding for a frame of `size`, in container units.
    #[must_use]
    pub fn resolve(&self, size: Size, cx: &TransformContext) -> Margins {
        let v = self.values;
        let basis = match self.unit {
            PaddingUnit::Pixels => None,
            PaddingUnit::FractionOfSelf => Some(size),
            PaddingUnit::FractionOfContainer => {
                if cx.container.is_none() {
                    tracing::debug!("no container for relative padding; using pixels");
                }
                cx.container
            }
        };
        let raw = match basis {
            Some(b) => Margins::new(
                v.left * b.width,
                v.top * b.height,
                v.right * b.width,
                v.bottom * b.height,
            ),
            None => v,
        };
        let (lo, hi) = ordered(self.min, self.max);
        Margins::new(
            clamp_to(raw.left, lo, hi),
            clamp_to(raw.top, lo, hi),
            clamp_to(raw.right, lo, hi),
            clamp_to(raw.bottom, lo, hi),
        )
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::pixels(Margins::ZERO)
    }
}

impl Transform for Padding {
    fn apply(&self, rect: Rect, cx: &TransformContext) -> Rect {
        self.resolve(rect.size(), cx).inset(rect)
    }
}

/// Any of the built-in transforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PostProcess {
    /// See [`WidthClamp`].
    WidthClamp(WidthClamp),
    /// See [`AspectClamp`].
    AspectClamp(AspectClamp),
    /// See [`Padding`].
    Padding(Padding),
}

impl Transform for PostProcess {
    fn apply(&self, rect: Rect, cx: &TransformContext) -> Rect {
        match self {
            Self::WidthClamp(t) => t.apply(rect, cx),
            Self::AspectClamp(t) => t.apply(rect, cx),
            Self::Padding(t) => t.apply(rect, cx),
        }
    }
}

impl From<WidthClamp> for PostProcess {
    fn from(t: WidthClamp) -> Self {
        Self::WidthClamp(t)
    }
}

impl From<AspectClamp> for PostProcess {
    fn from(t: AspectClamp) -> Self {
        Self::AspectClamp(t)
    }
}

impl From<Padding> for PostProcess {
    fn from(t: Padding) -> Self {
        Self::Padding(t)
    }
}

/// One slot in a [`PostProcessChain`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostProcessEntry {
    /// Disabled entries are skipped.
    pub enabled: bool,
    /// The transform itself.
    pub transform: PostProcess,
}

impl PostProcessEntry {
    /// An enabled entry.
    #[must_use]
    pub fn new(transform: impl Into<PostProcess>) -> Self {
        Self {
            enabled: true,
            transform: transform.into(),
        }
    }
}

/// An ordered, caller-controlled list of transforms.
///
/// Index-based mutators ignore out-of-range indices and report whether they
/// did anything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostProcessChain {
    entries: Vec<PostProcessEntry>,
}

impl PostProcessChain {
    /// Creates an empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an enabled transform and returns its index.
    pub fn push(&mut self, transform: impl Into<PostProcess>) -> usize {
        self.entries.push(PostProcessEntry::new(transform));
        self.entries.len() - 1
    }

    /// Inserts an entry at `index`, or at the end if `index` is past it.
    pub fn insert(&mut self, index: usize, entry: PostProcessEntry) {
        let index = index.min(self.entries.len());
        self.entries.insert(index, entry);
    }

    /// Removes and returns the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Option<PostProcessEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Moves the entry at `from` so that it ends up at index `to`.
    pub fn move_entry(&mut self, from: usize, to: usize) -> bool {
        let len = self.entries.len();
        if from >= len || to >= len {
            return false;
        }
        if from != to {
            let entry = self.entries.remove(from);
            self.entries.insert(to, entry);
        }
        true
    }

    /// Enables or disables the entry at `index`.
    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Returns the entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PostProcessEntry> {
        self.entries.get(index)
    }

    /// Returns the entry at `index` for in-place parameter edits.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut PostProcessEntry> {
        self.entries.get_mut(index)
    }

    /// Iterates entries in application order.
    pub fn iter(&self) -> impl Iterator<Item = &PostProcessEntry> {
        self.entries.iter()
    }

    /// Number of entries, enabled or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the chain has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Runs every enabled entry in order.
    #[must_use]
    pub fn apply(&self, rect: Rect, cx: &TransformContext) -> Rect {
        self.entries
            .iter()
            .filter(|entry| entry.enabled)
            .fold(rect, |rect, entry| entry.transform.apply(rect, cx))
    }
}

impl<T: Into<PostProcess>> FromIterator<T> for PostProcessChain {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(PostProcessEntry::new).collect(),
        }
    }
}

impl<T: Into<PostProcess>> Extend<T> for PostProcessChain {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.entries.extend(iter.into_iter().map(PostProcessEntry::new));
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::{
        AspectClamp, AspectMode, Padding, PaddingUnit, PostProcessChain, PostProcessEntry,
        Transform, TransformContext, WidthClamp, WidthClampMode,
    };
    use crate::geometry::Margins;

    const CX: TransformContext = TransformContext { container: None };

    fn inside(inner: Rect, outer: Rect) -> bool {
        inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
    }

    fn wide() -> Rect {
        Rect::from_origin_size((0.0, 0.0), (2500.0, 1000.0))
    }

    #[test]
    fn width_clamp_modes_distribute_delta() {
        let center = WidthClamp::new(0.5, 2.0, WidthClampMode::Center).apply(wide(), &CX);
        assert_eq!(center.origin(), Point::new(250.0, 0.0));
        assert_eq!(center.size(), Size::new(2000.0, 1000.0));

        let left = WidthClamp::new(0.5, 2.0, WidthClampMode::CropLeft).apply(wide(), &CX);
        assert_eq!(left.origin(), Point::new(500.0, 0.0));
        assert_eq!(left.width(), 2000.0);

        let right = WidthClamp::new(0.5, 2.0, WidthClampMode::CropRight).apply(wide(), &CX);
        assert_eq!(right.origin(), Point::ZERO);
        assert_eq!(right.width(), 2000.0);

        let scale = WidthClamp::new(0.5, 2.0, WidthClampMode::Scale).apply(wide(), &CX);
        assert_eq!(scale.size(), Size::new(2000.0, 1000.0));
        assert_eq!(scale.origin(), Point::new(250.0, 0.0));
    }

    #[test]
    fn width_clamp_scale_stays_inside_input() {
        let clamp = WidthClamp::new(0.5, 2.0, WidthClampMode::Scale);
        let out = clamp.apply(wide(), &CX);
        assert!(inside(out, wide()));

        // Too narrow: height shrinks around the vertical center.
        let narrow = Rect::from_origin_size((100.0, 0.0), (100.0, 1000.0));
        let out = clamp.apply(narrow, &CX);
        assert_eq!(out.size(), Size::new(100.0, 200.0));
        assert_eq!(out.origin(), Point::new(100.0, 400.0));
        assert!(inside(out, narrow));
        assert_eq!(clamp.apply(out, &CX), out);
    }

    #[test]
    fn width_clamp_widens_narrow_frames() {
        let narrow = Rect::from_origin_size((100.0, 0.0), (100.0, 1000.0));
        let out = WidthClamp::new(0.5, 2.0, WidthClampMode::Center).apply(narrow, &CX);
        assert_eq!(out.size(), Size::new(500.0, 1000.0));
        assert_eq!(out.origin(), Point::new(-100.0, 0.0));
    }

    #[test]
    fn clamps_are_idempotent() {
        for mode in [
            WidthClampMode::Center,
            WidthClampMode::Scale,
            WidthClampMode::CropLeft,
            WidthClampMode::CropRight,
        ] {
            let clamp = WidthClamp::new(0.5, 2.0, mode);
            let once = clamp.apply(wide(), &CX);
            assert_eq!(clamp.apply(once, &CX), once, "{mode:?}");
        }
        let aspect = AspectClamp::new(0.75, 1.5, AspectMode::ScaleToFit);
        let once = aspect.apply(wide(), &CX);
        assert_eq!(aspect.apply(once, &CX), once);
    }

    #[test]
    fn width_clamp_ignores_zero_height_and_reversed_bounds() {
        let flat = Rect::from_origin_size((0.0, 0.0), (100.0, 0.0));
        assert_eq!(WidthClamp::default().apply(flat, &CX), flat);

        let reversed = WidthClamp::new(2.0, 0.5, WidthClampMode::Center);
        assert_eq!(reversed.min_ratio, 0.5);
        assert_eq!(reversed.max_ratio, 2.0);
    }

    #[test]
    fn aspect_clamp_shrinks_offending_axis() {
        let clamp = AspectClamp::new(0.5, 2.0, AspectMode::Letterbox);
        let out = clamp.apply(wide(), &CX);
        assert_eq!(out.size(), Size::new(2000.0, 1000.0));
        assert_eq!(out.origin(), Point::new(250.0, 0.0));

        let tall = Rect::from_origin_size((0.0, 0.0), (100.0, 400.0));
        let out = clamp.apply(tall, &CX);
        assert_eq!(out.size(), Size::new(100.0, 200.0));
        assert_eq!(out.origin(), Point::new(0.0, 100.0));

        let ok = Rect::from_origin_size((0.0, 0.0), (100.0, 100.0));
        assert_eq!(clamp.apply(ok, &CX), ok);
    }

    #[test]
    fn aspect_modes_share_geometry() {
        let modes = [AspectMode::ScaleToFit, AspectMode::Letterbox, AspectMode::Crop];
        let outs = modes.map(|mode| AspectClamp::new(0.5, 2.0, mode).apply(wide(), &CX));
        assert_eq!(outs[0], outs[1]);
        assert_eq!(outs[1], outs[2]);
    }

    #[test]
    fn padding_units() {
        let rect = Rect::from_origin_size((0.0, 0.0), (200.0, 100.0));

        let px = Padding::pixels(Margins::new(10.0, 5.0, 20.0, 15.0)).apply(rect, &CX);
        assert_eq!(px.origin(), Point::new(10.0, 15.0));
        assert_eq!(px.size(), Size::new(170.0, 80.0));

        let own = Padding::new(Margins::uniform(0.1), PaddingUnit::FractionOfSelf).apply(rect, &CX);
        assert_eq!(own.origin(), Point::new(20.0, 10.0));
        assert_eq!(own.size(), Size::new(160.0, 80.0));

        let container = TransformContext::with_container(Size::new(1000.0, 500.0));
        let rel = Padding::new(Margins::uniform(0.01), PaddingUnit::FractionOfContainer);
        let out = rel.apply(rect, &container);
        assert_eq!(out.origin(), Point::new(10.0, 5.0));
        assert_eq!(out.size(), Size::new(180.0, 90.0));

        // Without a container the values are read as pixels.
        let out = rel.apply(rect, &CX);
        assert_eq!(out.origin(), Point::new(0.01, 0.01));
        assert!((out.width() - 199.98).abs() < 1e-9);
        assert!((out.height() - 99.98).abs() < 1e-9);
    }

    #[test]
    fn padding_limits_clamp_each_side() {
        let rect = Rect::from_origin_size((0.0, 0.0), (200.0, 100.0));
        let padding =
            Padding::pixels(Margins::new(-10.0, 50.0, 3.0, 0.0)).with_limits(20.0, 0.0);
        let resolved = padding.resolve(rect.size(), &CX);
        assert_eq!(resolved, Margins::new(0.0, 20.0, 3.0, 0.0));
    }

    #[test]
    fn padding_round_trips_and_clamps_at_zero() {
        let rect = Rect::from_origin_size((5.0, 5.0), (200.0, 100.0));
        let shrink = Padding::pixels(Margins::uniform(12.0));
        let grow = Padding::pixels(Margins::uniform(-12.0));
        let back = grow.apply(shrink.apply(rect, &CX), &CX);
        assert_eq!(back, rect);

        let collapsed = Padding::pixels(Margins::uniform(500.0)).apply(rect, &CX);
        assert_eq!(collapsed.size(), Size::ZERO);
    }

    #[test]
    fn chain_runs_in_order_and_skips_disabled() {
        let rect = Rect::from_origin_size((0.0, 0.0), (2500.0, 1000.0));
        let mut chain = PostProcessChain::new();
        assert_eq!(chain.apply(rect, &CX), rect);

        chain.push(Padding::pixels(Margins::new(250.0, 0.0, 250.0, 0.0)));
        chain.push(WidthClamp::new(0.5, 1.0, WidthClampMode::CropRight));
        let out = chain.apply(rect, &CX);
        assert_eq!(out.origin(), Point::new(250.0, 0.0));
        assert_eq!(out.size(), Size::new(1000.0, 1000.0));

        // Clamp first, then pad: the padding now eats into the clamped width.
        assert!(chain.move_entry(1, 0));
        let out = chain.apply(rect, &CX);
        assert_eq!(out.origin(), Point::new(250.0, 0.0));
        assert_eq!(out.size(), Size::new(500.0, 1000.0));

        assert!(chain.set_enabled(0, false));
        let out = chain.apply(rect, &CX);
        assert_eq!(out.size(), Size::new(2000.0, 1000.0));
    }

    #[test]
    fn chain_index_operations() {
        let mut chain: PostProcessChain = [WidthClamp::default(), WidthClamp::default()]
            .into_iter()
            .collect();
        chain.insert(99, PostProcessEntry::new(AspectClamp::default()));
        assert_eq!(chain.len(), 3);
        assert!(matches!(
            chain.get(2).map(|e| e.transform),
            Some(super::PostProcess::AspectClamp(_))
        ));
        assert!(!chain.move_entry(0, 3));
        assert!(!chain.set_enabled(7, false));
        assert!(chain.remove(3).is_none());
        assert!(chain.remove(0).is_some());
        assert_eq!(chain.iter().count(), 2);

        if let Some(entry) = chain.get_mut(0) {
            entry.transform = Padding::default().into();
        }
        assert!(matches!(
            chain.get(0).map(|e| e.transform),
            Some(super::PostProcess::Padding(_))
        ));

        chain.clear();
        assert!(chain.is_empty());
    }
}
