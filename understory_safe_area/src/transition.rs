// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-based interpolation of the applied frame.
//!
//! [`TransitionController`] is a two-state machine. While **idle** the applied
//! frame equals the last target. When a new target arrives and animation is
//! allowed it becomes **animating**: each [`tick`](TransitionController::tick)
//! advances elapsed time, eases the normalized progress and interpolates from
//! the start frame to the target. Reaching the end snaps exactly to the target
//! and returns to idle.
//!
//! A new target while animating restarts from the current interpolated frame;
//! there is no queue, the latest target wins.

use core::time::Duration;

use kurbo::Rect;

use crate::easing::Easing;
use crate::geometry::{lerp_rect, rect_approx_eq};

/// Whether the host is running for real or previewing in an editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Normal runtime; transitions animate when enabled.
    #[default]
    Live,
    /// Editor preview; targets always apply immediately.
    EditPreview,
}

/// Animation configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionSettings {
    /// Animate target changes instead of applying them immediately.
    pub enabled: bool,
    /// Time from start to target.
    pub duration: Duration,
    /// Curve applied to the normalized progress.
    pub easing: Easing,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            duration: Duration::from_millis(300),
            easing: Easing::EaseOut,
        }
    }
}

impl TransitionSettings {
    /// Settings that never animate.
    pub const IMMEDIATE: Self = Self {
        enabled: false,
        duration: Duration::ZERO,
        easing: Easing::Linear,
    };

    /// Enabled animation with the given duration and curve.
    #[must_use]
    pub const fn animated(duration: Duration, easing: Easing) -> Self {
        Self {
            enabled: true,
            duration,
            easing,
        }
    }
}

/// An in-flight interpolation.
///
/// Owned by a [`TransitionController`]; the accessors expose a read-only view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    start: Rect,
    target: Rect,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl Transition {
    /// Frame the animation started from.
    #[must_use]
    pub fn start(&self) -> Rect {
        self.start
    }

    /// Frame the animation ends on.
    #[must_use]
    pub fn target(&self) -> Rect {
        self.target
    }

    /// Time advanced so far.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Total duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Curve applied to the progress.
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Normalized progress in `[0, 1]`. A zero duration is always complete.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Returns `true` once elapsed time has reached the duration.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// The frame at the current progress.
    ///
    /// Exactly `start` at zero progress and exactly `target` when finished.
    #[must_use]
    pub fn current(&self) -> Rect {
        let t = self.progress();
        if t >= 1.0 {
            return self.target;
        }
        let eased = self.easing.sample(t);
        if eased <= 0.0 {
            return self.start;
        }
        lerp_rect(self.start, self.target, eased)
    }
}

/// Drives the applied frame towards the latest target.
#[derive(Clone, Debug)]
pub struct TransitionController {
    settings: TransitionSettings,
    applied: Rect,
    active: Option<Transition>,
}

impl TransitionController {
    /// Creates an idle controller whose applied frame is `initial`.
    #[must_use]
    pub fn new(settings: TransitionSettings, initial: Rect) -> Self {
        Self {
            settings,
            applied: initial,
            active: None,
        }
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> TransitionSettings {
        self.settings
    }

    /// Replaces the settings.
    ///
    /// Disabling animation while one is running snaps to its target.
    pub fn set_settings(&mut self, settings: TransitionSettings) {
        self.settings = settings;
        if !settings.enabled {
            self.finish();
        }
    }

    /// The frame currently applied to the element.
    #[must_use]
    pub fn applied(&self) -> Rect {
        self.applied
    }

    /// The frame the controller is heading for (the applied frame when idle).
    #[must_use]
    pub fn target(&self) -> Rect {
        self.active.map_or(self.applied, |t| t.target)
    }

    /// The in-flight transition, if any.
    #[must_use]
    pub fn active(&self) -> Option<&Transition> {
        self.active.as_ref()
    }

    /// Returns `true` while animating.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Hands the controller a new target.
    ///
    /// Targets equal (within tolerance) to the current one are ignored.
    /// Otherwise the target is applied immediately when animation is disabled
    /// or `mode` is [`ExecutionMode::EditPreview`], and animated from the
    /// current applied frame when not. Returns `true` if an animation started.
    pub fn retarget(&mut self, target: Rect, mode: ExecutionMode) -> bool {
        if rect_approx_eq(target, self.target()) {
            return false;
        }
        if !self.settings.enabled || mode == ExecutionMode::EditPreview {
            self.applied = target;
            self.active = None;
            return false;
        }
        if let Some(prev) = self.active {
            tracing::trace!(from = ?prev.target, ?target, "transition retargeted");
        } else {
            tracing::trace!(from = ?self.applied, ?target, "transition started");
        }
        self.active = Some(Transition {
            start: self.applied,
            target,
            elapsed: Duration::ZERO,
            duration: self.settings.duration,
            easing: self.settings.easing,
        });
        true
    }

    /// Advances the animation by `dt` and returns the applied frame.
    ///
    /// When idle this just returns the applied frame.
    pub fn tick(&mut self, dt: Duration) -> Rect {
        if let Some(transition) = &mut self.active {
            transition.elapsed = transition.elapsed.saturating_add(dt);
            self.applied = transition.current();
            if transition.is_finished() {
                tracing::trace!(to = ?transition.target, "transition finished");
                self.active = None;
            }
        }
        self.applied
    }

    /// Ends any running animation by snapping to its target.
    pub fn finish(&mut self) {
        if let Some(transition) = self.active.take() {
            self.applied = transition.target;
        }
    }

    /// Sets the applied frame directly, cancelling any animation.
    pub fn jump_to(&mut self, rect: Rect) {
        self.active = None;
        self.applied = rect;
    }
}
