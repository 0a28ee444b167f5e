// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use kurbo::{Point, Rect, Size};

use crate::geometry::rect_approx_eq;
use crate::mapping::map_inset_to_container;
use crate::post_process::{PostProcessChain, TransformContext};
use crate::provider::{Container, ContainerProvider, InsetProvider, safe_inset};
use crate::strategy::{LayoutParams, Strategy, compute_target};
use crate::transition::{ExecutionMode, Transition, TransitionController, TransitionSettings};

/// Runs the full layout pass for one set of inputs.
///
/// Maps `inset` from device space into the container, resolves the canvas
/// scale factor, applies the strategy of `params` and then every enabled entry
/// of `chain`, in order. The result is the target frame in container-local
/// space, before any transition.
#[must_use]
pub fn layout(
    params: &LayoutParams,
    chain: &PostProcessChain,
    inset: Rect,
    screen: Size,
    container: &Container,
) -> Rect {
    let scale = container.scaler.scale_factor(screen);
    let safe = map_inset_to_container(inset, screen, container.size);
    let target = compute_target(params, safe, container.size, scale);
    chain.apply(target, &TransformContext::with_container(container.size))
}

/// Why a tick did not run the layout pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The container provider returned nothing.
    MissingContainer,
}

/// What a call to [`SafeArea::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing moved.
    Unchanged,
    /// The applied frame changed and is now at rest.
    Applied,
    /// A transition is in flight.
    Animating,
    /// The tick was skipped and the applied frame left untouched.
    Skipped(SkipReason),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Inputs {
    inset: Rect,
    screen: Size,
    container: Container,
}

/// A UI element kept inside the safe area of its container.
///
/// Call [`tick`](Self::tick) once per frame. Inputs are compared against the
/// previous tick and the layout pass only reruns when they (or the
/// configuration) change; [`force_recompute`](Self::force_recompute) drops
/// that cache.
#[derive(Clone, Debug)]
pub struct SafeArea {
    params: LayoutParams,
    chain: PostProcessChain,
    transition: TransitionController,
    mode: ExecutionMode,
    inputs: Option<Inputs>,
    target: Option<Rect>,
    changed: bool,
    /// Applied frame as reported by the last completed tick.
    reported: Rect,
}

impl Default for SafeArea {
    fn default() -> Self {
        Self::new(LayoutParams::default())
    }
}

impl SafeArea {
    /// Creates an element with the given layout parameters, an empty
    /// post-process chain and no animation.
    #[must_use]
    pub fn new(params: LayoutParams) -> Self {
        Self {
            params,
            chain: PostProcessChain::new(),
            transition: TransitionController::new(TransitionSettings::default(), Rect::ZERO),
            mode: ExecutionMode::Live,
            inputs: None,
            target: None,
            changed: false,
            reported: Rect::ZERO,
        }
    }

    /// Replaces the post-process chain.
    #[must_use]
    pub fn with_chain(mut self, chain: PostProcessChain) -> Self {
        self.chain = chain;
        self.inputs = None;
        self
    }

    /// Replaces the transition settings.
    #[must_use]
    pub fn with_transition(mut self, settings: TransitionSettings) -> Self {
        self.transition.set_settings(settings);
        self
    }

    /// Current layout parameters.
    #[must_use]
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Replaces the layout parameters.
    pub fn set_params(&mut self, params: LayoutParams) {
        if self.params != params {
            self.params = params;
            self.inputs = None;
        }
    }

    /// Replaces the strategy, keeping the padding.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.set_params(LayoutParams {
            strategy,
            ..self.params
        });
    }

    /// Replaces the uniform padding, keeping the strategy.
    pub fn set_padding(&mut self, padding: f64) {
        self.set_params(LayoutParams {
            padding,
            ..self.params
        });
    }

    /// The registered post-process chain.
    #[must_use]
    pub fn chain(&self) -> &PostProcessChain {
        &self.chain
    }

    /// Mutable access to the post-process chain.
    ///
    /// The next tick recomputes with whatever is registered then.
    pub fn chain_mut(&mut self) -> &mut PostProcessChain {
        self.inputs = None;
        &mut self.chain
    }

    /// Current transition settings.
    #[must_use]
    pub fn transition_settings(&self) -> TransitionSettings {
        self.transition.settings()
    }

    /// Replaces the transition settings.
    pub fn set_transition(&mut self, settings: TransitionSettings) {
        self.transition.set_settings(settings);
    }

    /// Current execution mode.
    #[must_use]
    pub fn execution_mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Switches between live and edit-preview execution.
    ///
    /// Entering edit preview snaps any running animation to its target.
    pub fn set_execution_mode(&mut self, mode: ExecutionMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        if mode == ExecutionMode::EditPreview {
            self.transition.finish();
        }
        self.inputs = None;
    }

    /// Runs one scheduling step.
    ///
    /// Reads the insets, maps them into the container, runs the strategy and
    /// the post-process chain when inputs changed, then advances the
    /// transition by `dt`. Without a container nothing is recomputed or
    /// applied.
    pub fn tick(
        &mut self,
        insets: &dyn InsetProvider,
        container: &dyn ContainerProvider,
        dt: Duration,
    ) -> TickOutcome {
        self.changed = false;
        let Some(container) = container.container() else {
            tracing::warn!("safe area has no container; keeping the previous frame");
            return TickOutcome::Skipped(SkipReason::MissingContainer);
        };

        let inputs = Inputs {
            inset: safe_inset(insets),
            screen: insets.screen_size(),
            container,
        };
        if self.inputs != Some(inputs) {
            self.inputs = Some(inputs);
            let target = layout(
                &self.params,
                &self.chain,
                inputs.inset,
                inputs.screen,
                &inputs.container,
            );
            match self.target.replace(target) {
                None => {
                    self.changed = true;
                    self.transition.jump_to(target);
                }
                Some(prev) => {
                    self.changed = !rect_approx_eq(prev, target);
                    self.transition.retarget(target, self.mode);
                }
            }
            if self.changed {
                tracing::debug!(?target, "safe area target changed");
            }
        }

        // Settings or mode changes may have snapped the frame since the last
        // tick, so compare with what was last reported.
        let applied = self.transition.tick(dt);
        let moved = applied != self.reported;
        self.reported = applied;
        if self.transition.is_animating() {
            TickOutcome::Animating
        } else if moved || self.changed {
            TickOutcome::Applied
        } else {
            TickOutcome::Unchanged
        }
    }

    /// The last computed target frame, before any transition.
    ///
    /// [`Rect::ZERO`] until the first successful tick.
    #[must_use]
    pub fn current_safe_rect(&self) -> Rect {
        self.target.unwrap_or(Rect::ZERO)
    }

    /// The frame currently applied to the element.
    #[must_use]
    pub fn applied_rect(&self) -> Rect {
        self.transition.applied()
    }

    /// Returns `true` if the last tick produced a different target.
    #[must_use]
    pub fn has_changed_since_last_tick(&self) -> bool {
        self.changed
    }

    /// Returns `true` if `point` (container-local) lies inside the applied
    /// frame.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.applied_rect().contains(point)
    }

    /// Forgets the cached inputs so the next tick reruns the layout pass even
    /// if nothing appears to have changed.
    pub fn force_recompute(&mut self) {
        self.inputs = None;
    }

    /// Returns `true` while a transition is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transition.is_animating()
    }

    /// Snapshot of the element state for inspectors and overlays.
    #[must_use]
    pub fn debug_info(&self) -> SafeAreaDebugInfo {
        let enabled_transforms = self.chain.iter().filter(|e| e.enabled).count();
        SafeAreaDebugInfo {
            params: self.params,
            transform_count: self.chain.len(),
            enabled_transforms,
            inset: self.inputs.map(|i| i.inset),
            screen_size: self.inputs.map(|i| i.screen),
            container: self.inputs.map(|i| i.container),
            target: self.target,
            applied: self.transition.applied(),
            transition: self.transition.active().copied(),
            execution_mode: self.mode,
            changed: self.changed,
        }
    }
}

/// Debug snapshot of a [`SafeArea`].
#[derive(Clone, Copy, Debug)]
pub struct SafeAreaDebugInfo {
    /// Layout parameters.
    pub params: LayoutParams,
    /// Number of registered post-process entries.
    pub transform_count: usize,
    /// Number of enabled post-process entries.
    pub enabled_transforms: usize,
    /// Device-space safe region seen on the last computed tick.
    pub inset: Option<Rect>,
    /// Screen size seen on the last computed tick.
    pub screen_size: Option<Size>,
    /// Container seen on the last computed tick.
    pub container: Option<Container>,
    /// Last computed target frame.
    pub target: Option<Rect>,
    /// Currently applied frame.
    pub applied: Rect,
    /// In-flight transition.
    pub transition: Option<Transition>,
    /// Execution mode.
    pub execution_mode: ExecutionMode,
    /// Whether the last tick changed the target.
    pub changed: bool,
}
