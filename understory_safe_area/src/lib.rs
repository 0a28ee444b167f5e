// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_safe_area --heading-base-level=0

//! Understory Safe Area: keep UI elements clear of notches, rounded corners
//! and system bars.
//!
//! This crate computes the frame a UI element should occupy inside its parent
//! container so that its content avoids device obstructions, while respecting
//! a canvas scaling scheme. It is headless: the host reports screen insets and
//! container geometry, and reads back the frame to apply.
//!
//! Each tick runs a fixed sequence:
//! 1. Read the device-space safe region from an [`InsetProvider`].
//! 2. Map it into container space ([`map_inset_to_container`]) and resolve the
//!    canvas scale factor ([`resolve_scale`]).
//! 3. Turn it into a target frame with a [`Strategy`] ([`compute_target`]).
//! 4. Run the ordered [`PostProcessChain`] of [`WidthClamp`], [`AspectClamp`]
//!    and [`Padding`] transforms.
//! 5. Hand the target to a [`TransitionController`], which applies it
//!    immediately or interpolates towards it over time.
//!
//! [`SafeArea`] bundles all of this for one element, and
//! [`SafeAreaRegistry`] ticks many elements together.
//!
//! ## Coordinates
//!
//! Frames are [`kurbo::Rect`]s. Device and container spaces both put the
//! origin at the bottom-left corner with `y` growing upwards, matching how
//! platforms report safe areas: `y0` is a frame's bottom edge, `y1` its top.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//!
//! use kurbo::{Rect, Size};
//! use understory_safe_area::{
//!     Container, LayoutParams, SafeArea, StaticInsets, Strategy, WidthClamp, WidthClampMode,
//! };
//!
//! let screen = Size::new(1080.0, 1920.0);
//! // A notch eats the top 105 pixels and a home indicator the bottom 102.
//! let insets = StaticInsets::new(screen, Rect::new(0.0, 102.0, 1080.0, 1815.0));
//! let container = Container::unscaled(screen);
//!
//! let mut area = SafeArea::new(LayoutParams::new(Strategy::Fill));
//! area.chain_mut().push(WidthClamp::new(0.5, 0.6, WidthClampMode::Center));
//! area.tick(&insets, &container, Duration::from_millis(16));
//!
//! let frame = area.applied_rect();
//! assert_eq!(frame.height(), 1713.0);
//! assert!(frame.width() <= 0.6 * 1713.0 + 1e-9);
//! ```
//!
//! ## Failure policy
//!
//! Nothing here returns an error or panics on bad geometry. Zero-sized
//! screens, containers or reference resolutions fall back to identity
//! mappings and no-op transforms, and sizes are clamped at zero. A missing
//! container skips the tick and keeps the previous frame; diagnostics go
//! through `tracing`.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod easing;
mod geometry;
mod mapping;
mod post_process;
mod provider;
mod registry;
mod safe_area;
mod scale;
mod strategy;
mod transition;

pub use easing::Easing;
pub use geometry::{Margins, SideConfig, Sides, clamp_size, frame, lerp_rect, rect_approx_eq};
pub use mapping::map_inset_to_container;
pub use post_process::{
    AspectClamp, AspectMode, Padding, PaddingUnit, PostProcess, PostProcessChain,
    PostProcessEntry, Transform, TransformContext, WidthClamp, WidthClampMode,
};
pub use provider::{Container, ContainerProvider, InsetProvider, StaticInsets, safe_inset};
pub use registry::{SafeAreaId, SafeAreaRegistry};
pub use safe_area::{SafeArea, SafeAreaDebugInfo, SkipReason, TickOutcome, layout};
pub use scale::{CanvasScaler, ScaleMode, resolve_scale};
pub use strategy::{LayoutParams, Strategy, compute_target};
pub use transition::{ExecutionMode, Transition, TransitionController, TransitionSettings};
