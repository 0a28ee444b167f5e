// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator seams: where screen insets and container geometry come from.
//!
//! The layout core never queries a platform directly. Hosts implement
//! [`InsetProvider`] over whatever their windowing layer reports and pass a
//! [`ContainerProvider`] describing the parent canvas each tick.

use kurbo::{Point, Rect, Size};

use crate::scale::CanvasScaler;

/// Source of the display size and the usable (safe) region on it.
///
/// Both values are in device pixels, with the origin at the bottom-left of the
/// screen.
pub trait InsetProvider {
    /// Whether the platform reports safe-area insets at all.
    ///
    /// Providers for platforms without inset support return `false`; callers
    /// then treat the whole screen as safe.
    fn supports_insets(&self) -> bool {
        true
    }

    /// Current display size in device pixels.
    fn screen_size(&self) -> Size;

    /// Current safe region in device pixels.
    fn inset_rect(&self) -> Rect;
}

/// Reads the safe region from `provider`, falling back to the full screen
/// (a zero inset) when insets are unsupported.
#[must_use]
pub fn safe_inset(provider: &dyn InsetProvider) -> Rect {
    let screen = provider.screen_size();
    if provider.supports_insets() {
        provider.inset_rect()
    } else {
        Rect::from_origin_size(Point::ZERO, screen)
    }
}

/// An [`InsetProvider`] backed by fixed values.
///
/// Useful for headless hosts and tests, and for platforms whose windowing
/// layer pushes inset updates instead of being polled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticInsets {
    screen: Size,
    inset: Rect,
    supports_insets: bool,
}

impl StaticInsets {
    /// A provider whose safe region is the whole screen.
    #[must_use]
    pub fn full_screen(screen: Size) -> Self {
        Self {
            screen,
            inset: Rect::from_origin_size(Point::ZERO, screen),
            supports_insets: true,
        }
    }

    /// A provider with an explicit safe region.
    #[must_use]
    pub fn new(screen: Size, inset: Rect) -> Self {
        Self {
            screen,
            inset,
            supports_insets: true,
        }
    }

    /// A provider for a platform without safe-area support.
    #[must_use]
    pub fn unsupported(screen: Size) -> Self {
        Self {
            supports_insets: false,
            ..Self::full_screen(screen)
        }
    }

    /// Replaces the screen size.
    #[must_use]
    pub fn with_screen_size(mut self, screen: Size) -> Self {
        self.screen = screen;
        self
    }

    /// Replaces the safe region.
    #[must_use]
    pub fn with_inset(mut self, inset: Rect) -> Self {
        self.inset = inset;
        self
    }

    /// Updates the safe region in place, as a platform callback would.
    pub fn set_inset(&mut self, inset: Rect) {
        self.inset = inset;
    }

    /// Updates the screen size in place.
    pub fn set_screen_size(&mut self, screen: Size) {
        self.screen = screen;
    }
}

impl InsetProvider for StaticInsets {
    fn supports_insets(&self) -> bool {
        self.supports_insets
    }

    fn screen_size(&self) -> Size {
        self.screen
    }

    fn inset_rect(&self) -> Rect {
        self.inset
    }
}

/// Geometry and scale configuration of the container a safe-area element
/// lives in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Container {
    /// Size of the container in its own local units.
    pub size: Size,
    /// Scale-factor configuration of the enclosing canvas.
    pub scaler: CanvasScaler,
}

impl Container {
    /// Creates a container description.
    #[must_use]
    pub const fn new(size: Size, scaler: CanvasScaler) -> Self {
        Self { size, scaler }
    }

    /// A container whose scaler always resolves to `1.0`.
    #[must_use]
    pub const fn unscaled(size: Size) -> Self {
        Self::new(size, CanvasScaler::IDENTITY)
    }
}

/// Source of the [`Container`] a safe-area element is laid out in.
///
/// Returning `None` means the container could not be resolved this tick.
pub trait ContainerProvider {
    /// The current container, if one is available.
    fn container(&self) -> Option<Container>;
}

impl ContainerProvider for Container {
    fn container(&self) -> Option<Container> {
        Some(*self)
    }
}

impl ContainerProvider for Option<Container> {
    fn container(&self) -> Option<Container> {
        *self
    }
}
