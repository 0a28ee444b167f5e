// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device-space to container-space conversion.

use kurbo::{Point, Rect, Size};

/// Rescales a device-space inset rectangle into a container's local space.
///
/// Both corners are mapped with `container = device / screen * container_size`
/// per axis. A zero (or non-finite) screen dimension maps that axis with the
/// identity instead of dividing by zero, so the corresponding coordinates come
/// back unchanged.
#[must_use]
pub fn map_inset_to_container(device_inset: Rect, screen: Size, container: Size) -> Rect {
    let sx = axis_scale(screen.width, container.width);
    let sy = axis_scale(screen.height, container.height);
    if sx.is_none() || sy.is_none() {
        tracing::debug!(?screen, "degenerate screen size; mapping axis unchanged");
    }
    let sx = sx.unwrap_or(1.0);
    let sy = sy.unwrap_or(1.0);

    let min = Point::new(device_inset.min_x() * sx, device_inset.min_y() * sy);
    let max = Point::new(device_inset.max_x() * sx, device_inset.max_y() * sy);
    Rect::from_points(min, max)
}

fn axis_scale(device: f64, container: f64) -> Option<f64> {
    if device.is_finite() && device != 0.0 {
        Some(container / device)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Size};

    use super::map_inset_to_container;

    #[test]
    fn maps_corners_proportionally() {
        let inset = Rect::new(0.0, 102.0, 1170.0, 2430.0);
        let mapped = map_inset_to_container(
            inset,
            Size::new(1170.0, 2532.0),
            Size::new(585.0, 1266.0),
        );
        assert_eq!(mapped, Rect::new(0.0, 51.0, 585.0, 1215.0));
    }

    #[test]
    fn identical_spaces_are_identity() {
        let inset = Rect::new(0.0, 102.0, 1080.0, 1815.0);
        let size = Size::new(1080.0, 1920.0);
        assert_eq!(map_inset_to_container(inset, size, size), inset);
    }

    #[test]
    fn zero_screen_dimension_leaves_axis_unchanged() {
        let inset = Rect::new(10.0, 20.0, 110.0, 220.0);
        let mapped =
            map_inset_to_container(inset, Size::new(0.0, 400.0), Size::new(500.0, 800.0));
        assert_eq!(mapped.x0, 10.0);
        assert_eq!(mapped.x1, 110.0);
        assert_eq!(mapped.y0, 40.0);
        assert_eq!(mapped.y1, 440.0);
    }
}
