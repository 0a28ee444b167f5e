// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Easing curve applied to normalized transition progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Quadratic, starting slow.
    EaseIn,
    /// Quadratic, ending slow.
    #[default]
    EaseOut,
    /// Quadratic, slow at both ends.
    EaseInOut,
    /// Hermite smoothstep, `3t² - 2t³`.
    SmoothStep,
}

impl Easing {
    /// Samples the curve at `t`, clamped into `[0, 1]`.
    ///
    /// Every curve maps `0` to `0` and `1` to `1` exactly.
    #[must_use]
    pub fn sample(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * 0.5
                }
            }
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}
