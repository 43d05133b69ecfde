use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Easing curves for tween progress
///
/// Each curve maps a normalized progress value so that `apply(0.0) == 0.0`
/// and `apply(1.0) == 1.0`. Inputs outside `[0, 1]` extrapolate along the
/// same formula; the scheduler clamps progress before easing, so no clamp
/// happens here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EasingMode {
    /// Constant velocity (no easing)
    #[default]
    Linear,
    /// Slow start
    EaseIn,
    /// Slow end
    EaseOut,
    /// Cubic smoothstep (slow start and end)
    Smooth,
    /// Quintic smootherstep (flatter ends than `Smooth`)
    Smoother,
    /// Quadratic acceleration
    Exponential,
}

impl EasingMode {
    /// Apply the easing curve to a normalized progress value
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            EasingMode::Linear => t,
            EasingMode::EaseIn => 1.0 - (t * PI * 0.5).cos(),
            EasingMode::EaseOut => (t * PI * 0.5).sin(),
            EasingMode::Smooth => t * t * (3.0 - 2.0 * t),
            EasingMode::Smoother => t * t * t * (t * (6.0 * t - 15.0) + 10.0),
            EasingMode::Exponential => t * t,
        }
    }
}
