//! # Tweenlet
//!
//! A keyed tween scheduler driven by a host-supplied per-frame tick.
//!
//! Each [`Tweener`](animation::tweener::Tweener) owns a set of named scalar
//! interpolations. Tweens can be replaced in place while preserving value
//! continuity, aborted without losing their last known state, looped in
//! ping-pong fashion with an inter-cycle delay, and chained into sequences.
//! Position strategies translate a single scalar tween into motion along a
//! linear or quadratic bezier path.

pub mod animation;
pub mod core;
pub mod prelude;

// Re-export public API
pub use crate::core::{
    math::Point3,
    time::{HostClock, TickClock, TimeBase},
};

pub use crate::animation::{
    easing::EasingMode,
    inout::InOutTweener,
    position::{MotionHooks, MotionPath, PositionTweener},
    tween::Tween,
    tweener::{TweenEvent, TweenEvents, TweenParams, Tweener},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, TweenError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum TweenError {
    #[error("invalid duration: {0} (must be non-negative)")]
    InvalidDuration(f64),

    #[error("invalid speed: {0} (must be positive)")]
    InvalidSpeed(f64),
}

/// Error type alias for convenience
pub type Error = TweenError;
