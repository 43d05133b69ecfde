//! Prelude module for common tweenlet types
//!
//! This module re-exports the most commonly used types and functions
//! for easy importing with `use tweenlet::prelude::*;`

pub use crate::core::{
    math::{inverse_lerp, lerp, quadratic_bezier, Point3},
    time::{HostClock, TickClock, TimeBase},
};

pub use crate::animation::{
    easing::EasingMode,
    inout::InOutTweener,
    position::{MotionHooks, MotionPath, PositionTweener},
    tween::Tween,
    tweener::{TweenEvent, TweenEvents, TweenParams, Tweener},
};

pub use crate::{Result, TweenError};
