pub mod easing;
pub mod inout;
pub mod position;
pub mod tween;
pub mod tweener;

// Re-export commonly used types and functions for convenience
pub use easing::EasingMode;
pub use inout::InOutTweener;
pub use position::{MotionHooks, MotionPath, PositionTweener};
pub use tween::Tween;
pub use tweener::{TweenEvent, TweenEvents, TweenParams, Tweener};
