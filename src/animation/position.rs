use crate::animation::easing::EasingMode;
use crate::animation::tween::{DoneCallback, Tween, UpdateCallback};
use crate::animation::tweener::{TweenParams, Tweener};
use crate::core::math::{quadratic_bezier, Point3};
use crate::core::time::{TickClock, TimeBase};
use crate::{Result, TweenError};
use std::cell::Cell;
use std::rc::Rc;

/// Key of the scalar progress tween behind a [`PositionTweener`]
const MOTION_KEY: i32 = 0;

/// Shape of the path a [`PositionTweener`] moves along
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionPath {
    /// Straight line between two points
    Linear { start: Point3, end: Point3 },
    /// Quadratic bezier between two points, bent towards a control point
    Bezier {
        start: Point3,
        control: Point3,
        end: Point3,
    },
}

impl MotionPath {
    pub fn start(&self) -> Point3 {
        match self {
            MotionPath::Linear { start, .. } | MotionPath::Bezier { start, .. } => *start,
        }
    }

    pub fn end(&self) -> Point3 {
        match self {
            MotionPath::Linear { end, .. } | MotionPath::Bezier { end, .. } => *end,
        }
    }

    /// Point on the path at normalized parameter `u` in `[0, 1]`
    pub fn point_at(&self, u: f64) -> Point3 {
        match self {
            MotionPath::Linear { start, end } => start.lerp(end, u),
            MotionPath::Bezier {
                start,
                control,
                end,
            } => quadratic_bezier(*start, *control, *end, u),
        }
    }
}

/// Optional per-run callbacks for a position tween
#[derive(Default)]
pub struct MotionHooks {
    on_update: Option<UpdateCallback>,
    on_ready: Option<DoneCallback>,
    on_abort: Option<DoneCallback>,
}

impl MotionHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the raw scalar value (distance travelled) every update,
    /// after `current_point` has been recomputed.
    pub fn on_update<F>(mut self, callback: F) -> Self
    where
        F: FnMut(f64) + 'static,
    {
        self.on_update = Some(Box::new(callback));
        self
    }

    pub fn on_ready<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_ready = Some(Box::new(callback));
        self
    }

    pub fn on_abort<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_abort = Some(Box::new(callback));
        self
    }
}

/// Calculates translation from one point to another along a linear or
/// bezier path. Does not move anything itself: consumers read
/// [`current_point`](PositionTweener::current_point) from their own update
/// hook or after each tick.
///
/// A single scalar tween (`from = 0`, `to = distance`) drives the motion;
/// the path math lives entirely inside that tween's update callback. The
/// distance/speed framing replaces an explicit duration: `move_time =
/// distance / speed`.
pub struct PositionTweener {
    tweener: Tweener,
    /// Easing applied to the scalar progress tween
    pub easing: EasingMode,
    pub ping_pong: bool,
    /// Seconds to wait between ping-pong half-cycles
    pub wait_between: f64,
    pub ping_pong_count: i32,
    pub time_base: TimeBase,
    path: MotionPath,
    distance: f64,
    speed: f64,
    move_time: f64,
    current_point: Rc<Cell<Point3>>,
}

impl PositionTweener {
    pub fn new() -> Self {
        Self {
            tweener: Tweener::new(),
            easing: EasingMode::Linear,
            ping_pong: false,
            wait_between: 0.0,
            ping_pong_count: 1,
            time_base: TimeBase::Scaled,
            path: MotionPath::Linear {
                start: Point3::default(),
                end: Point3::default(),
            },
            distance: 0.0,
            speed: 0.0,
            move_time: 0.0,
            current_point: Rc::new(Cell::new(Point3::default())),
        }
    }

    /// Move from `from` to `to` in a straight line at `speed` units/second.
    pub fn tween_between(
        &mut self,
        from: Point3,
        to: Point3,
        speed: f64,
        hooks: MotionHooks,
        clock: &TickClock,
    ) -> Result<()> {
        self.tween_path(MotionPath::Linear { start: from, end: to }, speed, hooks, clock)
    }

    /// Move from `from` along `direction` at `speed` units/second for `time`
    /// seconds. The endpoint is derived, then the motion behaves exactly
    /// like [`tween_between`](PositionTweener::tween_between).
    pub fn tween_along(
        &mut self,
        from: Point3,
        direction: Point3,
        speed: f64,
        time: f64,
        hooks: MotionHooks,
        clock: &TickClock,
    ) -> Result<()> {
        if speed <= 0.0 {
            return Err(TweenError::InvalidSpeed(speed));
        }
        let to = from.add(&direction.normalized().multiply(speed * time));
        self.tween_path(MotionPath::Linear { start: from, end: to }, speed, hooks, clock)
    }

    /// Move from `from` to `to` along a quadratic bezier curve bent towards
    /// `control`, at `speed` units/second over the straight-line distance.
    pub fn tween_curve(
        &mut self,
        from: Point3,
        to: Point3,
        control: Point3,
        speed: f64,
        hooks: MotionHooks,
        clock: &TickClock,
    ) -> Result<()> {
        self.tween_path(
            MotionPath::Bezier {
                start: from,
                control,
                end: to,
            },
            speed,
            hooks,
            clock,
        )
    }

    fn tween_path(
        &mut self,
        path: MotionPath,
        speed: f64,
        hooks: MotionHooks,
        clock: &TickClock,
    ) -> Result<()> {
        if speed <= 0.0 {
            return Err(TweenError::InvalidSpeed(speed));
        }
        let distance = path.start().distance_to(&path.end());
        self.path = path;
        self.distance = distance;
        self.speed = speed;
        self.move_time = distance / speed;
        self.current_point.set(path.start());

        let current_point = Rc::clone(&self.current_point);
        let mut user_update = hooks.on_update;
        let mut params = TweenParams::new(distance)
            .from(0.0)
            .duration(self.move_time)
            .easing(self.easing)
            .time_base(self.time_base)
            .on_update(move |value| {
                // A zero-length path has no interior; any value maps to the
                // endpoint.
                let u = if distance > 0.0 { value / distance } else { 1.0 };
                current_point.set(path.point_at(u));
                if let Some(callback) = user_update.as_mut() {
                    callback(value);
                }
            });
        if self.ping_pong {
            params = params.ping_pong(self.ping_pong_count, self.wait_between);
        }
        params.on_ready = hooks.on_ready;
        params.on_abort = hooks.on_abort;
        self.tweener.tween_to(MOTION_KEY, params, clock)
    }

    /// Advance the motion by one scheduling tick.
    pub fn tick(&mut self, clock: &TickClock) {
        self.tweener.tick(clock);
    }

    /// Stop the motion, firing the abort hook if it was running.
    pub fn stop(&mut self) {
        self.tweener.stop_all();
    }

    pub fn is_running(&self) -> bool {
        self.tweener.is_any_running()
    }

    // -- Read access --

    /// The point reached by the last update
    pub fn current_point(&self) -> Point3 {
        self.current_point.get()
    }

    pub fn start_point(&self) -> Point3 {
        self.path.start()
    }

    pub fn end_point(&self) -> Point3 {
        self.path.end()
    }

    /// Chord from start to end
    pub fn direction(&self) -> Point3 {
        self.path.end().subtract(&self.path.start())
    }

    pub fn path(&self) -> MotionPath {
        self.path
    }

    /// Straight-line distance from start to end
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Derived duration of one traversal, `distance / speed`
    pub fn move_time(&self) -> f64 {
        self.move_time
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// The scalar tween driving the motion
    pub fn progress_tween(&self) -> Option<&Tween> {
        self.tweener.tween(MOTION_KEY)
    }

    pub fn tweener(&self) -> &Tweener {
        &self.tweener
    }

    pub fn tweener_mut(&mut self) -> &mut Tweener {
        &mut self.tweener
    }
}

impl Default for PositionTweener {
    fn default() -> Self {
        Self::new()
    }
}
