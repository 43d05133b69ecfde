use crate::animation::easing::EasingMode;
use crate::animation::tweener::TweenParams;
use crate::core::time::TimeBase;

/// Callback invoked with the tween's value on every update
pub type UpdateCallback = Box<dyn FnMut(f64)>;
/// Callback invoked once when a tween completes or is aborted
pub type DoneCallback = Box<dyn FnMut()>;

/// Cooperative task state of one tween.
///
/// `Retiring` holds the task alive for one extra tick after the ready
/// callback, so a caller inspecting the tween from inside that callback's
/// frame still sees a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum TweenPhase {
    Idle,
    Playing,
    Waiting { resume_at: f64 },
    Retiring,
    Done,
}

/// The state of one keyed scalar interpolation.
///
/// Owned and mutated exclusively by its [`Tweener`](crate::animation::tweener::Tweener);
/// external code reads it through the accessors. `current` always holds the
/// last value delivered to the update callback and survives stop, replacement
/// and completion, so a later run can inherit it as an implicit start value.
pub struct Tween {
    key: i32,
    from: f64,
    to: f64,
    current: f64,
    progress: f64,
    start_time: f64,
    duration: f64,
    end_time: f64,
    time_base: TimeBase,
    easing: EasingMode,
    ping_pong: bool,
    ping_pong_remaining: i32,
    wait_between: f64,
    is_running: bool,
    pub(crate) phase: TweenPhase,
    pub(crate) on_update: Option<UpdateCallback>,
    pub(crate) on_ready: Option<DoneCallback>,
    pub(crate) on_abort: Option<DoneCallback>,
    pub(crate) followup: Option<Box<TweenParams>>,
}

impl Tween {
    pub(crate) fn with_key(key: i32) -> Self {
        Self {
            key,
            from: 0.0,
            to: 0.0,
            current: 0.0,
            progress: 0.0,
            start_time: 0.0,
            duration: 0.0,
            end_time: 0.0,
            time_base: TimeBase::default(),
            easing: EasingMode::default(),
            ping_pong: false,
            ping_pong_remaining: 0,
            wait_between: 0.0,
            is_running: false,
            phase: TweenPhase::Idle,
            on_update: None,
            on_ready: None,
            on_abort: None,
            followup: None,
        }
    }

    /// Load a fresh run into this record, replacing callbacks and timing.
    /// `current` is deliberately left untouched until the first update.
    pub(crate) fn configure(&mut self, params: TweenParams, from: f64, now: f64) {
        self.from = from;
        self.to = params.to;
        self.duration = params.duration;
        self.start_time = now;
        self.end_time = now + params.duration;
        self.progress = 0.0;
        self.time_base = params.time_base;
        self.easing = params.easing;
        self.ping_pong = params.ping_pong;
        self.ping_pong_remaining = params.ping_pong_count.max(0);
        self.wait_between = params.wait_between;
        self.is_running = false;
        self.phase = TweenPhase::Idle;
        self.on_update = params.on_update;
        self.on_ready = params.on_ready;
        self.on_abort = params.on_abort;
        self.followup = params.followup;
    }

    pub(crate) fn start(&mut self) {
        self.is_running = true;
        self.phase = TweenPhase::Playing;
    }

    /// Record and deliver a new value.
    pub(crate) fn update_value(&mut self, value: f64) {
        self.current = value;
        if let Some(callback) = self.on_update.as_mut() {
            callback(value);
        }
    }

    pub(crate) fn set_progress(&mut self, progress: f64) {
        self.progress = progress;
    }

    /// Stop the run and fire the abort callback. Value fields are left
    /// intact so the tween stays inspectable and reusable as a continuity
    /// source.
    pub(crate) fn abort(&mut self) {
        self.is_running = false;
        if let Some(callback) = self.on_abort.as_mut() {
            callback();
        }
    }

    /// Cancel the underlying task without touching value state. Any queued
    /// continuation dies with the task.
    pub(crate) fn cancel_task(&mut self) {
        self.phase = TweenPhase::Done;
        self.followup = None;
    }

    /// Enter the inter-cycle wait after a ping-pong half-cycle.
    pub(crate) fn wait(&mut self, now: f64) {
        self.phase = TweenPhase::Waiting {
            resume_at: now + self.wait_between,
        };
    }

    /// Swap direction after the inter-cycle wait and open a new time window.
    pub(crate) fn reverse(&mut self, now: f64) {
        std::mem::swap(&mut self.from, &mut self.to);
        self.start_time = now;
        self.end_time = now + self.duration;
        self.progress = 0.0;
        self.ping_pong_remaining -= 1;
        self.phase = TweenPhase::Playing;
    }

    /// Normal completion: fire the ready callback and keep the task alive
    /// for one retirement tick.
    pub(crate) fn finish(&mut self) {
        self.is_running = false;
        if let Some(callback) = self.on_ready.as_mut() {
            callback();
        }
        self.phase = TweenPhase::Retiring;
    }

    pub(crate) fn retire(&mut self) {
        self.phase = TweenPhase::Done;
    }

    pub(crate) fn take_followup(&mut self) -> Option<Box<TweenParams>> {
        self.followup.take()
    }

    // -- Read access --

    pub fn key(&self) -> i32 {
        self.key
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    /// The last value delivered to the update callback (`from` if the tween
    /// never started).
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Clamped progress of the active cycle in `[0, 1]`, before easing.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn time_base(&self) -> TimeBase {
        self.time_base
    }

    pub fn easing(&self) -> EasingMode {
        self.easing
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn ping_pong(&self) -> bool {
        self.ping_pong
    }

    /// Half-cycle reversals still to perform
    pub fn ping_pong_remaining(&self) -> i32 {
        self.ping_pong_remaining
    }

    pub fn wait_between(&self) -> f64 {
        self.wait_between
    }

    /// Whether a task is still scheduled against this tween. Stays true for
    /// one tick after completion, then false.
    pub fn is_scheduled(&self) -> bool {
        !matches!(self.phase, TweenPhase::Idle | TweenPhase::Done)
    }
}
