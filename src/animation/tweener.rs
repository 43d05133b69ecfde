use crate::animation::easing::EasingMode;
use crate::animation::tween::{DoneCallback, Tween, TweenPhase, UpdateCallback};
use crate::core::math::{inverse_lerp, lerp};
use crate::core::time::{TickClock, TimeBase};
use crate::{Result, TweenError};
use std::collections::HashMap;

/// Descriptor for one tween run.
///
/// Only the target value is required; everything else has the scheduler's
/// defaults (duration 1.0, linear easing, scaled time, no looping). A missing
/// `from` makes the run inherit the keyed tween's current value, which is how
/// chained or replaced runs pick up continuity without the caller tracking
/// state.
pub struct TweenParams {
    pub(crate) to: f64,
    pub(crate) from: Option<f64>,
    pub(crate) duration: f64,
    pub(crate) ping_pong: bool,
    pub(crate) wait_between: f64,
    pub(crate) ping_pong_count: i32,
    pub(crate) easing: EasingMode,
    pub(crate) time_base: TimeBase,
    pub(crate) on_update: Option<UpdateCallback>,
    pub(crate) on_ready: Option<DoneCallback>,
    pub(crate) on_abort: Option<DoneCallback>,
    pub(crate) followup: Option<Box<TweenParams>>,
}

impl TweenParams {
    pub fn new(to: f64) -> Self {
        Self {
            to,
            from: None,
            duration: 1.0,
            ping_pong: false,
            wait_between: 0.0,
            ping_pong_count: 1,
            easing: EasingMode::Linear,
            time_base: TimeBase::Scaled,
            on_update: None,
            on_ready: None,
            on_abort: None,
            followup: None,
        }
    }

    /// Explicit start value. Without this the run starts from the keyed
    /// tween's current value (0.0 for a fresh key).
    pub fn from(mut self, from: f64) -> Self {
        self.from = Some(from);
        self
    }

    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn easing(mut self, easing: EasingMode) -> Self {
        self.easing = easing;
        self
    }

    pub fn time_base(mut self, base: TimeBase) -> Self {
        self.time_base = base;
        self
    }

    /// Sample progress from the unscaled clock.
    pub fn unscaled(self) -> Self {
        self.time_base(TimeBase::Unscaled)
    }

    /// Reverse direction `count` times at the ends of the range, pausing
    /// `wait_between` seconds (on the tween's time base) before each
    /// reversal. A count of zero or less leaves the tween non-looping.
    pub fn ping_pong(mut self, count: i32, wait_between: f64) -> Self {
        self.ping_pong = true;
        self.ping_pong_count = count;
        self.wait_between = wait_between;
        self
    }

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

    /// Queue a follow-up run under the same key, started by the scheduler
    /// after this run's ready callback. Stopping the current run also drops
    /// the continuation.
    pub fn then(mut self, next: TweenParams) -> Self {
        self.followup = Some(Box::new(next));
        self
    }

    fn validate(&self) -> Result<()> {
        if self.duration < 0.0 {
            return Err(TweenError::InvalidDuration(self.duration));
        }
        if let Some(next) = &self.followup {
            next.validate()?;
        }
        Ok(())
    }
}

/// Lifecycle notifications delivered to the listeners of a [`Tweener`].
///
/// Diagnostic hooks only; the scheduler never uses them for control flow.
/// Full tween state is available through [`Tweener::tween`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenEvent {
    Started { key: i32 },
    Ready { key: i32 },
    Aborted { key: i32 },
    ValueUpdated { key: i32, value: f64 },
}

impl TweenEvent {
    pub fn key(&self) -> i32 {
        match self {
            TweenEvent::Started { key }
            | TweenEvent::Ready { key }
            | TweenEvent::Aborted { key }
            | TweenEvent::ValueUpdated { key, .. } => *key,
        }
    }
}

/// Listener registry owned by one scheduler instance.
///
/// Events fire synchronously from the same tick as the corresponding
/// per-tween callback, in the same relative order.
#[derive(Default)]
pub struct TweenEvents {
    listeners: Vec<Box<dyn FnMut(&TweenEvent)>>,
}

impl TweenEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&TweenEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn emit(&mut self, event: TweenEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

/// Keyed tween scheduler.
///
/// Owns a map of integer keys to [`Tween`] records and steps every live run
/// once per [`tick`](Tweener::tick). Reusing a key replaces the run in place:
/// the old run's abort callback fires synchronously before the new run's
/// first update. Completed tweens are never evicted, so their last value
/// remains available as an implicit start value for later runs.
pub struct Tweener {
    tweens: HashMap<i32, Tween>,
    events: TweenEvents,
    enabled: bool,
}

impl Tweener {
    pub fn new() -> Self {
        Self {
            tweens: HashMap::new(),
            events: TweenEvents::new(),
            enabled: true,
        }
    }

    /// Whether the owner may currently have tasks scheduled against it.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Toggle owner eligibility. While disabled, `tween_to` degrades to an
    /// immediate stop instead of scheduling a task. Disabling does not stop
    /// runs that are already live; call [`stop_all`](Tweener::stop_all) for
    /// that.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// The listener registry for lifecycle events.
    pub fn events_mut(&mut self) -> &mut TweenEvents {
        &mut self.events
    }

    /// Read access to the tween under `key`, if the key was ever used.
    pub fn tween(&self, key: i32) -> Option<&Tween> {
        self.tweens.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tween> {
        self.tweens.values()
    }

    /// Number of keys ever used (completed entries included).
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// True iff at least one owned tween is running.
    pub fn is_any_running(&self) -> bool {
        self.tweens.values().any(|tween| tween.is_running())
    }

    /// Start (or replace) the tween under `key`.
    ///
    /// The descriptor is validated before the existing run is touched, so a
    /// rejected call never aborts a healthy tween. On success the start
    /// value is delivered to the update callback synchronously; progress is
    /// then driven by [`tick`](Tweener::tick) against `clock`'s time base.
    pub fn tween_to(&mut self, key: i32, params: TweenParams, clock: &TickClock) -> Result<()> {
        params.validate()?;
        if !self.tweens.contains_key(&key) {
            log::debug!("tween {} registered", key);
            self.tweens.insert(key, Tween::with_key(key));
        }
        let tween = match self.tweens.get_mut(&key) {
            Some(tween) => tween,
            None => return Ok(()), // unreachable: inserted above
        };
        Self::stop_tween(tween, &mut self.events);

        let from = params.from.unwrap_or(tween.current());
        let now = clock.now(params.time_base);
        tween.configure(params, from, now);
        tween.update_value(from);
        self.events.emit(TweenEvent::ValueUpdated { key, value: from });

        if self.enabled {
            tween.start();
            self.events.emit(TweenEvent::Started { key });
        } else {
            log::warn!("tweener is disabled, aborting tween {}", key);
            Self::stop_tween(tween, &mut self.events);
        }
        Ok(())
    }

    /// Stop every running tween. Stopped tweens keep their state; calling
    /// this again is a no-op.
    pub fn stop_all(&mut self) {
        if !self.is_any_running() {
            return;
        }
        log::debug!("stopping all tweens");
        for tween in self.tweens.values_mut() {
            Self::stop_tween(tween, &mut self.events);
        }
    }

    /// Stop the tween under `key` if it is running.
    pub fn stop(&mut self, key: i32) {
        if let Some(tween) = self.tweens.get_mut(&key) {
            Self::stop_tween(tween, &mut self.events);
        }
    }

    /// Advance every scheduled task by one cooperative step.
    ///
    /// The host calls this once per frame with a freshly sampled clock.
    /// Continuations queued with [`TweenParams::then`] start after the pass
    /// that completed their predecessor.
    pub fn tick(&mut self, clock: &TickClock) {
        let keys: Vec<i32> = self.tweens.keys().copied().collect();
        let mut continuations = Vec::new();
        for key in keys {
            if let Some(tween) = self.tweens.get_mut(&key) {
                if let Some(next) = Self::step(tween, clock, &mut self.events) {
                    continuations.push((key, next));
                }
            }
        }
        for (key, params) in continuations {
            // Validated when the chain was submitted.
            if let Err(err) = self.tween_to(key, *params, clock) {
                log::warn!("chained tween {} rejected: {}", key, err);
            }
        }
    }

    fn stop_tween(tween: &mut Tween, events: &mut TweenEvents) {
        if tween.is_running() {
            tween.abort();
            events.emit(TweenEvent::Aborted { key: tween.key() });
        }
        tween.cancel_task();
    }

    /// One scheduling step for one task. Returns the continuation to start
    /// if the task just completed with a queued follow-up.
    fn step(
        tween: &mut Tween,
        clock: &TickClock,
        events: &mut TweenEvents,
    ) -> Option<Box<TweenParams>> {
        let now = clock.now(tween.time_base());
        loop {
            match tween.phase {
                TweenPhase::Idle | TweenPhase::Done => return None,
                TweenPhase::Retiring => {
                    tween.retire();
                    return None;
                }
                TweenPhase::Waiting { resume_at } => {
                    // The value stays frozen during the wait; no update fires.
                    if now < resume_at {
                        return None;
                    }
                    tween.reverse(now);
                    // Continue into Playing on the same tick, mirroring a
                    // cycle restart.
                }
                TweenPhase::Playing => {
                    if now >= tween.end_time() {
                        // Terminal update of the cycle, delivered even if the
                        // easing math would round short.
                        let value = tween.to();
                        tween.set_progress(1.0);
                        tween.update_value(value);
                        events.emit(TweenEvent::ValueUpdated {
                            key: tween.key(),
                            value,
                        });
                        if tween.ping_pong() && tween.ping_pong_remaining() > 0 {
                            tween.wait(now);
                            return None;
                        }
                        tween.finish();
                        events.emit(TweenEvent::Ready { key: tween.key() });
                        return tween.take_followup();
                    }
                    let progress =
                        inverse_lerp(tween.start_time(), tween.end_time(), now).clamp(0.0, 1.0);
                    let value = lerp(tween.from(), tween.to(), tween.easing().apply(progress));
                    tween.set_progress(progress);
                    tween.update_value(value);
                    events.emit(TweenEvent::ValueUpdated {
                        key: tween.key(),
                        value,
                    });
                    return None;
                }
            }
        }
    }
}

impl Default for Tweener {
    fn default() -> Self {
        Self::new()
    }
}
