use crate::animation::easing::EasingMode;
use crate::animation::tweener::{TweenParams, Tweener};
use crate::core::time::TickClock;
use crate::Result;
use std::cell::RefCell;
use std::rc::Rc;

const ENVELOPE_KEY: i32 = 0;

/// Drives a weight up to a target and back down to zero as one chained
/// sequence: 0 → `target_weight` with the in-curve, then → 0 with the
/// out-curve. Useful for temporary effects that fade in and out (blend
/// weights, UI highlights, audio ducking).
///
/// Retriggering while a previous envelope is still live replaces it and
/// restarts from the current weight, so overlapping triggers stay smooth.
pub struct InOutTweener {
    tweener: Tweener,
    pub target_weight: f64,
    pub easing_in: EasingMode,
    pub easing_out: EasingMode,
    pub duration_in: f64,
    pub duration_out: f64,
}

impl InOutTweener {
    pub fn new() -> Self {
        Self {
            tweener: Tweener::new(),
            target_weight: 1.0,
            easing_in: EasingMode::Linear,
            easing_out: EasingMode::Linear,
            duration_in: 1.0,
            duration_out: 1.0,
        }
    }

    /// Start (or retrigger) the envelope. `update` receives the weight on
    /// every change; `reset` fires exactly once when the envelope ends, on
    /// either path: normal completion of the out-phase, or abort of
    /// whichever phase was live.
    pub fn tween_in_out<U, R>(&mut self, update: U, reset: R, clock: &TickClock) -> Result<()>
    where
        U: FnMut(f64) + 'static,
        R: FnMut() + 'static,
    {
        let update = Rc::new(RefCell::new(update));
        let reset = Rc::new(RefCell::new(reset));

        let update_out = Rc::clone(&update);
        let reset_on_out_abort = Rc::clone(&reset);
        let reset_on_done = Rc::clone(&reset);
        let out_phase = TweenParams::new(0.0)
            .from(self.target_weight)
            .duration(self.duration_out)
            .easing(self.easing_out)
            .on_update(move |value| (&mut *update_out.borrow_mut())(value))
            .on_abort(move || (&mut *reset_on_out_abort.borrow_mut())())
            .on_ready(move || (&mut *reset_on_done.borrow_mut())());

        let update_in = Rc::clone(&update);
        let reset_on_in_abort = reset;
        let in_phase = TweenParams::new(self.target_weight)
            .duration(self.duration_in)
            .easing(self.easing_in)
            .on_update(move |value| (&mut *update_in.borrow_mut())(value))
            .on_abort(move || (&mut *reset_on_in_abort.borrow_mut())())
            .then(out_phase);

        self.tweener.tween_to(ENVELOPE_KEY, in_phase, clock)
    }

    /// Advance the envelope by one scheduling tick.
    pub fn tick(&mut self, clock: &TickClock) {
        self.tweener.tick(clock);
    }

    /// Cancel the envelope; fires the reset hook if a phase was live.
    pub fn stop(&mut self) {
        self.tweener.stop_all();
    }

    /// The current weight (0.0 before the first trigger)
    pub fn weight(&self) -> f64 {
        self.tweener
            .tween(ENVELOPE_KEY)
            .map(|tween| tween.current())
            .unwrap_or(0.0)
    }

    pub fn is_running(&self) -> bool {
        self.tweener.is_any_running()
    }

    pub fn tweener(&self) -> &Tweener {
        &self.tweener
    }

    pub fn tweener_mut(&mut self) -> &mut Tweener {
        &mut self.tweener
    }
}

impl Default for InOutTweener {
    fn default() -> Self {
        Self::new()
    }
}
