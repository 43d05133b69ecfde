use instant::Instant;
use serde::{Deserialize, Serialize};

/// Which clock a tween samples its progress from.
///
/// The scaled base follows the host's time scale (slow motion, pause); the
/// unscaled base always advances with real time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeBase {
    #[default]
    Scaled,
    Unscaled,
}

/// A pair of "now" samples, one per time base, taken once per scheduling
/// tick and handed to [`Tweener::tick`](crate::animation::tweener::Tweener::tick).
///
/// Both values must be monotone non-decreasing across successive ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickClock {
    pub scaled: f64,
    pub unscaled: f64,
}

impl TickClock {
    pub fn new(scaled: f64, unscaled: f64) -> Self {
        Self { scaled, unscaled }
    }

    /// The current time on the requested base, in seconds.
    pub fn now(&self, base: TimeBase) -> f64 {
        match base {
            TimeBase::Scaled => self.scaled,
            TimeBase::Unscaled => self.unscaled,
        }
    }
}

/// Real-time tick source for hosts without their own frame clock.
///
/// Accumulates wall-clock time into the unscaled base and `dt × time_scale`
/// into the scaled base. Setting the time scale to zero freezes the scaled
/// base while the unscaled base keeps running.
#[derive(Debug)]
pub struct HostClock {
    last: Instant,
    scaled: f64,
    unscaled: f64,
    time_scale: f64,
}

impl HostClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            scaled: 0.0,
            unscaled: 0.0,
            time_scale: 1.0,
        }
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Set the scaled-base rate. Negative scales are clamped to zero so the
    /// clock stays monotone.
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.max(0.0);
    }

    /// Advance both bases by the real time elapsed since the previous sample
    /// and return the current reading.
    pub fn sample(&mut self) -> TickClock {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        self.unscaled += dt;
        self.scaled += dt * self.time_scale;
        TickClock::new(self.scaled, self.unscaled)
    }
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}
