/// Simulation clock.
/// Turns host frame timestamps into simulated seconds using a speed multiplier.
pub struct SimulationClock {
    /// Timestamp (seconds) of the previous tick, if any.
    last: Option<f64>,
    /// Simulated seconds per wall-clock second.
    speed: f64,
    /// Upper bound accepted by `set_speed`.
    max_speed: f64,
}

impl SimulationClock {
    pub fn new(speed: f64, max_speed: f64) -> Self {
        let mut clock = Self {
            last: None,
            speed: 0.0,
            max_speed: max_speed.max(0.0),
        };
        clock.set_speed(speed);
        clock
    }

    /// Advance to `now` (seconds). Returns the time factor for this frame.
    ///
    /// The first tick, a backwards step, or a non-finite timestamp yields 0.
    pub fn tick(&mut self, now: f64) -> f64 {
        if !now.is_finite() {
            log::debug!("ignoring non-finite frame timestamp {now}");
            return 0.0;
        }
        let delta = match self.last {
            Some(last) if now >= last => now - last,
            Some(last) => {
                log::debug!("clock regression: {now} < {last}, treating delta as 0");
                0.0
            }
            None => 0.0,
        };
        self.last = Some(now);
        delta * self.speed
    }

    /// Set the speed multiplier, clamped to `[0, max_speed]`. NaN is ignored.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_nan() {
            log::warn!("ignoring NaN speed, keeping {}", self.speed);
            return;
        }
        let clamped = speed.clamp(0.0, self.max_speed);
        if clamped != speed {
            log::warn!("speed {speed} out of range, clamped to {clamped}");
        }
        self.speed = clamped;
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Timestamp of the most recent tick.
    pub fn last_timestamp(&self) -> Option<f64> {
        self.last
    }
}
