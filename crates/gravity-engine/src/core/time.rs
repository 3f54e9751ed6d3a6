/// Largest frame delta (seconds) fed into a single tick.
/// Frame hitches beyond this are simply dropped.
pub const MAX_FRAME_DT: f64 = 0.1;

/// Clamp a host frame delta to `[0, MAX_FRAME_DT]` and scale it by `speed`.
/// NaN deltas and negative speeds count as zero.
pub fn scaled_dt(frame_dt: f64, speed: f64) -> f64 {
    if frame_dt.is_nan() {
        return 0.0;
    }
    frame_dt.clamp(0.0, MAX_FRAME_DT) * speed.max(0.0)
}

/// Simulated time accumulated by a session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    /// Simulated seconds elapsed.
    elapsed: f64,
    /// Ticks executed.
    ticks: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one tick of `dt` simulated seconds.
    pub fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
        self.ticks += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_delta_passes_through() {
        assert!((scaled_dt(0.016, 1.0) - 0.016).abs() < 1e-15);
    }

    #[test]
    fn hitch_is_clamped_before_scaling() {
        assert!((scaled_dt(2.5, 1.0) - MAX_FRAME_DT).abs() < 1e-15);
        assert!((scaled_dt(2.5, 3.0) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn bad_inputs_yield_zero() {
        assert_eq!(scaled_dt(-0.5, 1.0), 0.0);
        assert_eq!(scaled_dt(f64::NAN, 1.0), 0.0);
        assert_eq!(scaled_dt(0.016, -2.0), 0.0);
        assert_eq!(scaled_dt(f64::INFINITY, 1.0), MAX_FRAME_DT);
    }

    #[test]
    fn clock_accumulates() {
        let mut clock = SimClock::new();
        clock.advance(0.016);
        clock.advance(0.016);
        assert_eq!(clock.ticks(), 2);
        assert!((clock.elapsed() - 0.032).abs() < 1e-12);
        clock.reset();
        assert_eq!(clock.ticks(), 0);
    }
}
