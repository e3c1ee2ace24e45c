//! Wall clock to fixed-step conversion
//!
//! Turns the host's per-frame timestamps into a whole number of fixed ticks,
//! carrying the remainder so simulated time never drifts from wall time.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_CATCH_UP_TICKS, SIM_STEP_MS};

/// Fixed-step accumulator driven by frame timestamps (milliseconds)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimClock {
    last_ms: Option<f64>,
    accumulator_ms: f64,
    step_ms: f64,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimClock {
    pub fn new() -> Self {
        Self::with_step(SIM_STEP_MS)
    }

    /// Clock with a custom step size. Non-positive steps fall back to 60 Hz.
    pub fn with_step(step_ms: f64) -> Self {
        let step_ms = if step_ms.is_finite() && step_ms > 0.0 {
            step_ms
        } else {
            SIM_STEP_MS
        };
        Self {
            last_ms: None,
            accumulator_ms: 0.0,
            step_ms,
        }
    }

    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    /// Time carried over to the next frame, always in `[0, step)`
    pub fn accumulator_ms(&self) -> f64 {
        self.accumulator_ms
    }

    /// Feed a frame timestamp, returning how many fixed ticks to run.
    ///
    /// The first call only records a baseline. Backward or non-finite
    /// timestamps produce no ticks. Stalls longer than
    /// [`MAX_CATCH_UP_TICKS`] are cut short and the excess time dropped.
    pub fn advance(&mut self, timestamp_ms: f64) -> u32 {
        if !timestamp_ms.is_finite() {
            return 0;
        }
        let Some(last) = self.last_ms else {
            self.last_ms = Some(timestamp_ms);
            return 0;
        };

        let delta = timestamp_ms - last;
        if delta <= 0.0 {
            if delta < 0.0 {
                log::debug!("Clock went backwards by {:.3} ms, rebasing", -delta);
                self.last_ms = Some(timestamp_ms);
            }
            return 0;
        }
        self.last_ms = Some(timestamp_ms);

        self.accumulator_ms += delta;
        let due = (self.accumulator_ms / self.step_ms).floor();
        if due >= MAX_CATCH_UP_TICKS as f64 {
            log::warn!(
                "Clock stalled for {:.0} ms, dropping time past {} ticks",
                delta,
                MAX_CATCH_UP_TICKS
            );
            self.accumulator_ms = 0.0;
            return MAX_CATCH_UP_TICKS;
        }

        let mut ticks = due as u32;
        self.accumulator_ms -= ticks as f64 * self.step_ms;
        // Float residue must not escape [0, step)
        if self.accumulator_ms >= self.step_ms {
            self.accumulator_ms -= self.step_ms;
            ticks = ticks.saturating_add(1);
        }
        self.accumulator_ms = self.accumulator_ms.max(0.0);
        ticks
    }

    /// Forget the baseline (e.g. after the host was suspended)
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.accumulator_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_frame_is_baseline() {
        let mut clock = SimClock::new();
        assert_eq!(clock.advance(123_456.0), 0);
        assert_eq!(clock.accumulator_ms(), 0.0);
    }

    #[test]
    fn test_carries_remainder() {
        let mut clock = SimClock::with_step(10.0);
        clock.advance(0.0);
        assert_eq!(clock.advance(25.0), 2);
        assert!((clock.accumulator_ms() - 5.0).abs() < 1e-9);
        assert_eq!(clock.advance(30.0), 1);
        assert!(clock.accumulator_ms().abs() < 1e-9);
    }

    #[test]
    fn test_catches_up_after_stall() {
        let mut clock = SimClock::with_step(10.0);
        clock.advance(1000.0);
        // A backgrounded tab: one second later
        assert_eq!(clock.advance(2000.0), 100);
        assert!(clock.accumulator_ms().abs() < 1e-9);
    }

    #[test]
    fn test_backwards_time_is_zero_ticks() {
        let mut clock = SimClock::with_step(10.0);
        clock.advance(100.0);
        assert_eq!(clock.advance(50.0), 0);
        // Rebased: measured from 50 now
        assert_eq!(clock.advance(70.0), 2);
        assert_eq!(clock.advance(f64::NAN), 0);
    }

    #[test]
    fn test_huge_gap_is_capped() {
        let mut clock = SimClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(1.0e11), MAX_CATCH_UP_TICKS);
        let acc = clock.accumulator_ms();
        assert!(acc >= 0.0 && acc < clock.step_ms());

        // Back to normal pacing right after
        assert_eq!(clock.advance(1.0e11 + 2.0 * SIM_STEP_MS + 1.0), 2);

        let mut clock = SimClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(f64::MAX), MAX_CATCH_UP_TICKS);
    }

    #[test]
    fn test_stall_below_cap_runs_in_full() {
        let mut clock = SimClock::with_step(10.0);
        clock.advance(0.0);
        let cap_ms = MAX_CATCH_UP_TICKS as f64 * 10.0;
        assert_eq!(clock.advance(cap_ms - 5.0), MAX_CATCH_UP_TICKS - 1);
    }

    proptest! {
        #[test]
        fn prop_never_drifts(deltas in proptest::collection::vec(0.0f64..100.0, 1..200)) {
            let mut clock = SimClock::new();
            let mut t = 5_000.0;
            clock.advance(t);
            let mut ticks: u64 = 0;
            for d in &deltas {
                t += d;
                ticks += clock.advance(t) as u64;
                let acc = clock.accumulator_ms();
                prop_assert!(acc >= 0.0 && acc < clock.step_ms());
            }
            let elapsed = t - 5_000.0;
            let simulated = ticks as f64 * clock.step_ms();
            prop_assert!(simulated <= elapsed + 1e-6);
            prop_assert!(elapsed - simulated < clock.step_ms() + 1e-6);
        }
    }
}
