//! The controlled body (the plane)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::mode::ModeProfile;
use crate::{clamp, lerp};

/// Player body. `pos` is the top-left corner of its sprite box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (px per tick, negative = up)
    pub vy: f32,
    /// Tilt in radians, nose-down positive
    pub angle: f32,
    pub alive: bool,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BODY_X, BODY_START_Y),
            size: Vec2::new(BODY_WIDTH, BODY_HEIGHT),
            vy: 0.0,
            angle: 0.0,
            alive: true,
        }
    }
}

impl Body {
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// One fixed tick of gravity, damping and clamping.
    ///
    /// `time_ms` only feeds the wind term.
    pub fn integrate(&mut self, profile: &ModeProfile, dt_ms: f32, time_ms: f32) {
        let wind = if profile.wind_strength > 0.0 {
            (time_ms * 0.0019).sin() * profile.wind_strength
        } else {
            0.0
        };
        let seconds = dt_ms / 1000.0;

        self.vy += profile.gravity + wind * seconds * 60.0;
        self.vy *= VELOCITY_DAMPING;
        self.vy = clamp(self.vy, MIN_RISE_SPEED, MAX_FALL_SPEED);
        self.pos.y += self.vy;

        let target = clamp(self.vy * TILT_PER_VELOCITY, TILT_MIN, TILT_MAX);
        self.angle = lerp(self.angle, target, TILT_SMOOTHING);
    }

    /// Flap while airborne. The impulse replaces the velocity, nudged by the
    /// current motion within [-0.8, 1.9], so repeated taps never stack.
    pub fn flap(&mut self, profile: &ModeProfile) {
        let speed_boost = clamp(-self.vy * 0.13, -0.8, 1.9);
        self.vy = profile.flap_impulse - speed_boost;
    }

    /// Menu hover, derived from absolute time so it never drifts
    pub fn idle_bob(&mut self, time_ms: f32) {
        self.pos.y = BODY_START_Y + (time_ms * BOB_FREQUENCY).sin() * BOB_AMPLITUDE;
        self.angle = lerp(self.angle, (time_ms * 0.006).sin() * 0.08, 0.1);
    }

    /// Top or bottom of the world reached
    pub fn out_of_bounds(&self) -> bool {
        self.top() <= 0.0 || self.bottom() >= WORLD_HEIGHT
    }
}

/// Accumulates tick time and reports how many trail puffs are due
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrailEmitter {
    pending_ms: f32,
}

impl TrailEmitter {
    /// Advance by `dt_ms`, returning the number of puffs to emit
    pub fn advance(&mut self, dt_ms: f32, vy: f32) -> u32 {
        self.pending_ms += dt_ms;
        let every = if vy < TRAIL_FAST_RISE {
            TRAIL_FAST_EVERY_MS
        } else {
            TRAIL_SLOW_EVERY_MS
        };
        let mut puffs = 0;
        while self.pending_ms >= every {
            self.pending_ms -= every;
            puffs += 1;
        }
        puffs
    }

    pub fn reset(&mut self) {
        self.pending_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_integrate_one_tick_under_pro_gravity() {
        let mut body = Body::default();
        body.vy = 5.0;
        body.integrate(&ModeProfile::PRO, SIM_DT_MS, 0.0);
        assert!((body.vy - 5.38836).abs() < 1e-4);
        assert!((body.pos.y - 245.38836).abs() < 1e-3);
        assert!(body.angle > 0.0);
    }

    #[test]
    fn test_flap_never_stacks() {
        let profile = &ModeProfile::PRO;
        let mut body = Body::default();

        // Climbing: carries a little momentum into the flap
        body.vy = -10.0;
        body.flap(profile);
        assert!((body.vy - (-7.8 - 1.3)).abs() < 1e-5);

        // Mashing flap converges instead of stacking
        for _ in 0..20 {
            body.flap(profile);
        }
        assert!(body.vy >= -7.8 - 1.9 - 1e-5);

        // Falling fast: the boost bottoms out at -0.8
        body.vy = 12.5;
        body.flap(profile);
        assert!((body.vy - (-7.8 + 0.8)).abs() < 1e-5);

        body.vy = 0.0;
        body.flap(profile);
        assert!((body.vy - -7.8).abs() < 1e-6);
    }

    #[test]
    fn test_idle_bob_stays_centred() {
        let mut body = Body::default();
        for i in 0..10_000 {
            body.idle_bob(i as f32 * SIM_DT_MS);
            assert!((body.pos.y - BODY_START_Y).abs() <= BOB_AMPLITUDE + 1e-3);
        }
    }

    #[test]
    fn test_out_of_bounds() {
        let mut body = Body::default();
        assert!(!body.out_of_bounds());
        body.pos.y = 0.0;
        assert!(body.out_of_bounds());
        body.pos.y = WORLD_HEIGHT - BODY_HEIGHT;
        assert!(body.out_of_bounds());
    }

    #[test]
    fn test_trail_cadence() {
        let mut trail = TrailEmitter::default();
        // Gliding: one puff per 34 ms
        assert_eq!(trail.advance(SIM_DT_MS, 0.0), 0);
        assert_eq!(trail.advance(SIM_DT_MS, 0.0), 0);
        assert_eq!(trail.advance(SIM_DT_MS, 0.0), 1);
        trail.reset();
        // Climbing: one puff per 18 ms
        assert_eq!(trail.advance(40.0, -5.0), 2);
    }

    proptest! {
        #[test]
        fn prop_velocity_stays_clamped(
            start_vy in -50.0f32..50.0,
            flaps in proptest::collection::vec(any::<bool>(), 1..300),
        ) {
            let mut body = Body::default();
            body.vy = start_vy;
            for (i, flap) in flaps.iter().enumerate() {
                if *flap {
                    body.flap(&ModeProfile::ARCADE);
                }
                body.integrate(&ModeProfile::ARCADE, SIM_DT_MS, i as f32 * SIM_DT_MS);
                prop_assert!(body.vy >= MIN_RISE_SPEED && body.vy <= MAX_FALL_SPEED);
            }
        }
    }
}
