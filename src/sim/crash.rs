//! Post-death choreography
//!
//! One elapsed-time counter drives everything that happens after a crash:
//! impact hold, screen shake, white flash, the delayed explosion sprite and
//! finally the result panel. Retry input is only honoured once the result is
//! visible.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Flew into an obstacle column
    Obstacle,
    /// Left the playable vertical extent
    Boundary,
}

impl DeathCause {
    /// How long the body stays frozen on impact
    pub fn hold_ms(&self) -> f32 {
        match self {
            DeathCause::Obstacle => CRASH_HOLD_OBSTACLE_MS,
            DeathCause::Boundary => CRASH_HOLD_MS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeathCause::Obstacle => "obstacle",
            DeathCause::Boundary => "boundary",
        }
    }
}

/// Where the sequence currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashPhase {
    /// Frozen at the point of impact, explosion pending
    Impact,
    /// Explosion sprite animating
    Exploding,
    /// Explosion done, result panel not yet shown
    Aftermath,
    /// Result panel shown, retry accepted
    Result,
}

/// Milestones crossed during one `advance`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrashProgress {
    pub explosion_started: bool,
    pub result_revealed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrashSequence {
    pub cause: DeathCause,
    /// Time since death
    pub elapsed_ms: f32,
    /// Impact freeze, depends on cause
    pub hold_ms: f32,
    /// Pause before the explosion starts
    pub delay_ms: f32,
    /// Extra pause after the explosion starts before the result shows
    pub result_delay_ms: f32,
    pub explosion_active: bool,
    /// Explosion sprite frame (0-based)
    pub frame: u8,
    frame_timer_ms: f32,
    /// Explosion centre (body centre at impact)
    pub anchor: Vec2,
}

impl CrashSequence {
    pub fn start(cause: DeathCause, anchor: Vec2) -> Self {
        Self {
            cause,
            elapsed_ms: 0.0,
            hold_ms: cause.hold_ms(),
            delay_ms: EXPLOSION_DELAY_MS,
            result_delay_ms: RESULT_DELAY_MS,
            explosion_active: true,
            frame: 0,
            frame_timer_ms: 0.0,
            anchor,
        }
    }

    /// Advance by one tick's worth of time
    pub fn advance(&mut self, dt_ms: f32) -> CrashProgress {
        let dt_ms = dt_ms.max(0.0);
        let was_started = self.explosion_started();
        let was_visible = self.is_result_visible();

        self.elapsed_ms += dt_ms;

        if self.explosion_active && self.explosion_started() {
            self.frame_timer_ms += dt_ms;
            if self.frame_timer_ms >= 1000.0 / EXPLOSION_FPS {
                self.frame_timer_ms = 0.0;
                self.frame += 1;
                if self.frame >= EXPLOSION_FRAMES {
                    self.explosion_active = false;
                }
            }
        }

        CrashProgress {
            explosion_started: !was_started && self.explosion_started(),
            result_revealed: !was_visible && self.is_result_visible(),
        }
    }

    pub fn explosion_started(&self) -> bool {
        self.elapsed_ms >= self.delay_ms
    }

    /// Sprite frame to draw, if the explosion is on screen
    pub fn explosion_frame(&self) -> Option<u8> {
        (self.explosion_active && self.explosion_started())
            .then(|| self.frame.min(EXPLOSION_FRAMES - 1))
    }

    pub fn is_result_visible(&self) -> bool {
        self.elapsed_ms >= self.delay_ms + self.result_delay_ms
    }

    /// Body frozen at the impact point
    pub fn is_holding(&self) -> bool {
        self.elapsed_ms < self.hold_ms
    }

    pub fn shake_active(&self) -> bool {
        self.elapsed_ms < SHAKE_MS
    }

    /// White flash opacity, fading to 0
    pub fn flash_alpha(&self) -> f32 {
        (FLASH_MS - self.elapsed_ms).max(0.0) / FLASH_FADE_MS
    }

    pub fn phase(&self) -> CrashPhase {
        if self.is_result_visible() {
            CrashPhase::Result
        } else if !self.explosion_started() {
            CrashPhase::Impact
        } else if self.explosion_active {
            CrashPhase::Exploding
        } else {
            CrashPhase::Aftermath
        }
    }
}
