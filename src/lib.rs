//! Floppy Plane - A side-scrolling obstacle-avoidance arcade game
//!
//! Core modules:
//! - `sim`: Deterministic fixed-step simulation (clock, physics, obstacles, crash choreography)
//! - `mode`: Selectable tuning profiles (Arcade / Pro)
//! - `scores`: Best-score-by-mode tracking
//! - `persistence`: Key-value stores for best scores
//! - `ui`: Crash panel layout and hit-testing
//! - `platform`: Browser host bindings

pub mod mode;
pub mod persistence;
pub mod platform;
pub mod scores;
pub mod settings;
pub mod sim;
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use mode::{Mode, ModeProfile};
pub use scores::{BestScores, ScoreTracker};
pub use settings::Settings;
pub use sim::{GameEvent, RunController, RunState};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const SIM_HZ: f64 = 60.0;
    /// Fixed simulation step, in milliseconds
    pub const SIM_STEP_MS: f64 = 1000.0 / SIM_HZ;
    /// Longest stall the clock catches up on (one hour of ticks)
    pub const MAX_CATCH_UP_TICKS: u32 = 60 * 60 * 60;
    /// Fixed simulation step as seen by the physics, in milliseconds
    pub const SIM_DT_MS: f32 = SIM_STEP_MS as f32;

    /// World dimensions (logical pixels)
    pub const WORLD_WIDTH: f32 = 400.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Body geometry - x never changes during a run
    pub const BODY_X: f32 = 66.0;
    pub const BODY_START_Y: f32 = 240.0;
    pub const BODY_WIDTH: f32 = 96.0;
    pub const BODY_HEIGHT: f32 = 40.0;

    /// Vertical velocity clamp (px per tick, negative = up)
    pub const MIN_RISE_SPEED: f32 = -11.0;
    pub const MAX_FALL_SPEED: f32 = 12.5;
    /// Per-tick velocity damping
    pub const VELOCITY_DAMPING: f32 = 0.996;

    /// Tilt follows velocity
    pub const TILT_PER_VELOCITY: f32 = 0.075;
    pub const TILT_MIN: f32 = -0.62;
    pub const TILT_MAX: f32 = 1.05;
    pub const TILT_SMOOTHING: f32 = 0.18;

    /// Menu idle bob
    pub const BOB_AMPLITUDE: f32 = 6.0;
    pub const BOB_FREQUENCY: f32 = 0.004;

    /// Hitbox padding: the body grows horizontally, obstacles shrink
    pub const BODY_PAD_X: f32 = 10.0;
    pub const OBSTACLE_PAD_X: f32 = 16.0;

    /// Obstacles
    pub const OBSTACLE_WIDTH: f32 = 100.0;
    /// Spawn this far past the right edge
    pub const OBSTACLE_SPAWN_OFFSET: f32 = 18.0;
    /// Retired once the trailing edge is this far past the left edge
    pub const OBSTACLE_RETIRE_MARGIN: f32 = 20.0;
    /// Gap narrowing at full difficulty (min / max bound)
    pub const GAP_SHRINK_MIN: f32 = 12.0;
    pub const GAP_SHRINK_MAX: f32 = 8.0;
    /// Score at which gap narrowing saturates
    pub const GAP_RAMP_SCORE: f32 = 20.0;
    /// Scroll speed ramp
    pub const SPEED_RAMP: f32 = 1.6;
    pub const SPEED_RAMP_SCORE: f32 = 35.0;
    /// Body-centre to gap-centre distance that counts as a near miss
    pub const NEAR_MISS_THRESHOLD: f32 = 7.0;

    /// Background scroll relative to obstacle speed
    pub const PARALLAX_FACTOR: f32 = 0.22;

    /// Crash choreography (milliseconds)
    pub const EXPLOSION_DELAY_MS: f32 = 950.0;
    pub const RESULT_DELAY_MS: f32 = 500.0;
    pub const EXPLOSION_FPS: f32 = 24.0;
    pub const EXPLOSION_FRAMES: u8 = 6;
    pub const EXPLOSION_SIZE: f32 = 90.0;
    pub const SHAKE_MS: f32 = 320.0;
    pub const FLASH_MS: f32 = 150.0;
    /// Flash alpha = remaining / this
    pub const FLASH_FADE_MS: f32 = 400.0;
    /// Impact freeze: obstacle hits hold shorter than any other death
    pub const CRASH_HOLD_OBSTACLE_MS: f32 = 130.0;
    pub const CRASH_HOLD_MS: f32 = 280.0;

    /// Trail puff cadence (milliseconds)
    pub const TRAIL_FAST_EVERY_MS: f32 = 18.0;
    pub const TRAIL_SLOW_EVERY_MS: f32 = 34.0;
    /// Rising faster than this uses the fast cadence
    pub const TRAIL_FAST_RISE: f32 = -1.2;
}

/// Clamp that tolerates inverted bounds (min wins), like `max(min, min(max, v))`
#[inline]
pub fn clamp(v: f32, min: f32, max: f32) -> f32 {
    min.max(max.min(v))
}

/// Linear interpolation from `a` to `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
