//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seedable RNG only
//! - Stable iteration order (obstacles oldest first)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod body;
pub mod clock;
pub mod collision;
pub mod crash;
pub mod obstacles;
pub mod rng;
pub mod run;
pub mod state;

pub use body::{Body, TrailEmitter};
pub use clock::SimClock;
pub use collision::{Rect, body_hitbox, body_hits_obstacle};
pub use crash::{CrashPhase, CrashProgress, CrashSequence, DeathCause};
pub use obstacles::{
    AdvanceReport, Obstacle, ObstaclePool, gap_range, scroll_speed, spawn_interval_ticks,
};
pub use rng::{PcgSource, RandomSource, ScriptedSource};
pub use run::RunController;
pub use state::{CrashView, GameEvent, RunState, Snapshot};
