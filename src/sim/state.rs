//! Run state, events and read-only snapshots
//!
//! Everything the host needs to draw a frame or react to gameplay lives here.

use glam::Vec2;
use serde::Serialize;

use super::body::Body;
use super::collision::Rect;
use super::crash::{CrashPhase, DeathCause};
use super::obstacles::Obstacle;
use crate::mode::Mode;

/// Top-level run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum RunState {
    /// Title screen, body hovering
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Run ended, crash sequence playing
    Crashed,
}

/// Gameplay events, drained by the host once per frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    RunStarted { mode: Mode },
    Scored { score: u32 },
    NearMiss { total: u32 },
    /// Fired exactly once per death; the crash cue hangs off this
    Crashed { cause: DeathCause, score: u32 },
    NewBest { mode: Mode, score: u32 },
    ExplosionStarted { at: Vec2 },
    ResultRevealed,
    ReturnedToMenu,
    ModeChanged { mode: Mode },
    /// Spawn one trail particle (renderer-owned)
    TrailPuff { origin: Vec2, drift: f32 },
}

/// Crash fields the renderer needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrashView {
    pub cause: DeathCause,
    pub phase: CrashPhase,
    pub elapsed_ms: f32,
    pub holding: bool,
    pub explosion_frame: Option<u8>,
    pub explosion_anchor: Vec2,
    pub explosion_size: f32,
    pub shake: bool,
    pub flash_alpha: f32,
    pub result_visible: bool,
    /// Retry button, once interactable
    pub retry: Option<Rect>,
}

/// Read-only view of a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub state: RunState,
    pub mode: Mode,
    pub body: Body,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub near_misses: u32,
    pub best: u32,
    pub scroll_speed: f32,
    pub parallax: f32,
    pub crash: Option<CrashView>,
}
