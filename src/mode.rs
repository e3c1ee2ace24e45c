//! Selectable tuning profiles
//!
//! A mode is picked from the menu and stays fixed for the whole run.

use serde::{Deserialize, Serialize};

/// Player-selectable game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Mode {
    Arcade,
    #[default]
    Pro,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Arcade, Mode::Pro];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Arcade => "ARCADE",
            Mode::Pro => "PRO",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "arcade" => Some(Mode::Arcade),
            "pro" => Some(Mode::Pro),
            _ => None,
        }
    }

    /// The other mode
    pub fn toggled(&self) -> Self {
        match self {
            Mode::Arcade => Mode::Pro,
            Mode::Pro => Mode::Arcade,
        }
    }

    /// Key used by best-score stores
    pub fn storage_key(&self) -> &'static str {
        match self {
            Mode::Arcade => "floppy_best_arcade",
            Mode::Pro => "floppy_best_pro",
        }
    }

    pub fn profile(&self) -> &'static ModeProfile {
        match self {
            Mode::Arcade => &ModeProfile::ARCADE,
            Mode::Pro => &ModeProfile::PRO,
        }
    }
}

/// Immutable tuning constants for one mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeProfile {
    pub mode: Mode,
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Vertical velocity set by a flap (negative = up)
    pub flap_impulse: f32,
    /// Obstacle scroll speed at score 0 (px per tick)
    pub base_scroll_speed: f32,
    /// Gap size range at score 0
    pub gap_min: f32,
    pub gap_max: f32,
    /// Time between obstacle spawns
    pub spawn_every_ms: f32,
    /// Sinusoidal vertical wind; 0 disables it
    pub wind_strength: f32,
    /// Display multiplier; the integer score itself is never scaled
    pub score_factor: f32,
}

impl ModeProfile {
    pub const ARCADE: ModeProfile = ModeProfile {
        mode: Mode::Arcade,
        gravity: 0.36,
        flap_impulse: -7.4,
        base_scroll_speed: 2.5,
        gap_min: 175.0,
        gap_max: 200.0,
        spawn_every_ms: 1600.0,
        wind_strength: 0.0,
        score_factor: 1.0,
    };

    pub const PRO: ModeProfile = ModeProfile {
        mode: Mode::Pro,
        gravity: 0.41,
        flap_impulse: -7.8,
        base_scroll_speed: 3.1,
        gap_min: 155.0,
        gap_max: 180.0,
        spawn_every_ms: 1600.0,
        wind_strength: 0.0,
        score_factor: 1.4,
    };
}
