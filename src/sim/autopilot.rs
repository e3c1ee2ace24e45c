//! Demo autopilot
//!
//! A simple pilot for attract/headless runs: aim slightly below the centre of
//! the next gap and flap whenever the body sinks past that line.

use super::body::Body;
use super::obstacles::Obstacle;
use crate::consts::WORLD_HEIGHT;

/// How far below the gap centre the pilot lets the body sink
const AIM_BELOW_CENTER: f32 = 22.0;

/// Should the pilot flap this tick?
pub fn should_flap(body: &Body, obstacles: &[Obstacle]) -> bool {
    let target = obstacles
        .iter()
        .find(|o| !o.scored && o.back() >= body.pos.x)
        .map(|o| o.gap_center())
        .unwrap_or(WORLD_HEIGHT * 0.5);

    body.vy >= 0.0 && body.center().y > target + AIM_BELOW_CENTER
}
