//! Collision detection between the body and obstacles
//!
//! Pure functions only. The hitboxes are padded asymmetrically to match the
//! transparent margins of the sprites: the body grows horizontally, obstacle
//! columns shrink, and nothing is padded vertically.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::obstacles::Obstacle;
use crate::consts::{BODY_PAD_X, OBSTACLE_PAD_X};

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Inclusive point test
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Effective body hitbox
pub fn body_hitbox(body: &Body) -> Rect {
    Rect::new(
        body.pos.x - BODY_PAD_X,
        body.pos.y,
        body.size.x + BODY_PAD_X * 2.0,
        body.size.y,
    )
}

/// Does the body touch either column of the obstacle?
pub fn body_hits_obstacle(body: &Body, obstacle: &Obstacle) -> bool {
    let hitbox = body_hitbox(body);
    let column_left = obstacle.x + OBSTACLE_PAD_X;
    let column_right = obstacle.x + obstacle.width - OBSTACLE_PAD_X;

    let overlaps_x = hitbox.right() > column_left && hitbox.x < column_right;
    if !overlaps_x {
        return false;
    }

    hitbox.y < obstacle.gap_top() || hitbox.bottom() > obstacle.gap_bottom()
}
