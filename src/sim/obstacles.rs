//! Procedural gap obstacles
//!
//! Obstacles spawn off the right edge on a timer, scroll left at a speed that
//! ramps with score, award points as the body clears them, and are retired
//! once fully off the left edge.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::body_hits_obstacle;
use super::rng::RandomSource;
use crate::clamp;
use crate::consts::*;
use crate::mode::ModeProfile;

/// A pair of columns with a vertical gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Top of the gap (bottom of the upper column)
    pub top: f32,
    /// Gap height
    pub gap: f32,
    /// Set once the body clears it; never unset
    pub scored: bool,
    /// Near-miss bonus awarded; implies `scored`
    pub near_scored: bool,
}

impl Obstacle {
    pub fn new(x: f32, width: f32, top: f32, gap: f32) -> Self {
        Self {
            id: 0,
            x,
            width,
            top,
            gap,
            scored: false,
            near_scored: false,
        }
    }

    pub fn gap_top(&self) -> f32 {
        self.top
    }

    pub fn gap_bottom(&self) -> f32 {
        self.top + self.gap
    }

    pub fn gap_center(&self) -> f32 {
        self.top + self.gap * 0.5
    }

    /// Trailing (right) edge
    pub fn back(&self) -> f32 {
        self.x + self.width
    }
}

/// What one `advance` call did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvanceReport {
    /// Points earned (clears plus near-miss bonuses)
    pub points: u32,
    /// Near misses this tick
    pub near_misses: u32,
    /// Id of the obstacle the body hit, if any
    pub hit: Option<u32>,
}

/// Current scroll speed: base speed plus up to 1.6 px/tick by score 35
pub fn scroll_speed(profile: &ModeProfile, score: u32) -> f32 {
    let ramp = clamp(score as f32 / SPEED_RAMP_SCORE, 0.0, 1.0) * SPEED_RAMP;
    profile.base_scroll_speed + ramp
}

/// Gap size range for a score; narrows until score 20
pub fn gap_range(profile: &ModeProfile, score: u32) -> (f32, f32) {
    let scale = clamp(score as f32 / GAP_RAMP_SCORE, 0.0, 1.0);
    (
        profile.gap_min - scale * GAP_SHRINK_MIN,
        profile.gap_max - scale * GAP_SHRINK_MAX,
    )
}

/// Fixed ticks until the spawn timer reaches the profile's interval
pub fn spawn_interval_ticks(profile: &ModeProfile) -> u32 {
    let ticks = (profile.spawn_every_ms as f64 * SIM_HZ / 1000.0).ceil();
    (ticks as u32).max(1)
}

/// Ordered obstacles (oldest first) plus the spawn timer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstaclePool {
    obstacles: Vec<Obstacle>,
    /// Fixed ticks since the last spawn
    spawn_timer_ticks: u32,
    next_id: u32,
}

impl ObstaclePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.spawn_timer_ticks = 0;
        self.next_id = 0;
    }

    /// Advance the spawn timer one fixed tick; spawns and returns true once
    /// the interval is reached. The timer restarts from zero rather than
    /// carrying overflow.
    pub fn tick_spawner(
        &mut self,
        profile: &ModeProfile,
        score: u32,
        rng: &mut dyn RandomSource,
    ) -> bool {
        self.spawn_timer_ticks = self.spawn_timer_ticks.saturating_add(1);
        if self.spawn_timer_ticks >= spawn_interval_ticks(profile) {
            self.spawn_timer_ticks = 0;
            self.spawn(profile, score, rng);
            return true;
        }
        false
    }

    /// Spawn one obstacle just past the right edge
    pub fn spawn(&mut self, profile: &ModeProfile, score: u32, rng: &mut dyn RandomSource) {
        let (gap_lo, gap_hi) = gap_range(profile, score);
        let gap = rng.next(gap_lo, gap_hi);
        let top = rng.next(0.0, WORLD_HEIGHT - gap);

        let mut obstacle = Obstacle::new(
            WORLD_WIDTH + OBSTACLE_SPAWN_OFFSET,
            OBSTACLE_WIDTH,
            top,
            gap,
        );
        obstacle.id = self.next_id;
        self.next_id += 1;
        log::debug!("Spawned obstacle {} gap={:.1} top={:.1}", obstacle.id, gap, top);
        self.obstacles.push(obstacle);
    }

    /// Scroll every obstacle by `speed`, then score, near-miss check and
    /// collision check each in turn. Stops at the first hit.
    pub fn advance(&mut self, speed: f32, body: &Body) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        let body_center = body.center();

        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;

            if !obstacle.scored && obstacle.back() < body.pos.x {
                obstacle.scored = true;
                report.points += 1;

                // Near misses are judged only at the moment of scoring
                let distance = (body_center.y - obstacle.gap_center()).abs();
                if !obstacle.near_scored && distance <= NEAR_MISS_THRESHOLD {
                    obstacle.near_scored = true;
                    report.points += 1;
                    report.near_misses += 1;
                }
            }

            if body_hits_obstacle(body, obstacle) {
                report.hit = Some(obstacle.id);
                break;
            }
        }

        self.obstacles.retain(|o| o.back() >= -OBSTACLE_RETIRE_MARGIN);
        report
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{PcgSource, ScriptedSource};
    use glam::Vec2;
    use proptest::prelude::*;

    #[test]
    fn test_gap_range_narrows_with_score() {
        let p = &ModeProfile::PRO;
        assert_eq!(gap_range(p, 0), (155.0, 180.0));
        assert_eq!(gap_range(p, 10), (149.0, 176.0));
        assert_eq!(gap_range(p, 40), (143.0, 172.0));
    }

    #[test]
    fn test_spawn_draws_from_narrowed_range() {
        let p = &ModeProfile::ARCADE;
        let mut pool = ObstaclePool::new();
        let mut rng = ScriptedSource::new(vec![0.5, 0.0]);

        pool.spawn(p, 0, &mut rng);
        pool.spawn(p, 40, &mut rng);

        assert_eq!(rng.requests[0], (175.0, 200.0));
        assert_eq!(rng.requests[2], (163.0, 192.0));
        // Placement range is the world height minus the chosen gap
        let first = &pool.obstacles()[0];
        assert_eq!(rng.requests[1], (0.0, WORLD_HEIGHT - first.gap));
        assert_eq!(first.x, WORLD_WIDTH + OBSTACLE_SPAWN_OFFSET);
        assert_eq!(pool.obstacles()[1].id, 1);
    }

    #[test]
    fn test_spawn_timer_resets_to_zero() {
        let p = &ModeProfile::PRO;
        let mut pool = ObstaclePool::new();
        let mut rng = PcgSource::new(1);
        let mut spawned_at = Vec::new();
        for tick in 1..=200 {
            if pool.tick_spawner(p, 0, &mut rng) {
                spawned_at.push(tick);
            }
        }
        // 1600 ms at 60 Hz is 96 ticks; no overflow carries over
        assert_eq!(spawned_at, vec![96, 192]);
    }

    #[test]
    fn test_spawn_interval_in_ticks_is_exact() {
        assert_eq!(spawn_interval_ticks(&ModeProfile::ARCADE), 96);
        assert_eq!(spawn_interval_ticks(&ModeProfile::PRO), 96);
        // An interval that is not a whole number of ticks rounds up
        let odd = ModeProfile {
            spawn_every_ms: 1601.0,
            ..ModeProfile::PRO
        };
        assert_eq!(spawn_interval_ticks(&odd), 97);
    }

    #[test]
    fn test_scroll_speed_ramp() {
        let p = &ModeProfile::ARCADE;
        assert_eq!(scroll_speed(p, 0), 2.5);
        assert!((scroll_speed(p, 35) - 4.1).abs() < 1e-6);
        assert!((scroll_speed(p, 1000) - 4.1).abs() < 1e-6);
    }

    #[test]
    fn test_scores_once_when_cleared() {
        let mut pool = ObstaclePool::new();
        let body = Body::default();
        // Gap centred 50 px away from the body centre: no near miss
        pool.push(Obstacle::new(-33.0, OBSTACLE_WIDTH, 210.0, 180.0));

        let report = pool.advance(2.0, &body);
        assert_eq!(report.points, 1);
        assert_eq!(report.near_misses, 0);
        assert!(pool.obstacles()[0].scored);

        let report = pool.advance(2.0, &body);
        assert_eq!(report.points, 0);
        assert!(pool.obstacles()[0].scored);
    }

    #[test]
    fn test_scores_when_back_passes_body_left_edge() {
        let mut pool = ObstaclePool::new();
        let body = Body::default();
        pool.push(Obstacle::new(-33.0, OBSTACLE_WIDTH, 210.0, 180.0));

        // Trailing edge at 66.5, still level with the body's left edge
        assert_eq!(pool.advance(0.5, &body).points, 0);
        // 65.5: cleared
        assert_eq!(pool.advance(1.0, &body).points, 1);
    }

    #[test]
    fn test_near_miss_awarded_at_scoring_only() {
        let mut pool = ObstaclePool::new();
        let mut body = Body::default();
        // Body centre y = 260; gap centre = 170 + 90 = 260
        pool.push(Obstacle::new(-33.0, OBSTACLE_WIDTH, 170.0, 180.0));
        let report = pool.advance(2.0, &body);
        assert_eq!(report.points, 2);
        assert_eq!(report.near_misses, 1);
        assert!(pool.obstacles()[0].near_scored);

        // Already scored obstacle: lining up later gives nothing
        let mut pool = ObstaclePool::new();
        pool.push(Obstacle::new(-33.0, OBSTACLE_WIDTH, 100.0, 180.0));
        body.pos.y = 100.0;
        assert_eq!(pool.advance(2.0, &body).near_misses, 0);
        body.pos.y = 170.0;
        let report = pool.advance(2.0, &body);
        assert_eq!(report.near_misses, 0);
        assert!(!pool.obstacles()[0].near_scored);
    }

    #[test]
    fn test_hit_reports_obstacle() {
        let mut pool = ObstaclePool::new();
        let body = Body {
            pos: Vec2::new(BODY_X, 20.0),
            ..Body::default()
        };
        pool.push(Obstacle::new(62.0, OBSTACLE_WIDTH, 100.0, 180.0));
        assert_eq!(pool.advance(2.0, &body).hit, Some(0));
    }

    #[test]
    fn test_retires_off_screen() {
        let mut pool = ObstaclePool::new();
        let body = Body::default();
        pool.push(Obstacle::new(-119.0, OBSTACLE_WIDTH, 210.0, 180.0));
        pool.advance(0.5, &body);
        assert_eq!(pool.len(), 1);
        pool.advance(1.0, &body);
        assert!(pool.is_empty());
    }

    proptest! {
        #[test]
        fn prop_scored_is_monotonic(seed in any::<u64>(), body_y in 60.0f32..500.0) {
            let p = &ModeProfile::PRO;
            let mut pool = ObstaclePool::new();
            let mut rng = PcgSource::new(seed);
            // Frozen body so obstacles stream past it
            let body = Body { pos: Vec2::new(BODY_X, body_y), ..Body::default() };
            let mut seen_scored = std::collections::HashSet::new();
            for _ in 0..600 {
                pool.tick_spawner(p, 0, &mut rng);
                let _ = pool.advance(scroll_speed(p, 0), &body);
                for o in pool.obstacles() {
                    if seen_scored.contains(&o.id) {
                        prop_assert!(o.scored);
                    }
                    if o.scored {
                        seen_scored.insert(o.id);
                    }
                    prop_assert!(!o.near_scored || o.scored);
                }
            }
        }
    }
}
