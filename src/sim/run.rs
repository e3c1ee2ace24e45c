//! Run controller
//!
//! Owns every piece of mutable game state and advances it one fixed tick at a
//! time. Host commands (flap, toggle, pointer) are applied between ticks and
//! silently ignored when the current state does not allow them.

use glam::Vec2;

use super::body::{Body, TrailEmitter};
use super::clock::SimClock;
use super::crash::{CrashSequence, DeathCause};
use super::obstacles::{ObstaclePool, scroll_speed};
use super::rng::{PcgSource, RandomSource};
use super::state::{CrashView, GameEvent, RunState, Snapshot};
use crate::consts::*;
use crate::mode::{Mode, ModeProfile};
use crate::persistence::BestScoreStore;
use crate::scores::ScoreTracker;
use crate::ui::CrashPanelLayout;

pub struct RunController {
    state: RunState,
    mode: Mode,
    body: Body,
    obstacles: ObstaclePool,
    scores: ScoreTracker,
    crash: Option<CrashSequence>,
    trail: TrailEmitter,
    clock: SimClock,
    rng: Box<dyn RandomSource>,
    /// Background scroll offset (cosmetic)
    parallax: f32,
    /// Fixed ticks since construction
    ticks: u64,
    layout: CrashPanelLayout,
    events: Vec<GameEvent>,
}

impl RunController {
    pub fn new(mode: Mode, rng: Box<dyn RandomSource>, store: Box<dyn BestScoreStore>) -> Self {
        Self {
            state: RunState::Menu,
            mode,
            body: Body::default(),
            obstacles: ObstaclePool::new(),
            scores: ScoreTracker::load(store),
            crash: None,
            trail: TrailEmitter::default(),
            clock: SimClock::new(),
            rng,
            parallax: 0.0,
            ticks: 0,
            layout: CrashPanelLayout::default(),
            events: Vec::new(),
        }
    }

    /// Controller with the production PCG generator
    pub fn with_seed(mode: Mode, seed: u64, store: Box<dyn BestScoreStore>) -> Self {
        log::info!("Run controller seeded with {}", seed);
        Self::new(mode, Box::new(PcgSource::new(seed)), store)
    }

    // === Accessors ===

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn profile(&self) -> &'static ModeProfile {
        self.mode.profile()
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn obstacles(&self) -> &ObstaclePool {
        &self.obstacles
    }

    pub fn scores(&self) -> &ScoreTracker {
        &self.scores
    }

    pub fn crash(&self) -> Option<&CrashSequence> {
        self.crash.as_ref()
    }

    pub fn parallax(&self) -> f32 {
        self.parallax
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn layout(&self) -> &CrashPanelLayout {
        &self.layout
    }

    /// Current obstacle scroll speed (px per tick)
    pub fn scroll_speed(&self) -> f32 {
        scroll_speed(self.profile(), self.scores.score())
    }

    /// Simulated time since construction
    pub fn time_ms(&self) -> f32 {
        (self.ticks as f64 * SIM_STEP_MS) as f32
    }

    pub fn is_result_visible(&self) -> bool {
        self.crash.as_ref().is_some_and(|c| c.is_result_visible())
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Driving ===

    /// Feed a host frame timestamp and run every fixed tick that is due
    pub fn frame(&mut self, timestamp_ms: f64) -> u32 {
        let ticks = self.clock.advance(timestamp_ms);
        for _ in 0..ticks {
            self.step();
        }
        ticks
    }

    /// Advance exactly one fixed tick
    pub fn step(&mut self) {
        self.ticks += 1;
        let dt = SIM_DT_MS;

        if self.state != RunState::Crashed {
            self.parallax -= self.scroll_speed() * PARALLAX_FACTOR;
        }

        match self.state {
            RunState::Menu => {
                let t = self.time_ms();
                self.body.idle_bob(t);
            }
            RunState::Playing => self.step_playing(dt),
            RunState::Crashed => self.step_crashed(dt),
        }
    }

    fn step_playing(&mut self, dt: f32) {
        let profile = self.mode.profile();

        if self
            .obstacles
            .tick_spawner(profile, self.scores.score(), self.rng.as_mut())
        {
            log::debug!("Obstacle spawned at tick {}", self.ticks);
        }

        let t = self.time_ms();
        self.body.integrate(profile, dt, t);

        let puffs = self.trail.advance(dt, self.body.vy);
        for _ in 0..puffs {
            self.events.push(GameEvent::TrailPuff {
                origin: Vec2::new(self.body.pos.x + 8.0, self.body.pos.y + self.body.size.y * 0.58),
                drift: -self.body.vy * 0.1,
            });
        }

        let speed = self.scroll_speed();
        let report = self.obstacles.advance(speed, &self.body);
        if report.points > 0 {
            self.scores.add(report.points, report.near_misses);
            self.events.push(GameEvent::Scored {
                score: self.scores.score(),
            });
            if report.near_misses > 0 {
                self.events.push(GameEvent::NearMiss {
                    total: self.scores.near_misses(),
                });
            }
        }

        if report.hit.is_some() {
            self.die(DeathCause::Obstacle, None);
        } else if self.body.out_of_bounds() {
            self.die(DeathCause::Boundary, None);
        }
    }

    fn step_crashed(&mut self, dt: f32) {
        let Some(crash) = self.crash.as_mut() else {
            return;
        };
        let progress = crash.advance(dt);
        if progress.explosion_started {
            self.events.push(GameEvent::ExplosionStarted { at: crash.anchor });
        }
        if progress.result_revealed {
            self.events.push(GameEvent::ResultRevealed);
        }
    }

    // === Commands ===

    /// Space / tap: launches from the menu, flaps in flight, and returns to
    /// the menu once the crash result is showing.
    pub fn flap_or_advance(&mut self) -> bool {
        match self.state {
            RunState::Menu => self.start(),
            RunState::Playing => {
                self.body.flap(self.mode.profile());
                true
            }
            RunState::Crashed => self.retry(),
        }
    }

    /// Launch a run from the menu; the launch also performs the first jump
    pub fn start(&mut self) -> bool {
        if self.state != RunState::Menu {
            return false;
        }
        self.begin_run();
        self.body.vy = self.mode.profile().flap_impulse;
        true
    }

    /// Back to the menu, accepted only once the result panel is visible
    pub fn retry(&mut self) -> bool {
        if self.state != RunState::Crashed || !self.is_result_visible() {
            return false;
        }
        self.reset();
        self.state = RunState::Menu;
        self.events.push(GameEvent::ReturnedToMenu);
        true
    }

    /// Switch Arcade/Pro; rejected mid-flight
    pub fn toggle_mode(&mut self) -> bool {
        if self.state == RunState::Playing {
            return false;
        }
        self.mode = self.mode.toggled();
        log::debug!("Mode switched to {}", self.mode.as_str());
        self.events.push(GameEvent::ModeChanged { mode: self.mode });
        true
    }

    /// Pointer press in world coordinates. The retry button restarts
    /// straight into a new run; anywhere else acts like a flap.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        if self.state == RunState::Crashed
            && self.is_result_visible()
            && self.layout.hits_retry(x, y)
        {
            self.begin_run();
            return true;
        }
        self.flap_or_advance()
    }

    /// End the run. No-op unless a live body is in flight, so repeated calls
    /// within a tick are harmless. `frozen_y` pins the body at the impact
    /// point when the caller has a more exact one.
    pub fn die(&mut self, cause: DeathCause, frozen_y: Option<f32>) -> bool {
        if self.state != RunState::Playing || !self.body.alive {
            return false;
        }

        self.body.alive = false;
        if let Some(y) = frozen_y {
            self.body.pos.y = y;
        }
        self.body.vy = 0.0;
        self.crash = Some(CrashSequence::start(cause, self.body.center()));
        self.state = RunState::Crashed;

        let score = self.scores.score();
        log::info!(
            "Crashed ({}) with score {} and {} near misses",
            cause.as_str(),
            score,
            self.scores.near_misses()
        );
        self.events.push(GameEvent::Crashed { cause, score });
        if let Some(best) = self.scores.record_death(self.mode, score) {
            self.events.push(GameEvent::NewBest {
                mode: self.mode,
                score: best,
            });
        }
        true
    }

    /// Clear all per-run state
    pub fn reset(&mut self) {
        self.scores.reset_run();
        self.obstacles.clear();
        self.body = Body::default();
        self.crash = None;
        self.trail.reset();
        self.parallax = 0.0;
    }

    fn begin_run(&mut self) {
        self.reset();
        self.state = RunState::Playing;
        log::info!("Run started in {} mode", self.mode.as_str());
        self.events.push(GameEvent::RunStarted { mode: self.mode });
    }

    // === Snapshots ===

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            mode: self.mode,
            body: self.body.clone(),
            obstacles: self.obstacles.obstacles().to_vec(),
            score: self.scores.score(),
            near_misses: self.scores.near_misses(),
            best: self.scores.best_for(self.mode),
            scroll_speed: self.scroll_speed(),
            parallax: self.parallax,
            crash: self.crash.as_ref().map(|c| CrashView {
                cause: c.cause,
                phase: c.phase(),
                elapsed_ms: c.elapsed_ms,
                holding: c.is_holding(),
                explosion_frame: c.explosion_frame(),
                explosion_anchor: c.anchor,
                explosion_size: EXPLOSION_SIZE,
                shake: c.shake_active(),
                flash_alpha: c.flash_alpha(),
                result_visible: c.is_result_visible(),
                retry: c.is_result_visible().then_some(self.layout.retry),
            }),
        }
    }

    #[cfg(test)]
    pub(crate) fn scores_mut(&mut self) -> &mut ScoreTracker {
        &mut self.scores
    }

    #[cfg(test)]
    pub(crate) fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    #[cfg(test)]
    pub(crate) fn obstacles_mut(&mut self) -> &mut ObstaclePool {
        &mut self.obstacles
    }
}
