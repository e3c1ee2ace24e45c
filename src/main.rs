//! Floppy Plane entry point
//!
//! The browser build starts from `platform::web`. Natively this runs a
//! headless autopilot session against a JSON best-score file, which is handy
//! for checking determinism and tuning.
//!
//! Usage: `floppy-plane [runs] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use floppy_plane::consts::SIM_STEP_MS;
    use floppy_plane::persistence::JsonFileStore;
    use floppy_plane::sim::autopilot;
    use floppy_plane::{GameEvent, Mode, RunController, RunState};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Floppy Plane (native) starting...");

    let mut args = std::env::args().skip(1);
    let runs: u32 = args.next().and_then(|a| a.parse().ok()).unwrap_or(3);
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(12345);

    let path = std::env::temp_dir().join("floppy_best.json");
    let store = JsonFileStore::open(&path);
    log::info!("Best scores at {}", path.display());

    let mut run = RunController::with_seed(Mode::Pro, seed, Box::new(store));
    // Hard cap so a perfect autopilot cannot spin forever
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    let mut timestamp = 0.0;
    let mut finished = 0;
    let mut frames = 0u64;

    run.frame(timestamp);
    run.start();

    while finished < runs && frames < MAX_FRAMES {
        frames += 1;
        timestamp += SIM_STEP_MS;
        run.frame(timestamp);

        for event in run.drain_events() {
            match event {
                GameEvent::Crashed { cause, score } => {
                    log::info!("Run {} crashed ({}) with score {}", finished + 1, cause.as_str(), score);
                }
                GameEvent::NewBest { mode, score } => {
                    log::info!("New {} best: {}", mode.as_str(), score);
                }
                GameEvent::ResultRevealed => finished += 1,
                _ => {}
            }
        }

        match run.state() {
            RunState::Playing => {
                if autopilot::should_flap(run.body(), run.obstacles().obstacles()) {
                    run.flap_or_advance();
                }
            }
            RunState::Crashed if finished < runs && run.is_result_visible() => {
                run.flap_or_advance();
            }
            RunState::Menu => {
                run.start();
            }
            _ => {}
        }
    }

    let best = run.scores().best();
    log::info!(
        "Done after {} ticks. Best ARCADE {} / PRO {}",
        run.ticks(),
        best.arcade,
        best.pro
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
