//! Star Drift entry point
//!
//! Native builds run a headless session with a scripted pilot, which is handy
//! for balance checks and for watching the event stream in the log. The
//! browser build enters through `star_drift::wasm` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use star_drift::consts::FRAME_MS;
    use star_drift::platform::{HeldControls, InputLatch};
    use star_drift::{GameEvent, HudStatus, Simulation};

    const DEFAULT_SEED: u64 = 0x5EED;
    /// Ten minutes at 60 Hz
    const MAX_TICKS: u64 = 60 * 60 * 10;

    /// Weave left and right, tap fire, and jump when something gets close
    fn pilot(sim: &Simulation, tick: u64) -> HeldControls {
        let state = sim.state();
        let craft = &state.craft;
        let danger = state
            .obstacles
            .iter()
            .chain(state.fragments.iter())
            .any(|o| o.pos.distance(craft.pos) < o.radius() + craft.radius + 40.0);

        let sweep_right = (tick / 120) % 2 == 0;
        HeldControls {
            up: false,
            down: false,
            left: !sweep_right,
            right: sweep_right,
            fire: tick % 12 < 6,
            hyperspace: danger,
        }
    }

    pub fn run() {
        let seed = std::env::args()
            .nth(1)
            .and_then(|arg| arg.parse().ok())
            .unwrap_or(DEFAULT_SEED);

        let mut sim = Simulation::start(seed);
        let mut latch = InputLatch::new();

        for tick in 0..MAX_TICKS {
            let input = latch.sample(pilot(&sim, tick));
            let result = sim.tick(FRAME_MS, &input);

            for event in &result.events {
                match event {
                    GameEvent::Hit { lives_left } => {
                        log::info!("Hit at tick {} ({} lives left)", tick, lives_left)
                    }
                    GameEvent::PickedUp { .. } => log::info!("Shield up at tick {}", tick),
                    GameEvent::Teleported { malfunction, .. } => {
                        log::info!("Hyperspace at tick {} (malfunction: {})", tick, malfunction)
                    }
                    other => log::trace!("{:?}", other),
                }
            }

            if result.game_over {
                break;
            }
        }

        let state = sim.state();
        let hud = HudStatus::from_state(state, sim.tuning());
        println!("{}", hud.status_line());
        println!(
            "Survived {:.1}s over {} ticks with {} obstacles and {} fragments in play",
            state.session_ms / 1000.0,
            state.time_ticks,
            state.obstacles.len(),
            state.fragments.len()
        );
        match serde_json::to_string(&hud) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to encode HUD: {}", e),
        }
    }
}
