//! Star Drift - A top-down asteroid-dodging arcade game
//!
//! Core modules:
//! - `sim`: Simulation (physics, spawning, timers, collisions, game state)
//! - `platform`: Host clock and keyboard edge detection
//! - `tuning`: Data-driven game balance
//! - `ui`: HUD read-out for text overlays

pub mod platform;
pub mod sim;
pub mod tuning;
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use sim::{GameEvent, GameState, Simulation, TickInput, TickResult};
pub use tuning::{Tuning, TuningError};
pub use ui::HudStatus;

use rand::Rng;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Nominal frame length the per-tick velocities were balanced for (60 Hz)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Arena dimensions (the largest canvas the game was laid out for)
    pub const ARENA_WIDTH: f32 = 1200.0;
    pub const ARENA_HEIGHT: f32 = 800.0;

    /// Craft defaults (velocities are px per tick)
    pub const CRAFT_SIZE: f32 = 30.0;
    pub const CRAFT_ACCELERATION: f32 = 0.15;
    pub const CRAFT_FRICTION: f32 = 0.98;
    pub const CRAFT_MAX_SPEED: f32 = 5.0;
    /// Distance from the bottom edge the craft starts at
    pub const CRAFT_START_OFFSET: f32 = 80.0;
    pub const INVINCIBILITY_MS: f32 = 1500.0;
    pub const STARTING_LIVES: u8 = 3;

    /// Weapon
    pub const PROJECTILE_SPEED: f32 = 7.0;
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 15.0;
    pub const LASER_COOLDOWN_MS: f32 = 200.0;

    /// Obstacles
    pub const INITIAL_OBSTACLES: usize = 5;
    pub const OBSTACLE_BASE_SPEED: f32 = 0.5;
    pub const OBSTACLE_MAX_INIT_SIZE: f32 = 60.0;
    pub const OBSTACLE_MIN_INIT_SIZE: f32 = 30.0;
    /// Extra clearance kept around the craft when placing the opening field
    pub const INITIAL_CLEARANCE: f32 = 50.0;
    pub const OBSTACLE_SPAWN_INTERVAL_MS: f32 = 1500.0;
    pub const OBSTACLE_MIN_SPAWN_INTERVAL_MS: f32 = 300.0;
    pub const FRAGMENT_COUNT: usize = 3;
    pub const FRAGMENT_SIZE_DIVISOR: f32 = 2.5;

    /// Hyperspace
    pub const HYPERSPACE_CHARGES: u8 = 3;
    pub const HYPERSPACE_COOLDOWN_MS: f32 = 5000.0;
    pub const HYPERSPACE_MALFUNCTION_CHANCE: f64 = 0.15;
    pub const HYPERSPACE_MALFUNCTION_MARGIN: f32 = 10.0;

    /// Shield pickups
    pub const SHIELD_DURATION_MS: f32 = 8000.0;
    pub const SHIELD_PICKUP_SPEED: f32 = 1.5;
    pub const SHIELD_PICKUP_RADIUS: f32 = 14.0;
    pub const SHIELD_SPAWN_MIN_MS: f32 = 10_000.0;
    pub const SHIELD_SPAWN_MAX_MS: f32 = 20_000.0;
}

/// Uniform sample from `[min, max)`, collapsing to `min` for an empty range
#[inline]
pub fn random_between(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}
