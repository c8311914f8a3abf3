//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform code:
//! - Time only arrives as `dt` in milliseconds
//! - Seeded RNG only
//! - Stable iteration order (insertion / entity ID)

pub mod collision;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::{circles_overlap, destroy_fragment, destroy_obstacle, resolve_collisions};
pub use session::Simulation;
pub use state::{
    Craft, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Projectile, ShieldPickup,
};
pub use tick::{TickInput, TickResult, fire, hyperspace_jump, tick};
pub use timers::{Cooldown, Countdown, HyperspaceDrive, TeleportStatus};
