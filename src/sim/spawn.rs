//! Obstacle and pickup spawning
//!
//! Difficulty is a function of session time only: the spawn interval shrinks
//! linearly to a floor while obstacle size and speed ceilings grow to a cap.

use glam::Vec2;

use super::state::{GameState, Obstacle};
use crate::random_between;
use crate::tuning::Tuning;

/// Interval shrinks by 1 ms every 100 ms of play
const SPAWN_INTERVAL_DECAY: f32 = 100.0;
/// Time to reach each cap (ms) and the cap itself
const SIZE_GROWTH_MS: f32 = 60_000.0;
const SIZE_GROWTH_CAP: f32 = 1.5;
const SPEED_GROWTH_MS: f32 = 40_000.0;
const SPEED_GROWTH_CAP: f32 = 2.0;
/// Opening field occupies the top 60% of the arena
const INITIAL_FIELD_FRACTION: f32 = 0.6;
/// Bail out of placement re-rolls for absurd tunings
const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

/// Current obstacle spawn interval (ms)
pub fn obstacle_spawn_interval(tuning: &Tuning, session_ms: f32) -> f32 {
    (tuning.obstacle_spawn_interval_ms - session_ms / SPAWN_INTERVAL_DECAY)
        .max(tuning.obstacle_min_spawn_interval_ms)
}

/// Multiplier on the upper bound of spawned obstacle size
pub fn size_multiplier(session_ms: f32) -> f32 {
    1.0 + (session_ms / SIZE_GROWTH_MS).min(SIZE_GROWTH_CAP)
}

/// Multiplier on spawned obstacle speed
pub fn speed_multiplier(session_ms: f32) -> f32 {
    1.0 + (session_ms / SPEED_GROWTH_MS).min(SPEED_GROWTH_CAP)
}

/// Place the opening obstacles, never on top of the craft
pub fn populate_initial_field(state: &mut GameState, tuning: &Tuning) {
    let clearance = tuning.obstacle_max_init_size + state.craft.radius + tuning.initial_clearance;
    let field_height = tuning.arena_height * INITIAL_FIELD_FRACTION;

    for _ in 0..tuning.initial_obstacles {
        let mut placed = None;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let candidate = Vec2::new(
                random_between(&mut state.rng, 0.0, tuning.arena_width),
                random_between(&mut state.rng, 0.0, field_height),
            );
            if candidate.distance(state.craft.pos) >= clearance {
                placed = Some(candidate);
                break;
            }
        }

        let Some(pos) = placed else {
            log::warn!("No room for an opening obstacle clear of the craft");
            break;
        };

        let size = random_between(
            &mut state.rng,
            tuning.obstacle_min_init_size,
            tuning.obstacle_max_init_size,
        );
        let id = state.next_entity_id();
        let obstacle = Obstacle::spawn(id, pos, size, 1.0, 0.0, tuning, &mut state.rng);
        state.obstacles.push(obstacle);
    }
}

/// Maybe release a new obstacle from above the arena
pub fn maybe_spawn_obstacle(state: &mut GameState, tuning: &Tuning) {
    let now = state.session_ms;
    if now - state.spawn.last_obstacle_ms <= obstacle_spawn_interval(tuning, now) {
        return;
    }
    state.spawn.last_obstacle_ms = now;

    let size = random_between(
        &mut state.rng,
        tuning.obstacle_min_init_size * 0.8,
        tuning.obstacle_max_init_size * size_multiplier(now),
    );
    let pos = Vec2::new(
        random_between(&mut state.rng, 0.0, tuning.arena_width),
        -tuning.obstacle_max_init_size,
    );
    let id = state.next_entity_id();
    let obstacle = Obstacle::spawn(
        id,
        pos,
        size,
        speed_multiplier(now),
        now,
        tuning,
        &mut state.rng,
    );
    log::debug!(
        "Spawned obstacle {} (size {:.1}) at {:.0}ms",
        id,
        size,
        now
    );
    state.obstacles.push(obstacle);
}

/// Maybe drop a shield pickup.
///
/// The wait is re-rolled after every due interval. An interval that comes due
/// while the shield is up is forfeited rather than carried over.
pub fn maybe_spawn_pickup(state: &mut GameState, tuning: &Tuning) {
    let now = state.session_ms;
    if now - state.spawn.last_pickup_ms < state.spawn.pickup_interval_ms {
        return;
    }
    state.spawn.last_pickup_ms = now;
    state.spawn.pickup_interval_ms = random_between(
        &mut state.rng,
        tuning.shield_spawn_min_ms,
        tuning.shield_spawn_max_ms,
    );

    if state.craft.shield_active() {
        log::debug!("Shield pickup suppressed (shield already up)");
        return;
    }

    let radius = tuning.shield_pickup_radius;
    let pos = Vec2::new(
        random_between(&mut state.rng, radius, tuning.arena_width - radius),
        -radius,
    );
    let id = state.add_pickup(pos, tuning);
    log::debug!("Spawned shield pickup {} at {:.0}ms", id, now);
}
