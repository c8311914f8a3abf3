//! Frame-stepped simulation tick
//!
//! Core game loop. Order within a tick is fixed: clock, player actions,
//! movement and culling, spawning, craft clamp, collisions.

use glam::Vec2;

use super::collision::{circles_overlap, resolve_collisions};
use super::spawn::{maybe_spawn_obstacle, maybe_spawn_pickup};
use super::state::{GameEvent, GameState};
use crate::random_between;
use crate::tuning::Tuning;

/// Input commands for a single tick
///
/// Directional controls are held state sampled this tick. `fire` and
/// `teleport` are press edges and must be true for one tick per key press
/// (see [`crate::platform::input::InputLatch`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub thrust_forward: bool,
    pub thrust_back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub fire: bool,
    pub teleport: bool,
}

/// Result of a tick
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick, in the order they happened
    pub events: Vec<GameEvent>,
    /// Whether the session is over after this tick
    pub game_over: bool,
}

/// Advance the game state by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32, tuning: &Tuning) -> TickResult {
    if state.is_over() {
        return TickResult {
            events: state.take_events(),
            game_over: true,
        };
    }

    // Negative or NaN frame times freeze the clock instead of rewinding it
    let dt_ms = dt_ms.max(0.0);
    state.time_ticks += 1;
    state.session_ms += dt_ms;

    if input.fire {
        fire(state, tuning);
    }
    if input.teleport {
        hyperspace_jump(state, tuning);
    }

    if !state.is_over() {
        update_craft(state, input, dt_ms, tuning);
        update_entities(state, tuning);

        maybe_spawn_obstacle(state, tuning);
        maybe_spawn_pickup(state, tuning);

        state
            .craft
            .clamp_to_arena(tuning.arena_width, tuning.arena_height);

        resolve_collisions(state, tuning);
    }

    TickResult {
        events: state.take_events(),
        game_over: state.is_over(),
    }
}

/// Fire the twin lasers if the weapon has cooled down
///
/// Returns true if a projectile pair was emitted.
pub fn fire(state: &mut GameState, tuning: &Tuning) -> bool {
    if !state.weapon.try_trigger(state.session_ms) {
        return false;
    }
    for muzzle in state.craft.muzzles() {
        state.add_projectile(muzzle, tuning);
    }
    state.push_event(GameEvent::Fired);
    true
}

/// Jump to a random point in the arena
///
/// Silently does nothing without a charge or while the drive cools down. A
/// malfunction roll is made on every jump; it only bites if an obstacle sits
/// near the destination.
pub fn hyperspace_jump(state: &mut GameState, tuning: &Tuning) -> bool {
    if !state.hyperspace.try_consume(state.session_ms) {
        return false;
    }

    let half = state.craft.half_size();
    let to = Vec2::new(
        random_between(&mut state.rng, half.x, tuning.arena_width - half.x),
        random_between(&mut state.rng, half.y, tuning.arena_height - half.y),
    );

    let malfunction_roll = state.roll(tuning.hyperspace_malfunction_chance);
    let craft_radius = state.craft.radius;
    let margin = tuning.hyperspace_malfunction_margin;
    let malfunction = malfunction_roll
        && state
            .obstacles
            .iter()
            .chain(state.fragments.iter())
            .any(|o| circles_overlap(to, craft_radius + margin, o.pos, o.radius()));

    state.craft.pos = to;
    state.craft.vel = Vec2::ZERO;
    state.push_event(GameEvent::Teleported { to, malfunction });
    log::debug!(
        "Hyperspace to ({:.0}, {:.0}), {} charges left",
        to.x,
        to.y,
        state.hyperspace.charges
    );

    if malfunction {
        log::warn!("Hyperspace malfunction!");
        state.damage_craft(tuning);
    }
    true
}

/// Thrust, friction, speed cap, integration and the craft's timers
fn update_craft(state: &mut GameState, input: &TickInput, dt_ms: f32, tuning: &Tuning) {
    let craft = &mut state.craft;

    craft.vel += thrust_direction(input) * tuning.craft_acceleration;
    craft.vel *= tuning.craft_friction;
    craft.vel = craft.vel.clamp_length_max(tuning.craft_max_speed);
    craft.pos += craft.vel;

    // Flame grows with thrust and fades when the forward engine is idle
    if input.thrust_forward {
        craft.propulsion = (craft.propulsion + 0.1).min(1.0);
    }
    if input.thrust_back {
        craft.propulsion = (craft.propulsion + 0.05).min(1.0);
    }
    if !input.thrust_forward {
        craft.propulsion = (craft.propulsion - 0.05).max(0.0);
    }

    craft.invincibility.advance(dt_ms);
    if craft.shield.advance(dt_ms) {
        state.push_event(GameEvent::ShieldExpired);
    }
}

/// Per-axis impulse direction from held controls; opposites cancel
fn thrust_direction(input: &TickInput) -> Vec2 {
    let axis = |neg: bool, pos: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
    Vec2::new(
        axis(input.strafe_left, input.strafe_right),
        axis(input.thrust_forward, input.thrust_back),
    )
}

/// Move projectiles, obstacles and pickups and drop whatever left the arena
fn update_entities(state: &mut GameState, tuning: &Tuning) {
    let (width, height) = (tuning.arena_width, tuning.arena_height);

    for projectile in &mut state.projectiles {
        projectile.pos += projectile.vel;
    }
    state.projectiles.retain(|p| !p.is_off_screen());

    for obstacle in state.obstacles.iter_mut().chain(state.fragments.iter_mut()) {
        obstacle.advance();
    }
    state.obstacles.retain(|o| !o.is_out_of_bounds(width, height));
    state.fragments.retain(|o| !o.is_out_of_bounds(width, height));

    for pickup in &mut state.pickups {
        pickup.advance();
    }
    state.pickups.retain(|p| !p.is_off_screen(height));
}
