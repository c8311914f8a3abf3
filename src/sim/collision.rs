//! Collision detection and resolution
//!
//! Everything is a circle: obstacles render with ragged outlines but collide
//! on their radius. Checks run in a fixed order each tick and later checks are
//! skipped once the session ends.

use glam::Vec2;

use super::state::{GameEvent, GameState, Obstacle};
use crate::tuning::Tuning;

/// Check if two circles overlap (strictly)
#[inline]
pub fn circles_overlap(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    pos_a.distance(pos_b) < radius_a + radius_b
}

/// Credit a removed obstacle and break it up if it is big enough.
///
/// The size threshold is the only recursion guard: a fragment larger than the
/// threshold splits again.
pub fn destroy_obstacle(state: &mut GameState, obstacle: Obstacle, tuning: &Tuning) {
    state.score += u64::from(obstacle.points_value);

    let mut spawned = 0;
    if obstacle.size > tuning.fragment_threshold() {
        for _ in 0..tuning.fragment_count {
            let id = state.next_entity_id();
            let fragment = Obstacle::fragment_of(id, &obstacle, tuning, &mut state.rng);
            state.fragments.push(fragment);
            spawned += 1;
        }
    }

    state.push_event(GameEvent::Destroyed {
        id: obstacle.id,
        kind: obstacle.kind,
        points: obstacle.points_value,
        fragments: spawned,
    });
}

/// Credit a fragment hit by a projectile or the craft. Fragments never split
/// on contact.
pub fn destroy_fragment(state: &mut GameState, fragment: Obstacle) {
    state.score += u64::from(fragment.points_value);
    state.push_event(GameEvent::Destroyed {
        id: fragment.id,
        kind: fragment.kind,
        points: fragment.points_value,
        fragments: 0,
    });
}

/// Which registry a hit landed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Obstacles,
    Fragments,
}

impl Family {
    fn registry(self, state: &GameState) -> &[Obstacle] {
        match self {
            Family::Obstacles => &state.obstacles,
            Family::Fragments => &state.fragments,
        }
    }

    /// Take the entity at `index` out of its registry and credit it
    fn destroy(self, state: &mut GameState, index: usize, tuning: &Tuning) {
        match self {
            Family::Obstacles => {
                let target = state.obstacles.remove(index);
                destroy_obstacle(state, target, tuning);
            }
            Family::Fragments => {
                let target = state.fragments.remove(index);
                destroy_fragment(state, target);
            }
        }
    }
}

/// Run every collision check for this tick, in priority order
pub fn resolve_collisions(state: &mut GameState, tuning: &Tuning) {
    resolve_projectile_hits(state, tuning);

    for family in [Family::Obstacles, Family::Fragments] {
        if resolve_craft_contact(state, tuning, family) {
            return;
        }
    }

    resolve_pickups(state, tuning);
}

/// Each projectile destroys at most one target; obstacles are checked before
/// fragments
fn resolve_projectile_hits(state: &mut GameState, tuning: &Tuning) {
    let mut i = 0;
    while i < state.projectiles.len() {
        let (pos, reach) = {
            let p = &state.projectiles[i];
            (p.pos, p.width)
        };

        let hit = [Family::Obstacles, Family::Fragments]
            .into_iter()
            .find_map(|family| {
                family
                    .registry(state)
                    .iter()
                    .position(|o| circles_overlap(pos, reach, o.pos, o.radius()))
                    .map(|index| (family, index))
            });

        match hit {
            Some((family, index)) => {
                family.destroy(state, index, tuning);
                state.projectiles.remove(i);
            }
            None => i += 1,
        }
    }
}

/// First overlapping obstacle of `family` meets the craft. Shield absorbs
/// regardless of invincibility; otherwise an invincible craft ignores it.
///
/// Returns true if the contact ended the session.
fn resolve_craft_contact(state: &mut GameState, tuning: &Tuning, family: Family) -> bool {
    let craft_pos = state.craft.pos;
    let craft_radius = state.craft.radius;
    let Some(index) = family
        .registry(state)
        .iter()
        .position(|o| circles_overlap(craft_pos, craft_radius, o.pos, o.radius()))
    else {
        return false;
    };

    if state.craft.shield_active() {
        family.destroy(state, index, tuning);
        return false;
    }

    if state.craft.is_invincible() {
        return false;
    }

    let game_over = state.damage_craft(tuning);
    family.destroy(state, index, tuning);
    game_over
}

/// Collect at most one shield pickup
fn resolve_pickups(state: &mut GameState, tuning: &Tuning) {
    let craft_pos = state.craft.pos;
    let craft_radius = state.craft.radius;
    let Some(index) = state
        .pickups
        .iter()
        .position(|p| circles_overlap(craft_pos, craft_radius, p.pos, p.radius))
    else {
        return;
    };

    let pickup = state.pickups.remove(index);
    state.craft.shield.start(tuning.shield_duration_ms);
    state.push_event(GameEvent::PickedUp { id: pickup.id });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;

    fn empty_state() -> (GameState, Tuning) {
        let tuning = Tuning::default();
        let state = GameState::new(42, &tuning);
        (state, tuning)
    }

    #[test]
    fn test_circles_overlap_is_strict() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
    }

    #[test]
    fn test_fragmentation_law() {
        let (mut state, tuning) = empty_state();
        let id = state.add_obstacle(Vec2::new(300.0, 300.0), Vec2::new(1.0, 1.0), 60.0, &tuning);
        let obstacle = state.obstacles.remove(0);
        assert_eq!(obstacle.id, id);

        destroy_obstacle(&mut state, obstacle, &tuning);
        assert_eq!(state.score, 40);
        assert_eq!(state.fragments.len(), 3);
        for f in &state.fragments {
            assert!((f.size - 24.0).abs() < 1e-4);
            assert!(f.is_fragment());
        }
    }

    #[test]
    fn test_small_obstacle_leaves_no_fragments() {
        let (mut state, tuning) = empty_state();
        // Exactly at the threshold (30 / 1.5 = 20) does not split
        state.add_obstacle(Vec2::new(300.0, 300.0), Vec2::ZERO, 20.0, &tuning);
        let obstacle = state.obstacles.remove(0);
        destroy_obstacle(&mut state, obstacle, &tuning);
        assert!(state.fragments.is_empty());
    }

    #[test]
    fn test_destroy_obstacle_uses_size_threshold_only() {
        let (mut state, tuning) = empty_state();
        state.add_obstacle(Vec2::new(300.0, 300.0), Vec2::ZERO, 200.0, &tuning);
        let obstacle = state.obstacles.remove(0);
        destroy_obstacle(&mut state, obstacle, &tuning);

        // 200 / 2.5 = 80, still above the threshold
        let mut oversized = state.fragments.remove(0);
        assert!(oversized.size > tuning.fragment_threshold());
        oversized.kind = ObstacleKind::Obstacle;
        destroy_obstacle(&mut state, oversized, &tuning);
        assert_eq!(state.fragments.len(), 2 + 3);
    }

    #[test]
    fn test_shot_fragment_does_not_split() {
        let (mut state, tuning) = empty_state();
        let pos = Vec2::new(300.0, 300.0);
        state.add_obstacle(pos, Vec2::ZERO, 60.0, &tuning);
        state.add_projectile(pos, &tuning);
        resolve_collisions(&mut state, &tuning);
        assert_eq!(state.fragments.len(), 3);
        let score = state.score;

        // 24px fragments sit above the 20px threshold
        let target = state.fragments[0].clone();
        assert!(target.size > tuning.fragment_threshold());
        state.add_projectile(target.pos, &tuning);
        state.take_events();
        resolve_collisions(&mut state, &tuning);

        assert_eq!(state.fragments.len(), 2);
        assert!(state.fragments.iter().all(|f| (f.size - 24.0).abs() < 1e-4));
        assert_eq!(state.score, score + u64::from(target.points_value));
        assert!(state.take_events().contains(&GameEvent::Destroyed {
            id: target.id,
            kind: ObstacleKind::Fragment,
            points: target.points_value,
            fragments: 0,
        }));
    }

    #[test]
    fn test_projectile_hits_one_target_obstacles_first() {
        let (mut state, tuning) = empty_state();
        let pos = Vec2::new(200.0, 200.0);
        let obstacle = state.add_obstacle(pos, Vec2::ZERO, 20.0, &tuning);
        let other = state.add_obstacle(pos, Vec2::ZERO, 20.0, &tuning);
        state.fragments.push(Obstacle {
            kind: ObstacleKind::Fragment,
            ..state.obstacles[0].clone()
        });
        state.add_projectile(pos, &tuning);

        resolve_collisions(&mut state, &tuning);

        assert!(state.projectiles.is_empty());
        assert!(state.obstacles.iter().all(|o| o.id != obstacle));
        assert!(state.obstacles.iter().any(|o| o.id == other));
        assert_eq!(state.fragments.len(), 1);
    }

    #[test]
    fn test_projectile_falls_through_to_fragments() {
        let (mut state, tuning) = empty_state();
        let pos = Vec2::new(200.0, 200.0);
        state.add_obstacle(Vec2::new(600.0, 200.0), Vec2::ZERO, 40.0, &tuning);
        state.add_obstacle(pos, Vec2::ZERO, 10.0, &tuning);
        let mut fragment = state.obstacles.remove(1);
        fragment.kind = ObstacleKind::Fragment;
        fragment.points_value = 7;
        state.fragments.push(fragment);
        state.add_projectile(pos, &tuning);

        resolve_collisions(&mut state, &tuning);

        assert!(state.fragments.is_empty());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.score, 7);
    }

    #[test]
    fn test_shield_absorbs_without_damage() {
        let (mut state, tuning) = empty_state();
        state.craft.shield.start(tuning.shield_duration_ms);
        let craft_pos = state.craft.pos;
        state.add_obstacle(craft_pos, Vec2::ZERO, 20.0, &tuning);

        resolve_collisions(&mut state, &tuning);

        assert_eq!(state.lives, 3);
        assert!(state.obstacles.is_empty());
        assert!(!state.craft.is_invincible());
        assert_eq!(state.score, 120);
    }

    #[test]
    fn test_invincible_craft_ignores_contact() {
        let (mut state, tuning) = empty_state();
        state.craft.invincibility.start(1000.0);
        let craft_pos = state.craft.pos;
        state.add_obstacle(craft_pos, Vec2::ZERO, 40.0, &tuning);

        resolve_collisions(&mut state, &tuning);

        assert_eq!(state.lives, 3);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_one_obstacle_contact_per_tick() {
        let (mut state, tuning) = empty_state();
        let craft_pos = state.craft.pos;
        let first = state.add_obstacle(craft_pos, Vec2::ZERO, 20.0, &tuning);
        let second = state.add_obstacle(craft_pos, Vec2::ZERO, 20.0, &tuning);

        resolve_collisions(&mut state, &tuning);

        assert_eq!(state.lives, 2);
        assert!(state.obstacles.iter().all(|o| o.id != first));
        assert!(state.obstacles.iter().any(|o| o.id == second));
    }

    #[test]
    fn test_game_over_stops_resolution() {
        let (mut state, tuning) = empty_state();
        state.lives = 1;
        let craft_pos = state.craft.pos;
        state.add_obstacle(craft_pos, Vec2::ZERO, 20.0, &tuning);
        state.add_pickup(craft_pos, &tuning);

        resolve_collisions(&mut state, &tuning);

        assert!(state.is_over());
        assert_eq!(state.lives, 0);
        assert!(state.obstacles.is_empty());
        // Pickup check never ran
        assert_eq!(state.pickups.len(), 1);
        assert!(!state.craft.shield_active());
    }

    /// Turn a freshly placed obstacle into a fragment at the same spot
    fn place_fragment(state: &mut GameState, pos: Vec2, size: f32, tuning: &Tuning) -> u32 {
        let id = state.add_obstacle(pos, Vec2::ZERO, size, tuning);
        let mut fragment = state.obstacles.pop().unwrap();
        fragment.kind = ObstacleKind::Fragment;
        fragment.points_value = Obstacle::points_for(ObstacleKind::Fragment, size, tuning);
        state.fragments.push(fragment);
        id
    }

    #[test]
    fn test_shield_absorbs_fragment() {
        let (mut state, tuning) = empty_state();
        state.craft.shield.start(tuning.shield_duration_ms);
        let craft_pos = state.craft.pos;
        place_fragment(&mut state, craft_pos, 24.0, &tuning);
        let points = state.fragments[0].points_value;

        resolve_collisions(&mut state, &tuning);

        assert_eq!(state.lives, 3);
        assert!(state.fragments.is_empty());
        assert!(!state.craft.is_invincible());
        assert_eq!(state.score, u64::from(points));
    }

    #[test]
    fn test_fragment_contact_costs_a_life() {
        let (mut state, tuning) = empty_state();
        let craft_pos = state.craft.pos;
        let id = place_fragment(&mut state, craft_pos, 24.0, &tuning);

        resolve_collisions(&mut state, &tuning);

        assert_eq!(state.lives, 2);
        assert!(state.craft.is_invincible());
        assert!(state.fragments.iter().all(|f| f.id != id));
        assert!(state.fragments.is_empty());
    }

    #[test]
    fn test_obstacle_and_fragment_contacts_are_independent() {
        let (mut state, tuning) = empty_state();
        state.craft.shield.start(tuning.shield_duration_ms);
        let craft_pos = state.craft.pos;
        state.add_obstacle(craft_pos, Vec2::ZERO, 20.0, &tuning);
        place_fragment(&mut state, craft_pos, 12.0, &tuning);

        resolve_collisions(&mut state, &tuning);

        assert_eq!(state.lives, 3);
        assert!(state.obstacles.is_empty());
        assert!(state.fragments.is_empty());
    }

    #[test]
    fn test_pickup_raises_shield() {
        let (mut state, tuning) = empty_state();
        let craft_pos = state.craft.pos;
        let id = state.add_pickup(craft_pos, &tuning);
        state.add_pickup(craft_pos, &tuning);

        resolve_collisions(&mut state, &tuning);

        assert!(state.craft.shield_active());
        assert_eq!(state.craft.shield.remaining_ms(), tuning.shield_duration_ms);
        assert_eq!(state.pickups.len(), 1);
        assert!(state.take_events().contains(&GameEvent::PickedUp { id }));
    }
}
