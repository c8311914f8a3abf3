//! Data-driven game balance
//!
//! Every number the simulation reads lives here so a build can be re-balanced
//! from a JSON file. Values are checked once, up front; a `Tuning` that made it
//! into a [`crate::Simulation`] is known to be sane.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} range is inverted: min {min} > max {max}")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("arena {width}x{height} cannot hold a {craft}px craft")]
    ArenaTooSmall { width: f32, height: f32, craft: f32 },

    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Craft ===
    pub craft_size: f32,
    pub craft_acceleration: f32,
    /// Multiplicative velocity decay per tick, in (0, 1]
    pub craft_friction: f32,
    pub craft_max_speed: f32,
    pub craft_start_offset: f32,
    pub invincibility_ms: f32,
    pub starting_lives: u8,

    // === Weapon ===
    pub projectile_speed: f32,
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub laser_cooldown_ms: f32,

    // === Obstacles ===
    pub initial_obstacles: usize,
    pub obstacle_base_speed: f32,
    pub obstacle_min_init_size: f32,
    pub obstacle_max_init_size: f32,
    pub initial_clearance: f32,
    pub obstacle_spawn_interval_ms: f32,
    pub obstacle_min_spawn_interval_ms: f32,
    pub fragment_count: usize,
    pub fragment_size_divisor: f32,

    // === Hyperspace ===
    pub hyperspace_charges: u8,
    pub hyperspace_cooldown_ms: f32,
    pub hyperspace_malfunction_chance: f64,
    pub hyperspace_malfunction_margin: f32,

    // === Shield ===
    pub shield_duration_ms: f32,
    pub shield_pickup_speed: f32,
    pub shield_pickup_radius: f32,
    pub shield_spawn_min_ms: f32,
    pub shield_spawn_max_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            craft_size: CRAFT_SIZE,
            craft_acceleration: CRAFT_ACCELERATION,
            craft_friction: CRAFT_FRICTION,
            craft_max_speed: CRAFT_MAX_SPEED,
            craft_start_offset: CRAFT_START_OFFSET,
            invincibility_ms: INVINCIBILITY_MS,
            starting_lives: STARTING_LIVES,

            projectile_speed: PROJECTILE_SPEED,
            projectile_width: PROJECTILE_WIDTH,
            projectile_height: PROJECTILE_HEIGHT,
            laser_cooldown_ms: LASER_COOLDOWN_MS,

            initial_obstacles: INITIAL_OBSTACLES,
            obstacle_base_speed: OBSTACLE_BASE_SPEED,
            obstacle_min_init_size: OBSTACLE_MIN_INIT_SIZE,
            obstacle_max_init_size: OBSTACLE_MAX_INIT_SIZE,
            initial_clearance: INITIAL_CLEARANCE,
            obstacle_spawn_interval_ms: OBSTACLE_SPAWN_INTERVAL_MS,
            obstacle_min_spawn_interval_ms: OBSTACLE_MIN_SPAWN_INTERVAL_MS,
            fragment_count: FRAGMENT_COUNT,
            fragment_size_divisor: FRAGMENT_SIZE_DIVISOR,

            hyperspace_charges: HYPERSPACE_CHARGES,
            hyperspace_cooldown_ms: HYPERSPACE_COOLDOWN_MS,
            hyperspace_malfunction_chance: HYPERSPACE_MALFUNCTION_CHANCE,
            hyperspace_malfunction_margin: HYPERSPACE_MALFUNCTION_MARGIN,

            shield_duration_ms: SHIELD_DURATION_MS,
            shield_pickup_speed: SHIELD_PICKUP_SPEED,
            shield_pickup_radius: SHIELD_PICKUP_RADIUS,
            shield_spawn_min_ms: SHIELD_SPAWN_MIN_MS,
            shield_spawn_max_ms: SHIELD_SPAWN_MAX_MS,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    // Written as a negated comparison so NaN is rejected too
    if !(value > 0.0) {
        return Err(TuningError::NonPositive {
            field,
            value: value as f64,
        });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if !(value >= 0.0) {
        return Err(TuningError::OutOfRange {
            field,
            value: value as f64,
            min: 0.0,
            max: f64::INFINITY,
        });
    }
    Ok(())
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), TuningError> {
    if min > max {
        return Err(TuningError::InvertedRange {
            field,
            min: min as f64,
            max: max as f64,
        });
    }
    Ok(())
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Craft bounding box height (the hull is taller than it is wide)
    pub fn craft_height(&self) -> f32 {
        self.craft_size * 1.2
    }

    /// Collision radius of the craft
    pub fn craft_radius(&self) -> f32 {
        self.craft_size / 2.5
    }

    /// Obstacles at or below this size break up without fragments
    pub fn fragment_threshold(&self) -> f32 {
        self.obstacle_min_init_size / 1.5
    }

    /// Check every value for sanity
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("arena_width", self.arena_width)?;
        positive("arena_height", self.arena_height)?;
        positive("craft_size", self.craft_size)?;
        if self.arena_width < self.craft_size || self.arena_height < self.craft_height() {
            return Err(TuningError::ArenaTooSmall {
                width: self.arena_width,
                height: self.arena_height,
                craft: self.craft_size,
            });
        }

        non_negative("craft_acceleration", self.craft_acceleration)?;
        if !(self.craft_friction > 0.0 && self.craft_friction <= 1.0) {
            return Err(TuningError::OutOfRange {
                field: "craft_friction",
                value: self.craft_friction as f64,
                min: 0.0,
                max: 1.0,
            });
        }
        positive("craft_max_speed", self.craft_max_speed)?;
        non_negative("craft_start_offset", self.craft_start_offset)?;
        non_negative("invincibility_ms", self.invincibility_ms)?;
        if self.starting_lives == 0 {
            return Err(TuningError::NonPositive {
                field: "starting_lives",
                value: 0.0,
            });
        }

        positive("projectile_speed", self.projectile_speed)?;
        positive("projectile_width", self.projectile_width)?;
        positive("projectile_height", self.projectile_height)?;
        non_negative("laser_cooldown_ms", self.laser_cooldown_ms)?;

        positive("obstacle_base_speed", self.obstacle_base_speed)?;
        positive("obstacle_min_init_size", self.obstacle_min_init_size)?;
        positive("obstacle_max_init_size", self.obstacle_max_init_size)?;
        ordered(
            "obstacle_init_size",
            self.obstacle_min_init_size,
            self.obstacle_max_init_size,
        )?;
        non_negative("initial_clearance", self.initial_clearance)?;
        positive("obstacle_spawn_interval_ms", self.obstacle_spawn_interval_ms)?;
        positive(
            "obstacle_min_spawn_interval_ms",
            self.obstacle_min_spawn_interval_ms,
        )?;
        ordered(
            "obstacle_spawn_interval_ms",
            self.obstacle_min_spawn_interval_ms,
            self.obstacle_spawn_interval_ms,
        )?;
        if !(self.fragment_size_divisor > 1.0) {
            return Err(TuningError::OutOfRange {
                field: "fragment_size_divisor",
                value: self.fragment_size_divisor as f64,
                min: 1.0,
                max: f64::INFINITY,
            });
        }

        non_negative("hyperspace_cooldown_ms", self.hyperspace_cooldown_ms)?;
        if !(0.0..=1.0).contains(&self.hyperspace_malfunction_chance) {
            return Err(TuningError::OutOfRange {
                field: "hyperspace_malfunction_chance",
                value: self.hyperspace_malfunction_chance,
                min: 0.0,
                max: 1.0,
            });
        }
        non_negative(
            "hyperspace_malfunction_margin",
            self.hyperspace_malfunction_margin,
        )?;

        positive("shield_duration_ms", self.shield_duration_ms)?;
        positive("shield_pickup_speed", self.shield_pickup_speed)?;
        positive("shield_pickup_radius", self.shield_pickup_radius)?;
        positive("shield_spawn_min_ms", self.shield_spawn_min_ms)?;
        ordered(
            "shield_spawn_ms",
            self.shield_spawn_min_ms,
            self.shield_spawn_max_ms,
        )?;

        Ok(())
    }
}
