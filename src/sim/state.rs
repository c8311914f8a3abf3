//! Game state and core simulation types
//!
//! Everything a renderer or HUD reads after a tick lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::timers::{Cooldown, Countdown, HyperspaceDrive};
use crate::random_between;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives; the session is frozen until restart
    GameOver,
}

/// Which factory produced an obstacle-family entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Obstacle,
    Fragment,
}

/// Something that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Weapon accepted a fire command and emitted a projectile pair
    Fired,
    /// Craft took damage
    Hit { lives_left: u8 },
    /// An obstacle or fragment was destroyed
    Destroyed {
        id: u32,
        kind: ObstacleKind,
        points: u32,
        fragments: usize,
    },
    /// Shield pickup collected
    PickedUp { id: u32 },
    /// Shield ran out
    ShieldExpired,
    /// Hyperspace jump completed
    Teleported { to: Vec2, malfunction: bool },
    /// Last life lost
    GameOver { score: u64 },
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Craft {
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub radius: f32,
    /// Exhaust flame intensity in [0, 1] (visual only)
    pub propulsion: f32,
    pub invincibility: Countdown,
    pub shield: Countdown,
}

impl Craft {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            width: tuning.craft_size,
            height: tuning.craft_height(),
            radius: tuning.craft_radius(),
            propulsion: 0.0,
            invincibility: Countdown::default(),
            shield: Countdown::default(),
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility.is_active()
    }

    pub fn shield_active(&self) -> bool {
        self.shield.is_active()
    }

    /// Half extents of the bounding box
    pub fn half_size(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Keep the whole bounding box inside the arena (hard stop)
    pub fn clamp_to_arena(&mut self, width: f32, height: f32) {
        let half = self.half_size();
        self.pos = self
            .pos
            .clamp(half, Vec2::new(width - half.x, height - half.y));
    }

    /// Muzzle positions of the twin lasers
    pub fn muzzles(&self) -> [Vec2; 2] {
        let nose_y = self.pos.y - self.height / 2.0;
        let offset = self.width / 5.0;
        [
            Vec2::new(self.pos.x - offset, nose_y),
            Vec2::new(self.pos.x + offset, nose_y),
        ]
    }
}

/// A laser bolt travelling straight up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::new(0.0, -tuning.projectile_speed),
            width: tuning.projectile_width,
            height: tuning.projectile_height,
        }
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.y <= -self.height
    }
}

/// An obstacle or fragment (same shape, different factory)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Diameter
    pub size: f32,
    /// Cosmetic spin (radians)
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Score credited on destruction, fixed at creation
    pub points_value: u32,
}

impl Obstacle {
    /// Create a drifting obstacle heading mostly downward
    ///
    /// Speed grows with session time and shrinks with size; `speed_multiplier`
    /// is the spawner's difficulty factor.
    pub fn spawn(
        id: u32,
        pos: Vec2,
        size: f32,
        speed_multiplier: f32,
        session_ms: f32,
        tuning: &Tuning,
        rng: &mut Pcg32,
    ) -> Self {
        use std::f32::consts::{FRAC_PI_4, PI};

        let heading = random_between(rng, FRAC_PI_4, PI * 0.75);
        let base = tuning.obstacle_base_speed + session_ms / 30_000.0;
        let speed = random_between(rng, base * 0.8, base * 1.2)
            / (size / tuning.obstacle_max_init_size)
            * speed_multiplier;

        Self {
            id,
            kind: ObstacleKind::Obstacle,
            pos,
            vel: Vec2::from_angle(heading) * speed,
            size,
            rotation: random_between(rng, 0.0, std::f32::consts::TAU),
            rotation_speed: random_between(rng, -0.02, 0.02),
            points_value: Self::points_for(ObstacleKind::Obstacle, size, tuning),
        }
    }

    /// Create one fragment of a destroyed obstacle, sprayed outward from it
    pub fn fragment_of(id: u32, parent: &Obstacle, tuning: &Tuning, rng: &mut Pcg32) -> Self {
        let size = parent.size / tuning.fragment_size_divisor;
        let angle = random_between(rng, 0.0, std::f32::consts::TAU);
        let burst = random_between(rng, 0.5, 1.5);

        Self {
            id,
            kind: ObstacleKind::Fragment,
            pos: parent.pos,
            vel: parent.vel + Vec2::from_angle(angle) * burst,
            size,
            rotation: random_between(rng, 0.0, std::f32::consts::TAU),
            rotation_speed: random_between(rng, -0.02, 0.02),
            points_value: Self::points_for(ObstacleKind::Fragment, size, tuning),
        }
    }

    /// Smaller pieces are worth more; whole obstacles pay double
    pub fn points_for(kind: ObstacleKind, size: f32, tuning: &Tuning) -> u32 {
        let ratio = tuning.obstacle_max_init_size / size;
        match kind {
            ObstacleKind::Obstacle => ((ratio * 20.0).floor() as u32).max(10) * 2,
            ObstacleKind::Fragment => ((ratio * 10.0).floor() as u32).max(5),
        }
    }

    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    pub fn is_fragment(&self) -> bool {
        self.kind == ObstacleKind::Fragment
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.rotation += self.rotation_speed;
    }

    /// Outside the arena by more than one size, or three above the top
    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.pos.x <= -self.size
            || self.pos.x >= width + self.size
            || self.pos.y >= height + self.size
            || self.pos.y <= -self.size * 3.0
    }
}

/// Collectible that raises the craft's shield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShieldPickup {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl ShieldPickup {
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    pub fn is_off_screen(&self, height: f32) -> bool {
        self.pos.y + self.radius > height
    }
}

/// Spawner bookkeeping (session milliseconds)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnClock {
    pub last_obstacle_ms: f32,
    pub last_pickup_ms: f32,
    /// Randomised wait before the next shield pickup
    pub pickup_interval_ms: f32,
}

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub rng: Pcg32,
    pub lives: u8,
    pub score: u64,
    /// Accumulated session time; drives difficulty
    pub session_ms: f32,
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub craft: Craft,
    /// Registries, each in insertion (id) order
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    pub fragments: Vec<Obstacle>,
    pub pickups: Vec<ShieldPickup>,
    pub weapon: Cooldown,
    pub hyperspace: HyperspaceDrive,
    pub spawn: SpawnClock,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Fresh session with an empty field (see `spawn::populate_initial_field`)
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let craft_pos = Vec2::new(
            tuning.arena_width / 2.0,
            tuning.arena_height - tuning.craft_start_offset,
        );
        let mut craft = Craft::new(craft_pos, tuning);
        craft.clamp_to_arena(tuning.arena_width, tuning.arena_height);
        let pickup_interval_ms =
            random_between(&mut rng, tuning.shield_spawn_min_ms, tuning.shield_spawn_max_ms);

        Self {
            seed,
            rng,
            lives: tuning.starting_lives,
            score: 0,
            session_ms: 0.0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            craft,
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            fragments: Vec::new(),
            pickups: Vec::new(),
            weapon: Cooldown::new(tuning.laser_cooldown_ms),
            hyperspace: HyperspaceDrive::new(
                tuning.hyperspace_charges,
                tuning.hyperspace_cooldown_ms,
            ),
            spawn: SpawnClock {
                last_obstacle_ms: 0.0,
                last_pickup_ms: 0.0,
                pickup_interval_ms,
            },
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Place an obstacle with the given size and velocity that does not rotate
    /// (`rotation_speed` is 0)
    #[cfg(test)]
    pub(crate) fn add_obstacle(
        &mut self,
        pos: Vec2,
        vel: Vec2,
        size: f32,
        tuning: &Tuning,
    ) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::Obstacle,
            pos,
            vel,
            size,
            rotation: 0.0,
            rotation_speed: 0.0,
            points_value: Obstacle::points_for(ObstacleKind::Obstacle, size, tuning),
        });
        id
    }

    pub fn add_projectile(&mut self, pos: Vec2, tuning: &Tuning) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile::new(id, pos, tuning));
        id
    }

    pub fn add_pickup(&mut self, pos: Vec2, tuning: &Tuning) -> u32 {
        let id = self.next_entity_id();
        self.pickups.push(ShieldPickup {
            id,
            pos,
            vel: Vec2::new(0.0, tuning.shield_pickup_speed),
            radius: tuning.shield_pickup_radius,
        });
        id
    }

    /// Apply one hit to the craft. Invincibility makes this a no-op.
    ///
    /// Returns true if the hit ended the session.
    pub fn damage_craft(&mut self, tuning: &Tuning) -> bool {
        if self.craft.is_invincible() || self.is_over() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.craft.invincibility.start(tuning.invincibility_ms);
        self.push_event(GameEvent::Hit {
            lives_left: self.lives,
        });

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.craft.vel = Vec2::ZERO;
            self.push_event(GameEvent::GameOver { score: self.score });
            log::info!(
                "Game over: score {} after {:.1}s",
                self.score,
                self.session_ms / 1000.0
            );
            return true;
        }
        false
    }

    /// Roll a probability against the session RNG
    pub fn roll(&mut self, chance: f64) -> bool {
        self.rng.random_bool(chance.clamp(0.0, 1.0))
    }
}
