//! HUD read-out
//!
//! Everything the text overlay shows, computed from a finished tick.

use serde::Serialize;

use crate::sim::{GameState, TeleportStatus};
use crate::tuning::Tuning;

/// Values for the score/lives/weapon/hyperspace overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudStatus {
    pub score: u64,
    pub lives: u8,
    pub weapon_ready: bool,
    /// Weapon cooldown fill in [0, 1]
    pub weapon_progress: f32,
    pub teleport: TeleportStatus,
    pub teleport_charges: u8,
    pub teleport_max_charges: u8,
    /// Hyperspace cooldown fill in [0, 1]
    pub teleport_progress: f32,
    pub invincible: bool,
    /// Remaining shield in [0, 1] (0 when down)
    pub shield: f32,
    pub game_over: bool,
}

impl HudStatus {
    pub fn from_state(state: &GameState, tuning: &Tuning) -> Self {
        let now = state.session_ms;
        let shield = if tuning.shield_duration_ms > 0.0 {
            (state.craft.shield.remaining_ms() / tuning.shield_duration_ms).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            score: state.score,
            lives: state.lives,
            weapon_ready: state.weapon.is_ready(now),
            weapon_progress: state.weapon.progress(now),
            teleport: state.hyperspace.status(now),
            teleport_charges: state.hyperspace.charges,
            teleport_max_charges: state.hyperspace.max_charges,
            teleport_progress: state.hyperspace.progress(now),
            invincible: state.craft.is_invincible(),
            shield,
            game_over: state.is_over(),
        }
    }

    /// One-line text rendering, e.g. for a terminal or debug overlay
    pub fn status_line(&self) -> String {
        let charges: String = (0..self.teleport_max_charges)
            .map(|i| if i < self.teleport_charges { '*' } else { '-' })
            .collect();
        let weapon = if self.weapon_ready { "Ready" } else { "Charging" };
        format!(
            "Score: {} | Lives: {} | Weapon: {} | Hyperspace: {} ({})",
            self.score,
            self.lives,
            weapon,
            self.teleport.as_str(),
            charges
        )
    }
}
