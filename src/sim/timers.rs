//! Cooldown and duration timers
//!
//! All timers run on session milliseconds supplied by the tick, never on wall
//! clock time, so a paused or stalled host simply freezes them.

use serde::{Deserialize, Serialize};

/// Rate limiter: an action is accepted once `cooldown_ms` has passed since the
/// previous acceptance. Starts ready.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cooldown {
    pub cooldown_ms: f32,
    last_ms: Option<f32>,
}

impl Cooldown {
    pub fn new(cooldown_ms: f32) -> Self {
        Self {
            cooldown_ms,
            last_ms: None,
        }
    }

    /// Milliseconds since the last accepted trigger (None if never triggered)
    pub fn elapsed(&self, now_ms: f32) -> Option<f32> {
        self.last_ms.map(|last| now_ms - last)
    }

    pub fn is_ready(&self, now_ms: f32) -> bool {
        self.elapsed(now_ms)
            .is_none_or(|elapsed| elapsed >= self.cooldown_ms)
    }

    /// Cooldown progress in [0, 1]; 1 means ready
    pub fn progress(&self, now_ms: f32) -> f32 {
        match self.elapsed(now_ms) {
            None => 1.0,
            Some(_) if self.cooldown_ms <= 0.0 => 1.0,
            Some(elapsed) => (elapsed / self.cooldown_ms).clamp(0.0, 1.0),
        }
    }

    /// Accept the action if ready, restarting the cooldown
    pub fn try_trigger(&mut self, now_ms: f32) -> bool {
        if !self.is_ready(now_ms) {
            return false;
        }
        self.last_ms = Some(now_ms);
        true
    }
}

/// A duration that counts down to zero and stays there
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Countdown {
    remaining_ms: f32,
}

impl Countdown {
    pub fn start(&mut self, duration_ms: f32) {
        self.remaining_ms = duration_ms.max(0.0);
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0.0
    }

    pub fn remaining_ms(&self) -> f32 {
        self.remaining_ms
    }

    /// Advance by `dt_ms`. Returns true on the tick the countdown runs out.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        if self.remaining_ms <= 0.0 {
            return false;
        }
        self.remaining_ms -= dt_ms;
        if self.remaining_ms <= 0.0 {
            self.remaining_ms = 0.0;
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.remaining_ms = 0.0;
    }
}

/// User-facing teleport status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeleportStatus {
    /// Charges left and cooldown elapsed
    Ready,
    /// Cooling down from the last jump
    Charging,
    /// No charges left and not mid-cooldown
    Depleted,
}

impl TeleportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeleportStatus::Ready => "Ready",
            TeleportStatus::Charging => "Charging",
            TeleportStatus::Depleted => "Depleted",
        }
    }
}

/// Hyperspace drive: a fixed pool of charges, one cooldown between jumps.
/// Charges are never replenished during a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HyperspaceDrive {
    pub charges: u8,
    pub max_charges: u8,
    cooldown: Cooldown,
}

impl HyperspaceDrive {
    pub fn new(charges: u8, cooldown_ms: f32) -> Self {
        Self {
            charges,
            max_charges: charges,
            cooldown: Cooldown::new(cooldown_ms),
        }
    }

    pub fn can_jump(&self, now_ms: f32) -> bool {
        self.charges > 0 && self.cooldown.is_ready(now_ms)
    }

    /// Spend a charge if a jump is allowed right now
    pub fn try_consume(&mut self, now_ms: f32) -> bool {
        if self.charges == 0 || !self.cooldown.try_trigger(now_ms) {
            return false;
        }
        self.charges -= 1;
        true
    }

    pub fn status(&self, now_ms: f32) -> TeleportStatus {
        if !self.cooldown.is_ready(now_ms) {
            TeleportStatus::Charging
        } else if self.charges > 0 {
            TeleportStatus::Ready
        } else {
            TeleportStatus::Depleted
        }
    }

    /// Bar fill in [0, 1] for the HUD
    pub fn progress(&self, now_ms: f32) -> f32 {
        match self.status(now_ms) {
            TeleportStatus::Ready => 1.0,
            TeleportStatus::Charging => self.cooldown.progress(now_ms),
            TeleportStatus::Depleted => 0.0,
        }
    }
}
