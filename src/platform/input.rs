//! Keyboard state to tick commands
//!
//! The host reports which logical controls are held. Movement passes through
//! as held state; fire and hyperspace trigger once per press.

use crate::sim::TickInput;

/// Logical controls currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldControls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub hyperspace: bool,
}

impl HeldControls {
    /// Map a browser `KeyboardEvent.key` value to the control it drives
    pub fn set_key(&mut self, key: &str, pressed: bool) -> bool {
        let slot = match key {
            "ArrowUp" | "w" | "W" => &mut self.up,
            "ArrowDown" | "s" | "S" => &mut self.down,
            "ArrowLeft" | "a" | "A" => &mut self.left,
            "ArrowRight" | "d" | "D" => &mut self.right,
            " " | "Spacebar" => &mut self.fire,
            "h" | "H" => &mut self.hyperspace,
            _ => return false,
        };
        *slot = pressed;
        true
    }
}

/// Remembers last tick's action keys so holding them does not repeat
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    fire_was_down: bool,
    hyperspace_was_down: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the held controls for this tick
    pub fn sample(&mut self, held: HeldControls) -> TickInput {
        let fire = held.fire && !self.fire_was_down;
        let teleport = held.hyperspace && !self.hyperspace_was_down;
        self.fire_was_down = held.fire;
        self.hyperspace_was_down = held.hyperspace;

        TickInput {
            thrust_forward: held.up,
            thrust_back: held.down,
            strafe_left: held.left,
            strafe_right: held.right,
            fire,
            teleport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut latch = InputLatch::new();
        let held = HeldControls {
            fire: true,
            ..Default::default()
        };
        assert!(latch.sample(held).fire);
        assert!(!latch.sample(held).fire);
        assert!(!latch.sample(HeldControls::default()).fire);
        assert!(latch.sample(held).fire);
    }

    #[test]
    fn test_movement_passes_through_while_held() {
        let mut latch = InputLatch::new();
        let held = HeldControls {
            up: true,
            left: true,
            hyperspace: true,
            ..Default::default()
        };
        for i in 0..3 {
            let input = latch.sample(held);
            assert!(input.thrust_forward && input.strafe_left);
            assert_eq!(input.teleport, i == 0);
        }
    }

    #[test]
    fn test_key_mapping() {
        let mut held = HeldControls::default();
        assert!(held.set_key("ArrowRight", true));
        assert!(held.set_key("H", true));
        assert!(!held.set_key("q", true));
        assert!(held.right && held.hyperspace);
        held.set_key("ArrowRight", false);
        assert!(!held.right);
    }
}
