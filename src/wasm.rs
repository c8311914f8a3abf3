//! Browser bindings
//!
//! The page owns the canvas, audio and DOM; it forwards key events and
//! animation-frame timestamps here and reads JSON back after each frame.

use wasm_bindgen::prelude::*;

use crate::platform::{FrameClock, HeldControls, InputLatch};
use crate::sim::Simulation;
use crate::tuning::Tuning;
use crate::ui::HudStatus;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// One browser game instance
#[wasm_bindgen]
pub struct WebGame {
    sim: Simulation,
    clock: FrameClock,
    latch: InputLatch,
    held: HeldControls,
}

#[wasm_bindgen]
impl WebGame {
    /// Start a session sized to the canvas
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, width: f32, height: f32) -> Result<WebGame, JsError> {
        let tuning = Tuning {
            arena_width: width,
            arena_height: height,
            ..Default::default()
        };
        Ok(Self {
            sim: Simulation::new(tuning, seed)?,
            clock: FrameClock::new(),
            latch: InputLatch::new(),
            held: HeldControls::default(),
        })
    }

    /// Forward a keydown/keyup; returns true if the key is bound
    pub fn key(&mut self, key: &str, pressed: bool) -> bool {
        self.held.set_key(key, pressed)
    }

    /// Advance one animation frame; returns the tick's events as JSON
    pub fn frame(&mut self, timestamp_ms: f64) -> Result<String, JsError> {
        let dt = self.clock.advance(timestamp_ms);
        let input = self.latch.sample(self.held);
        let result = self.sim.tick(dt, &input);
        Ok(serde_json::to_string(&result.events)?)
    }

    /// Full entity state as JSON for the renderer
    pub fn snapshot(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.sim.state())?)
    }

    /// HUD values as JSON
    pub fn hud(&self) -> Result<String, JsError> {
        let hud = HudStatus::from_state(self.sim.state(), self.sim.tuning());
        Ok(serde_json::to_string(&hud)?)
    }

    pub fn restart(&mut self, seed: u64) {
        self.sim.restart(seed);
        self.clock.reset();
        self.held = HeldControls::default();
        self.latch = InputLatch::new();
    }

    pub fn is_over(&self) -> bool {
        self.sim.is_over()
    }
}
