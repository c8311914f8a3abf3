//! Session control surface
//!
//! `Simulation` is the single writer of [`GameState`]. Readers borrow the state
//! between ticks, so a renderer can never observe a half-applied tick.

use super::spawn::populate_initial_field;
use super::state::GameState;
use super::tick::{TickInput, TickResult, tick};
use crate::tuning::{Tuning, TuningError};

/// A validated tuning plus the live session built from it
#[derive(Debug, Clone)]
pub struct Simulation {
    tuning: Tuning,
    state: GameState,
}

impl Simulation {
    /// Validate `tuning` and start a session seeded with `seed`
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let state = Self::fresh_state(&tuning, seed);
        log::info!("Session started with seed: {}", seed);
        Ok(Self { tuning, state })
    }

    /// Start a session with the stock balance
    pub fn start(seed: u64) -> Self {
        let tuning = Tuning::default();
        let state = Self::fresh_state(&tuning, seed);
        log::info!("Session started with seed: {}", seed);
        Self { tuning, state }
    }

    fn fresh_state(tuning: &Tuning, seed: u64) -> GameState {
        let mut state = GameState::new(seed, tuning);
        populate_initial_field(&mut state, tuning);
        state
    }

    /// Throw away every piece of session state and begin again
    pub fn restart(&mut self, seed: u64) {
        self.state = Self::fresh_state(&self.tuning, seed);
        log::info!("Session restarted with seed: {}", seed);
    }

    /// Advance one frame
    pub fn tick(&mut self, dt_ms: f32, input: &TickInput) -> TickResult {
        tick(&mut self.state, input, dt_ms, &self.tuning)
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Read-only view for renderers and HUDs
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}
