//! Frame clock

/// Longest frame fed to the simulation; a tab that slept for a minute resumes
/// as a single slow frame instead of a minute of catch-up
pub const MAX_FRAME_MS: f64 = 250.0;

/// Turns monotonically increasing host timestamps (ms) into frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous frame. The first frame and any backwards step
    /// yield 0.
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) if timestamp_ms > last => (timestamp_ms - last).min(MAX_FRAME_MS),
            _ => 0.0,
        };
        if self.last_ms.is_none_or(|last| timestamp_ms > last) {
            self.last_ms = Some(timestamp_ms);
        }
        dt as f32
    }

    /// Forget the last timestamp (after a restart or resume)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
