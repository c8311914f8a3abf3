//! Platform abstraction layer
//!
//! Adapts host signals for the simulation:
//! - Time: frame timestamps to per-tick `dt`
//! - Input: held keys to per-tick commands with press edges

pub mod input;
pub mod time;

pub use input::{HeldControls, InputLatch};
pub use time::FrameClock;
