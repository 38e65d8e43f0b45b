//! Fundamental positional and simulation-time types.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Top-left pixel position of an entity on the board.
/// x grows to the right, y grows downward toward the base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Per-simulation-tick displacement in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: i32,
    pub y: i32,
    /// Whether the last movement attempt was obstructed.
    pub blocked: bool,
}

/// Engine time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Engine ticks since the battle started (runs at `ENGINE_TPS`).
    pub tick: u64,
    /// Gated simulation passes since the battle started.
    pub sim_ticks: u64,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn as_ivec2(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }
}

impl From<IVec2> for Position {
    fn from(v: IVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Velocity {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            blocked: false,
        }
    }

    pub fn as_ivec2(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }
}

impl SimTime {
    /// Seconds of wall time represented by the engine tick count.
    pub fn elapsed_secs(&self) -> f64 {
        self.tick as f64 / crate::constants::ENGINE_TPS as f64
    }
}
