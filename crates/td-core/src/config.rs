//! Startup configuration for a battle.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::*;

/// Options read once at startup. After that, only `PlayerCommand`
/// toggles change them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    /// Simulation passes per second, 0 pauses simulation.
    pub speed: u32,
    /// Tower levels credited at battle start (difficulty offset).
    pub starting_level: u32,
    pub debug: bool,
    pub grid_lines: bool,
    pub show_stats: bool,
    pub sound: bool,
    /// Let the computer strategy play instead of player input.
    pub computer: bool,
    /// Computer speed, 1 (slowest) to 5.
    pub computer_level: u32,
    /// RNG seed. Same seed and inputs reproduce a battle.
    pub seed: u64,
    pub stats_path: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            speed: MAX_SIM_SPEED,
            starting_level: 0,
            debug: false,
            grid_lines: false,
            show_stats: false,
            sound: true,
            computer: false,
            computer_level: DEFAULT_COMPUTER_LEVEL,
            seed: 42,
            stats_path: "score/stats.txt".to_string(),
        }
    }
}

impl GameConfig {
    /// Clamp out-of-range values, logging each adjustment.
    pub fn sanitized(mut self) -> Self {
        if self.speed > MAX_SIM_SPEED {
            warn!(speed = self.speed, "sim speed above maximum, clamping");
            self.speed = MAX_SIM_SPEED;
        }
        let max_level = COMPUTER_TICK_DIVISORS.len() as u32;
        if !(1..=max_level).contains(&self.computer_level) {
            warn!(level = self.computer_level, "computer level out of range, clamping");
            self.computer_level = self.computer_level.clamp(1, max_level);
        }
        let min_width = TOWER_SPRITE_SIZE + 2 * SPAWN_BORDER + BIG_CREEP_SPRITE_SIZE;
        if self.width < min_width {
            warn!(width = self.width, min_width, "board too narrow, widening");
            self.width = min_width;
        }
        let min_height = BASE_HEIGHT + 4 * TOWER_SPRITE_SIZE;
        if self.height < min_height {
            warn!(height = self.height, min_height, "board too short, extending");
            self.height = min_height;
        }
        self
    }

    /// Engine ticks between computer strategy actions.
    pub fn computer_tick_divisor(&self) -> u32 {
        let idx = self
            .computer_level
            .clamp(1, COMPUTER_TICK_DIVISORS.len() as u32) as usize
            - 1;
        COMPUTER_TICK_DIVISORS[idx]
    }

    pub fn speed_up(&mut self) {
        self.speed = (self.speed + SIM_SPEED_STEP).min(MAX_SIM_SPEED);
    }

    pub fn speed_down(&mut self) {
        self.speed = self.speed.saturating_sub(SIM_SPEED_STEP);
    }
}
