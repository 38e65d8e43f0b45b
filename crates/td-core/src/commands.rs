//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next engine tick, before the
//! gated simulation pass. Coordinates are board pixels of the cursor.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Tower economy ---
    /// Build a tower centered on the cursor.
    PlaceTower { x: i32, y: i32 },
    /// Refill the health of the tower under the cursor.
    HealTower { x: i32, y: i32 },
    /// Upgrade the tower under the cursor by one level.
    UpgradeTower { x: i32, y: i32 },

    // --- Multiplayer ---
    /// Pay to send a super creep to the peer's board.
    SendSuperCreep,

    // --- Battle flow ---
    /// Leave the title screen and begin a battle.
    StartBattle,
    /// Pause or resume the running battle.
    TogglePause,
    /// Tear down and start a fresh battle.
    Reset,
    /// Tear down and return to the title screen.
    ReturnToTitle,

    // --- Options ---
    SpeedUp,
    SpeedDown,
    ToggleDebug,
    ToggleGridLines,
    ToggleSound,
    ToggleStats,
}

impl PlayerCommand {
    /// Whether the command is allowed while paused or after game over.
    pub fn is_meta(&self) -> bool {
        matches!(
            self,
            PlayerCommand::StartBattle
                | PlayerCommand::TogglePause
                | PlayerCommand::Reset
                | PlayerCommand::ReturnToTitle
                | PlayerCommand::SpeedUp
                | PlayerCommand::SpeedDown
                | PlayerCommand::ToggleDebug
                | PlayerCommand::ToggleGridLines
                | PlayerCommand::ToggleSound
                | PlayerCommand::ToggleStats
        )
    }
}
