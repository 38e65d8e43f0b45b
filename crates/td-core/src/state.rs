//! Battle snapshot: the complete visible state sent to the frontend each tick.
//!
//! Snapshots are plain data. A remote mirror receives the same structure,
//! so everything here must round-trip through serde.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SoundCue;
use crate::geometry::Rect;
use crate::stats::GameStats;
use crate::types::{Position, SimTime};

/// Replicated battle flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    pub game_over: bool,
    pub paused: bool,
}

/// Playable area in pixels. One per battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Bounds rectangle from the origin.
    pub fn rect(&self) -> Rect {
        Rect::new(glam::IVec2::ZERO, glam::IVec2::new(self.width, self.height))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(
            crate::constants::DEFAULT_BOARD_WIDTH,
            crate::constants::DEFAULT_BOARD_HEIGHT,
        )
    }
}

/// Display toggles echoed back to the frontend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleView {
    pub debug: bool,
    pub grid_lines: bool,
    pub show_stats: bool,
    pub sound: bool,
    pub computer: bool,
}

/// The player's base and wallet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub money: i64,
    pub score: i64,
    pub dead: bool,
    pub health: i32,
    pub max_health: i32,
    pub creep_level: u32,
    pub max_tower_level: u32,
    pub tower_levels: u32,
}

/// One displayable entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityView {
    /// Stable entity id (`hecs::Entity::to_bits`).
    pub id: u64,
    pub kind: EntityKind,
    pub sprite: Option<SpriteKind>,
    pub position: Position,
    pub rect: Rect,
    pub health: i32,
    pub max_health: i32,
    /// Ticks until the entity may attack again.
    pub cooldown: i32,
    /// Attack range padding, for range overlays.
    pub range: i32,
    pub level: u32,
    /// Only meaningful for bullets.
    pub creep_fired: bool,
}

/// Running high-water marks for the current battle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighMarks {
    pub score: i64,
    pub creep_level: u32,
    pub tower_level: u32,
}

/// Complete battle state broadcast after each engine tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub battle: BattleState,
    pub board: Board,
    pub speed: u32,
    pub toggles: ToggleView,
    pub player: PlayerView,
    /// Sorted by id.
    pub entities: Vec<EntityView>,
    pub session_stats: GameStats,
    pub highs: HighMarks,
    /// Cues raised during this tick. Empty when sound is off.
    pub sounds: Vec<SoundCue>,
}

impl BattleSnapshot {
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }
}
