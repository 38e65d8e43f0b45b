//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level scene/battle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, no battle world.
    #[default]
    Title,
    /// Battle in progress.
    Running,
    /// Battle paused by the player.
    Paused,
    /// Base destroyed or breached. Terminal until reset.
    GameOver,
}

/// Logical archetype of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Tower,
    Creep,
    Bullet,
}

/// Attack delivery style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackType {
    MeleeSingle,
    #[default]
    RangedSingle,
    MeleeArea,
    RangedArea,
}

/// Visual variant. Also determines collision bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Base,
    Tower,
    Creep1,
    Creep2,
    Creep3,
    BigCreep,
    SuperCreep,
}

/// Creep size class rolled at spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreepVariant {
    #[default]
    Normal,
    Big,
    Super,
}

impl SpriteKind {
    /// Asset name used by the frontend.
    pub fn asset_name(&self) -> &'static str {
        match self {
            SpriteKind::Base => "base",
            SpriteKind::Tower => "tower",
            SpriteKind::Creep1 => "creep1",
            SpriteKind::Creep2 => "creep2",
            SpriteKind::Creep3 => "creep3",
            SpriteKind::BigCreep => "creep4",
            SpriteKind::SuperCreep => "creep5",
        }
    }
}

impl CreepVariant {
    /// Stat multiplier for the regular wave variants.
    pub fn augment(&self) -> i32 {
        match self {
            CreepVariant::Normal => 1,
            CreepVariant::Big | CreepVariant::Super => 2,
        }
    }
}
