//! ECS components for hecs entities.
//!
//! Components are plain data structs. The only logic kept here is the
//! cooldown state machine, since every attacker shares it and the
//! invariant is easier to hold in one place.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::constants::TOWER_LEVELS_PER_CREEP_LEVEL;
use crate::enums::*;

/// Hit points. `current` never exceeds `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn full(max: i32) -> Self {
        Self { current: max, max }
    }
}

/// Ready/InCooldown gate for an attacker.
///
/// `ticker` only advances while `in_cooldown` is set. Once it reaches
/// `cooldown` the next check clears the flag and zeroes the ticker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownTimer {
    pub cooldown: i32,
    pub ticker: i32,
    pub in_cooldown: bool,
}

impl CooldownTimer {
    pub fn new(cooldown: i32) -> Self {
        Self {
            cooldown,
            ticker: 0,
            in_cooldown: false,
        }
    }

    /// Advance one simulation tick. No-op while ready.
    pub fn advance(&mut self) {
        if self.in_cooldown {
            self.ticker += 1;
        }
    }

    /// Clear the cooldown once the ticker has caught up.
    pub fn check(&mut self) {
        if self.in_cooldown && self.ticker >= self.cooldown {
            self.in_cooldown = false;
            self.ticker = 0;
        }
    }

    /// Enter cooldown. Called exactly when an attack fires.
    pub fn start(&mut self) {
        self.in_cooldown = true;
        self.ticker = 0;
    }

    pub fn is_ready(&self) -> bool {
        !self.in_cooldown
    }

    /// Ticks remaining until ready, 0 when ready.
    pub fn display(&self) -> i32 {
        if self.in_cooldown {
            (self.cooldown - self.ticker).max(0)
        } else {
            0
        }
    }
}

/// Offensive capability of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    pub power: i32,
    /// Padding added to the attacker's rect when searching for targets.
    pub range: i32,
    pub cooldown: CooldownTimer,
    pub attack_type: AttackType,
    /// Disable lead-aiming for bullets fired by this attacker.
    pub no_lead: bool,
}

impl Attack {
    pub fn ranged(power: i32, range: i32, cooldown: i32) -> Self {
        Self {
            power,
            range,
            cooldown: CooldownTimer::new(cooldown),
            attack_type: AttackType::RangedSingle,
            no_lead: false,
        }
    }
}

/// Marker: player-built defensive tower.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tower;

/// Enemy unit advancing toward the base.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Creep {
    /// Money and score granted on kill. Fixed at spawn.
    pub score_value: i64,
    pub variant: CreepVariant,
}

/// Upgrade level of a tower. Starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub level: u32,
}

/// The player's base. Exactly one per battle, never despawned mid-battle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub money: i64,
    pub score: i64,
    pub dead: bool,
    /// Starting offset plus tower upgrades bought this battle.
    pub tower_levels: u32,
}

impl Player {
    /// Difficulty scalar derived from tower spend. Always at least 1.
    pub fn creep_level(&self) -> u32 {
        self.tower_levels / TOWER_LEVELS_PER_CREEP_LEVEL + 1
    }
}

/// Single-use projectile flying a straight line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bullet {
    pub start: IVec2,
    /// Aim point, possibly led ahead of the target.
    pub end: IVec2,
    pub speed: i32,
    /// Fired by a creep (targets towers and the base) rather than a defender.
    pub creep_fired: bool,
}

/// Visual sprite. Entities with a sprite are solid for movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: SpriteKind,
}

/// Collision bounds in pixels, anchored at the entity's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub size: IVec2,
}
