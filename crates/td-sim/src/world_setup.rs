//! Entity spawn factories for setting up the battle world.
//!
//! Creates the player base, towers, creeps, and bullets with their
//! component bundles. Stat curves for creeps live here too so the spawner
//! and tests agree on them.

use glam::IVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use td_core::assets::AssetCatalog;
use td_core::components::*;
use td_core::constants::*;
use td_core::enums::*;
use td_core::geometry::Rect;
use td_core::state::Board;
use td_core::types::{Position, Velocity};

/// Spawn the player's base along the bottom edge of the board.
pub fn spawn_player(
    world: &mut World,
    board: &Board,
    assets: &dyn AssetCatalog,
    starting_level: u32,
) -> Entity {
    let size = assets.sprite_size(SpriteKind::Base, board.width);
    let attack = Attack {
        no_lead: true,
        ..Attack::ranged(PLAYER_ATTACK_POWER, PLAYER_ATTACK_RANGE, PLAYER_ATTACK_COOLDOWN)
    };
    world.spawn((
        Player {
            money: PLAYER_START_MONEY,
            score: 0,
            dead: false,
            tower_levels: starting_level,
        },
        Position::new(0, board.height - BASE_HEIGHT),
        Bounds { size },
        Sprite {
            kind: SpriteKind::Base,
        },
        Health::full(PLAYER_MAX_HEALTH),
        attack,
    ))
}

/// Spawn a level-1 tower with its top-left corner at `origin`.
pub fn spawn_tower(world: &mut World, assets: &dyn AssetCatalog, origin: IVec2) -> Entity {
    let size = assets.sprite_size(SpriteKind::Tower, 0);
    world.spawn((
        Tower,
        Position::from(origin),
        Bounds { size },
        Sprite {
            kind: SpriteKind::Tower,
        },
        Health::full(TOWER_MAX_HEALTH),
        Attack::ranged(TOWER_ATTACK_POWER, TOWER_ATTACK_RANGE, TOWER_ATTACK_COOLDOWN),
        Level { level: 1 },
    ))
}

/// Stats a creep is born with. Fixed for its lifetime except health.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreepProfile {
    pub health: i32,
    pub power: i32,
    pub range: i32,
    pub cooldown: i32,
    pub speed: i32,
    pub score: i64,
}

/// Stat curve for a creep of the given variant and creep level.
pub fn creep_profile(variant: CreepVariant, level: u32) -> CreepProfile {
    let lvl = level.max(1) as i32 - 1;
    match variant {
        CreepVariant::Super => CreepProfile {
            health: SUPER_CREEP_BASE_HEALTH + SUPER_CREEP_HEALTH_PER_LEVEL * (lvl + 1),
            power: SUPER_CREEP_POWER,
            range: SUPER_CREEP_RANGE,
            cooldown: SUPER_CREEP_COOLDOWN,
            speed: SUPER_CREEP_SPEED,
            score: SUPER_CREEP_SCORE,
        },
        CreepVariant::Normal | CreepVariant::Big => {
            let augment = variant.augment();
            CreepProfile {
                health: 1 + 2 * augment + lvl,
                power: 2 + 2 * augment + lvl / 2,
                range: 10 + 10 * augment,
                cooldown: 5 + 5 * augment,
                speed: 5 - augment,
                score: (10 * augment + 2 * lvl) as i64,
            }
        }
    }
}

/// Roll the size class and sprite for a wave creep.
pub fn roll_creep_variant(rng: &mut ChaCha8Rng) -> (CreepVariant, SpriteKind) {
    if rng.gen::<f64>() < BIG_CREEP_CHANCE {
        (CreepVariant::Big, SpriteKind::BigCreep)
    } else {
        let sprite = match rng.gen_range(0..3) {
            0 => SpriteKind::Creep1,
            1 => SpriteKind::Creep2,
            _ => SpriteKind::Creep3,
        };
        (CreepVariant::Normal, sprite)
    }
}

/// Spawn a creep with its top-left corner at `origin`.
pub fn spawn_creep(
    world: &mut World,
    assets: &dyn AssetCatalog,
    origin: IVec2,
    variant: CreepVariant,
    sprite: SpriteKind,
    level: u32,
) -> Entity {
    let profile = creep_profile(variant, level);
    let size = assets.sprite_size(sprite, 0);
    world.spawn((
        Creep {
            score_value: profile.score,
            variant,
        },
        Position::from(origin),
        Velocity::new(0, profile.speed),
        Bounds { size },
        Sprite { kind: sprite },
        Health::full(profile.health),
        Attack::ranged(profile.power, profile.range, profile.cooldown),
    ))
}

/// Where a super creep enters: centered on the top spawn line.
pub fn super_creep_rect(board: &Board, assets: &dyn AssetCatalog) -> Rect {
    let size = assets.sprite_size(SpriteKind::SuperCreep, board.width);
    Rect::from_origin_size(IVec2::new(board.width / 2 - size.x / 2, SPAWN_BORDER), size)
}

/// Spawn a super creep centered on the top spawn line.
pub fn spawn_super_creep(
    world: &mut World,
    board: &Board,
    assets: &dyn AssetCatalog,
    level: u32,
) -> Entity {
    let origin = super_creep_rect(board, assets).min;
    spawn_creep(
        world,
        assets,
        origin,
        CreepVariant::Super,
        SpriteKind::SuperCreep,
        level,
    )
}

/// Spawn a bullet at `start` flying toward `end`.
pub fn spawn_bullet(
    world: &mut World,
    start: IVec2,
    end: IVec2,
    speed: i32,
    power: i32,
    creep_fired: bool,
) -> Entity {
    let size = if creep_fired {
        CREEP_BULLET_SIZE
    } else {
        DEFENDER_BULLET_SIZE
    };
    world.spawn((
        Bullet {
            start,
            end,
            speed,
            creep_fired,
        },
        Position::from(start),
        Bounds {
            size: IVec2::splat(size),
        },
        Attack::ranged(power, BULLET_RANGE, BULLET_COOLDOWN),
    ))
}
