//! Tower economy: placement, healing, and upgrades.
//!
//! Money is only debited when an action succeeds. Running short of money
//! is not an error; it plays a rejection cue and reports "not performed".

use glam::IVec2;
use hecs::{Entity, World};
use tracing::debug;

use td_core::components::{Attack, Health, Level, Player, Tower};
use td_core::constants::*;
use td_core::enums::SpriteKind;
use td_core::error::PlacementError;
use td_core::events::SoundCue;
use td_core::geometry::Rect;
use td_core::stats::Stat;

use crate::context::SimContext;
use crate::store::{entity_rect, require, require_mut};
use crate::world_setup;

/// Highest level a tower may reach given lifetime upgrade purchases.
pub fn max_tower_level(lifetime_upgrades: u64) -> u32 {
    TOWER_BASE_MAX_LEVEL + (lifetime_upgrades / UPGRADES_PER_MAX_LEVEL) as u32
}

/// Take `cost` from the player if affordable.
fn try_spend(world: &World, ctx: &mut SimContext, cost: i64) -> bool {
    let mut player = require_mut::<Player>(world, ctx.player);
    if player.money < cost {
        debug!(cost, money = player.money, "not enough money");
        drop(player);
        ctx.audio.play(SoundCue::Invalid2);
        return false;
    }
    player.money -= cost;
    true
}

/// Build a tower centered on the cursor.
///
/// `Ok(None)` means the player could not afford it. Placement may overlap
/// towers and creeps; only the board edge and the base reject it.
pub fn try_place_tower(
    world: &mut World,
    ctx: &mut SimContext,
    x: i32,
    y: i32,
) -> Result<Option<Entity>, PlacementError> {
    if require::<Player>(world, ctx.player).money < TOWER_COST {
        debug!(x, y, "cannot afford tower");
        ctx.audio.play(SoundCue::Invalid2);
        return Ok(None);
    }

    let size = ctx.assets.sprite_size(SpriteKind::Tower, ctx.board.width);
    let rect = Rect::centered_on(IVec2::new(x, y), size);
    if !rect.within(&ctx.board.rect()) {
        ctx.audio.play(SoundCue::Invalid1);
        return Err(PlacementError::OutOfBounds { x, y });
    }
    if rect.overlaps(&entity_rect(world, ctx.player)) {
        ctx.audio.play(SoundCue::Invalid2);
        return Err(PlacementError::BaseCollision { x, y });
    }

    if !try_spend(world, ctx, TOWER_COST) {
        return Ok(None);
    }
    let tower = world_setup::spawn_tower(world, ctx.assets, rect.min);
    ctx.stats.incr(Stat::TowersBuilt);
    debug!(x, y, ?tower, "tower placed");
    Ok(Some(tower))
}

/// Apply one level of upgrade to a tower's stats.
pub fn apply_upgrade(level: &mut Level, health: &mut Health, attack: &mut Attack) {
    level.level += 1;
    health.max += TOWER_UPGRADE_HEALTH;
    health.current = health.max;
    attack.power += (level.level as i32 / 3).max(1);
    attack.range += TOWER_UPGRADE_RANGE;
    attack.cooldown.cooldown =
        (attack.cooldown.cooldown - TOWER_UPGRADE_COOLDOWN).max(TOWER_MIN_COOLDOWN);
}

/// Upgrade a tower by one level. Fails without charge at the level cap.
pub fn try_upgrade_tower(
    world: &mut World,
    ctx: &mut SimContext,
    tower: Entity,
    max_level: u32,
) -> bool {
    if require::<Player>(world, ctx.player).money < TOWER_UPGRADE_COST {
        ctx.audio.play(SoundCue::Invalid2);
        return false;
    }
    let mut level = require::<Level>(world, tower);
    if level.level >= max_level {
        debug!(?tower, level = level.level, max_level, "tower already at max level");
        return false;
    }
    if !try_spend(world, ctx, TOWER_UPGRADE_COST) {
        return false;
    }

    let mut health = require::<Health>(world, tower);
    let mut attack = require::<Attack>(world, tower);
    apply_upgrade(&mut level, &mut health, &mut attack);
    *require_mut::<Level>(world, tower) = level;
    *require_mut::<Health>(world, tower) = health;
    *require_mut::<Attack>(world, tower) = attack;

    require_mut::<Player>(world, ctx.player).tower_levels += 1;
    ctx.stats.incr(Stat::TowerUpgrades);
    debug!(?tower, level = level.level, "tower upgraded");
    true
}

/// Refill a tower's health. Fails without charge when already full.
pub fn try_heal_tower(world: &mut World, ctx: &mut SimContext, tower: Entity) -> bool {
    if require::<Player>(world, ctx.player).money < TOWER_HEAL_COST {
        ctx.audio.play(SoundCue::Invalid2);
        return false;
    }
    let health = require::<Health>(world, tower);
    if health.current >= health.max {
        return false;
    }
    if !try_spend(world, ctx, TOWER_HEAL_COST) {
        return false;
    }
    require_mut::<Health>(world, tower).current = health.max;
    ctx.stats.incr(Stat::TowerHeals);
    debug!(?tower, "tower healed");
    true
}

/// Tower whose rect contains the cursor.
pub fn find_tower_at(world: &World, x: i32, y: i32) -> Option<Entity> {
    let cursor = IVec2::new(x, y);
    world
        .query::<()>()
        .with::<&Tower>()
        .iter()
        .map(|(entity, ())| entity)
        .find(|&entity| entity_rect(world, entity).contains_point(cursor))
}
