//! Targeting and damage resolution.
//!
//! Two modes share the cooldown gate:
//! - range mode (towers, the base, creeps) picks the closest enemy whose
//!   rect overlaps the attacker's range-padded rect, and fires a bullet;
//! - intersect mode (bullets) takes the first overlapping enemy in
//!   iteration order and applies damage directly.
//!
//! Callers react to the returned outcome instead of passing callbacks.

use hecs::{Entity, World};
use tracing::debug;

use td_core::components::{Attack, Bounds, Creep, Health, Player};
use td_core::constants::TOWER_SHOT_HEALTH_COST;
use td_core::enums::EntityKind;
use td_core::events::SoundCue;
use td_core::geometry::{distance_rects, Rect};
use td_core::stats::Stat;
use td_core::types::Position;

use crate::context::SimContext;
use crate::store::{entity_kind, entity_rect, require, require_mut};
use crate::systems::bullets;

/// Enemies of creeps and creep bullets.
pub const CREEP_ENEMIES: [EntityKind; 2] = [EntityKind::Tower, EntityKind::Player];

/// Enemies of towers, the base, and defender bullets.
pub const DEFENDER_ENEMIES: [EntityKind; 1] = [EntityKind::Creep];

/// Result of one intersect-mode attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    /// Cooling down, or nothing in reach.
    Missed,
    /// Damage dealt, target survived.
    Hit { target: Entity },
    /// Target health reached zero.
    Killed {
        target: Entity,
        kind: EntityKind,
        /// Score value of a killed creep, 0 otherwise.
        reward: i64,
    },
}

/// Candidate targets of the given kinds, with their rects, in iteration order.
fn enemies_of(world: &World, attacker: Entity, enemies: &[EntityKind]) -> Vec<(Entity, Rect)> {
    world
        .query::<(&Position, &Bounds)>()
        .iter()
        .filter(|(entity, _)| *entity != attacker)
        .filter(|(entity, _)| entity_kind(world, *entity).is_some_and(|k| enemies.contains(&k)))
        .map(|(entity, (pos, bounds))| {
            (entity, Rect::from_origin_size(pos.as_ivec2(), bounds.size))
        })
        .collect()
}

/// Closest enemy overlapping the range-padded rect. Ties keep the first found.
pub fn find_enemy_in_range(
    world: &World,
    attacker: Entity,
    range: i32,
    enemies: &[EntityKind],
) -> Option<Entity> {
    let reach = entity_rect(world, attacker).expand(range);
    let mut min_dist = (reach.width() + reach.height()) as f64;
    let mut found = None;
    for (enemy, rect) in enemies_of(world, attacker, enemies) {
        let dist = distance_rects(&reach, &rect);
        if reach.overlaps(&rect) && dist < min_dist {
            min_dist = dist;
            found = Some(enemy);
        }
    }
    found
}

/// First enemy overlapping the range-padded rect.
pub fn find_enemy_intersect(
    world: &World,
    attacker: Entity,
    range: i32,
    enemies: &[EntityKind],
) -> Option<Entity> {
    let reach = entity_rect(world, attacker).expand(range);
    enemies_of(world, attacker, enemies)
        .into_iter()
        .find(|(_, rect)| reach.overlaps(rect))
        .map(|(enemy, _)| enemy)
}

/// Range mode: on a ready tick, fire a bullet at the closest enemy.
/// Returns the target when a shot was fired.
pub fn attack_in_range(
    world: &mut World,
    ctx: &mut SimContext,
    attacker: Entity,
    enemies: &[EntityKind],
) -> Option<Entity> {
    let mut attack = require::<Attack>(world, attacker);
    attack.cooldown.check();

    let mut fired = None;
    if attack.cooldown.is_ready() {
        if let Some(target) = find_enemy_in_range(world, attacker, attack.range, enemies) {
            bullets::launch(world, ctx, attacker, &attack, target);
            attack.cooldown.start();
            fired = Some(target);
        }
    }
    attack.cooldown.advance();

    *require_mut::<Attack>(world, attacker) = attack;
    fired
}

/// Intersect mode: on a ready tick, damage the first enemy touched.
///
/// Killed targets are despawned, except the player's base, which keeps
/// its (non-positive) health for the death check to pick up.
pub fn resolve_intersect(
    world: &mut World,
    ctx: &mut SimContext,
    attacker: Entity,
    enemies: &[EntityKind],
) -> CombatOutcome {
    let mut attack = require::<Attack>(world, attacker);
    attack.cooldown.check();

    let mut outcome = CombatOutcome::Missed;
    if attack.cooldown.is_ready() {
        if let Some(target) = find_enemy_intersect(world, attacker, attack.range, enemies) {
            outcome = apply_damage(world, ctx, target, attack.power);
            attack.cooldown.start();
        }
    }
    attack.cooldown.advance();

    *require_mut::<Attack>(world, attacker) = attack;
    outcome
}

/// Subtract `power` from the target's health, removing it on a kill.
pub fn apply_damage(
    world: &mut World,
    ctx: &mut SimContext,
    target: Entity,
    power: i32,
) -> CombatOutcome {
    let kind = entity_kind(world, target);
    let remaining = require::<Health>(world, target).current - power;
    if remaining > 0 {
        require_mut::<Health>(world, target).current = remaining;
        return CombatOutcome::Hit { target };
    }

    ctx.audio.play(SoundCue::Explosion);
    let reward = world
        .get::<&Creep>(target)
        .map(|creep| creep.score_value)
        .unwrap_or(0);

    if kind == Some(EntityKind::Player) {
        require_mut::<Health>(world, target).current = remaining;
    } else {
        let _ = world.despawn(target);
    }

    CombatOutcome::Killed {
        target,
        kind: kind.unwrap_or(EntityKind::Creep),
        reward,
    }
}

/// Credit a creep kill to the player.
pub fn reward_kill(world: &mut World, ctx: &mut SimContext, reward: i64) {
    let mut player = require_mut::<Player>(world, ctx.player);
    player.money += reward;
    player.score += reward;
    drop(player);
    ctx.stats.incr(Stat::CreepsKilled);
}

/// The base's own shot at creeps. Runs once per simulation pass.
/// Base shots are not counted in the tower bullet stats.
pub fn player_attack(world: &mut World, ctx: &mut SimContext) {
    let player = ctx.player;
    if require::<Player>(world, player).dead {
        return;
    }
    attack_in_range(world, ctx, player, &DEFENDER_ENEMIES);
}

/// A tower's shot at creeps. Each shot costs the tower health; a tower
/// that runs dry this way is removed.
pub fn tower_attack(world: &mut World, ctx: &mut SimContext, tower: Entity) {
    if attack_in_range(world, ctx, tower, &DEFENDER_ENEMIES).is_none() {
        return;
    }
    ctx.stats.incr(Stat::TowerBulletsFired);

    let mut health = require_mut::<Health>(world, tower);
    health.current -= TOWER_SHOT_HEALTH_COST;
    let out_of_ammo = health.current <= 0;
    drop(health);

    if out_of_ammo {
        debug!(?tower, "tower out of ammo");
        let _ = world.despawn(tower);
        ctx.stats.incr(Stat::TowersAmmoOut);
    }
}

/// A creep's shot at towers and the base.
pub fn creep_attack(world: &mut World, ctx: &mut SimContext, creep: Entity) {
    if attack_in_range(world, ctx, creep, &CREEP_ENEMIES).is_some() {
        ctx.stats.incr(Stat::CreepBulletsFired);
    }
}
