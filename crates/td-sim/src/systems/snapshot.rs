//! Snapshot system: reads the ECS world into display views.
//!
//! This system is read-only. It never modifies the world.

use hecs::{Entity, World};

use td_core::components::*;
use td_core::state::{EntityView, PlayerView};
use td_core::types::Position;

use crate::store::{entity_kind, entity_rect};

/// One view per displayable entity, sorted by id.
pub fn build_entities(world: &World) -> Vec<EntityView> {
    let mut views: Vec<EntityView> = world
        .query::<&Position>()
        .iter()
        .filter_map(|(entity, pos)| build_entity(world, entity, *pos))
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_entity(world: &World, entity: Entity, position: Position) -> Option<EntityView> {
    let kind = entity_kind(world, entity)?;
    let health = world.get::<&Health>(entity).ok().map(|h| *h);
    let attack = world.get::<&Attack>(entity).ok().map(|a| *a);
    Some(EntityView {
        id: entity.to_bits().get(),
        kind,
        sprite: world.get::<&Sprite>(entity).ok().map(|s| s.kind),
        position,
        rect: entity_rect(world, entity),
        health: health.map_or(0, |h| h.current),
        max_health: health.map_or(0, |h| h.max),
        cooldown: attack.map_or(0, |a| a.cooldown.display()),
        range: attack.map_or(0, |a| a.range),
        level: world.get::<&Level>(entity).map_or(0, |l| l.level),
        creep_fired: world.get::<&Bullet>(entity).map_or(false, |b| b.creep_fired),
    })
}

/// The player's wallet and base health.
pub fn build_player(world: &World, player: Option<Entity>, max_tower_level: u32) -> PlayerView {
    let Some(entity) = player else {
        return PlayerView {
            max_tower_level,
            ..Default::default()
        };
    };
    let Ok(data) = world.get::<&Player>(entity).map(|p| *p) else {
        return PlayerView::default();
    };
    let health = world
        .get::<&Health>(entity)
        .map(|h| *h)
        .unwrap_or(Health::full(0));
    PlayerView {
        money: data.money,
        score: data.score,
        dead: data.dead,
        health: health.current,
        max_health: health.max,
        creep_level: data.creep_level(),
        max_tower_level,
        tower_levels: data.tower_levels,
    }
}

/// Highest tower level currently on the board.
pub fn highest_tower_level(world: &World) -> u32 {
    world
        .query::<&Level>()
        .with::<&Tower>()
        .iter()
        .map(|(_, level)| level.level)
        .max()
        .unwrap_or(0)
}
