//! End-of-battle checks and world teardown.

use hecs::{Entity, World};

use td_core::components::{Bullet, Creep, Health, Player, Tower};

use crate::store::{entity_rect, require_mut};

/// Flag the player dead once base health is gone. Health is clamped at 0.
pub fn check_player_death(world: &mut World, player: Entity) -> bool {
    let mut health = require_mut::<Health>(world, player);
    if health.current > 0 {
        return false;
    }
    health.current = 0;
    drop(health);
    require_mut::<Player>(world, player).dead = true;
    true
}

/// Whether any creep's bottom edge has reached the base's top edge.
pub fn check_breach(world: &World, player: Entity) -> bool {
    let base_top = entity_rect(world, player).min.y;
    world
        .query::<()>()
        .with::<&Creep>()
        .iter()
        .any(|(entity, ())| entity_rect(world, entity).max.y >= base_top)
}

/// Remove every battle entity. Uses a caller-owned buffer to avoid
/// allocating on each reset.
pub fn clear_battle(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, ()) in world.query_mut::<()>().with::<&Creep>() {
        despawn_buffer.push(entity);
    }
    for (entity, ()) in world.query_mut::<()>().with::<&Tower>() {
        despawn_buffer.push(entity);
    }
    for (entity, ()) in world.query_mut::<()>().with::<&Bullet>() {
        despawn_buffer.push(entity);
    }
    for (entity, ()) in world.query_mut::<()>().with::<&Player>() {
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
