//! Entity store helpers over the hecs world.
//!
//! Every archetype is built by `world_setup`, so a missing component on a
//! known archetype is a construction bug. `require` and `require_mut`
//! panic in that case instead of handing back a default.

use hecs::{Component, Entity, RefMut, World};

use td_core::components::*;
use td_core::enums::EntityKind;
use td_core::geometry::Rect;
use td_core::types::Position;

/// Copy a component that the entity's archetype guarantees.
pub fn require<T: Component + Copy>(world: &World, entity: Entity) -> T {
    match world.get::<&T>(entity) {
        Ok(component) => *component,
        Err(err) => panic!(
            "entity {entity:?} is missing required component {}: {err}",
            std::any::type_name::<T>()
        ),
    }
}

/// Mutably borrow a component that the entity's archetype guarantees.
pub fn require_mut<T: Component>(world: &World, entity: Entity) -> RefMut<'_, T> {
    match world.get::<&mut T>(entity) {
        Ok(component) => component,
        Err(err) => panic!(
            "entity {entity:?} is missing required component {}: {err}",
            std::any::type_name::<T>()
        ),
    }
}

/// Collision rectangle of a positioned entity.
pub fn entity_rect(world: &World, entity: Entity) -> Rect {
    let pos = require::<Position>(world, entity);
    let bounds = require::<Bounds>(world, entity);
    Rect::from_origin_size(pos.as_ivec2(), bounds.size)
}

/// Logical archetype, or `None` for a dead or unknown entity.
pub fn entity_kind(world: &World, entity: Entity) -> Option<EntityKind> {
    let e = world.entity(entity).ok()?;
    if e.has::<Player>() {
        Some(EntityKind::Player)
    } else if e.has::<Tower>() {
        Some(EntityKind::Tower)
    } else if e.has::<Creep>() {
        Some(EntityKind::Creep)
    } else if e.has::<Bullet>() {
        Some(EntityKind::Bullet)
    } else {
        None
    }
}

/// Snapshot the ids of every entity carrying `T`.
pub fn collect<T: Component>(world: &World) -> Vec<Entity> {
    world
        .query::<()>()
        .with::<&T>()
        .iter()
        .map(|(entity, ())| entity)
        .collect()
}

/// Snapshot the ids of every creep, tower, and bullet, in iteration order.
pub fn collect_actors(world: &World) -> Vec<Entity> {
    world
        .query::<&Position>()
        .iter()
        .map(|(entity, _)| entity)
        .filter(|&entity| {
            matches!(
                entity_kind(world, entity),
                Some(EntityKind::Creep | EntityKind::Tower | EntityKind::Bullet)
            )
        })
        .collect()
}

/// First solid entity (anything with a sprite) overlapping `rect`,
/// skipping everything in `skip`. Bullets have no sprite and never collide.
pub fn detect_collision(world: &World, rect: &Rect, skip: &[Entity]) -> Option<Entity> {
    world
        .query::<(&Position, &Bounds)>()
        .with::<&Sprite>()
        .iter()
        .find(|(entity, (pos, bounds))| {
            !skip.contains(entity)
                && rect.overlaps(&Rect::from_origin_size(pos.as_ivec2(), bounds.size))
        })
        .map(|(entity, _)| entity)
}

/// Every creep overlapping `rect` other than `exclude`.
pub fn overlapping_creeps(world: &World, rect: &Rect, exclude: Option<Entity>) -> Vec<Entity> {
    world
        .query::<(&Position, &Bounds)>()
        .with::<&Creep>()
        .iter()
        .filter(|(entity, (pos, bounds))| {
            Some(*entity) != exclude
                && rect.overlaps(&Rect::from_origin_size(pos.as_ivec2(), bounds.size))
        })
        .map(|(entity, _)| entity)
        .collect()
}
