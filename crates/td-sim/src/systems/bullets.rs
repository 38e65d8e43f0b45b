//! Bullet launch and flight.
//!
//! Bullets fly a fixed straight line from the firer's midpoint toward an
//! aim point and are never re-aimed. The aim point may lead a moving
//! target by its vertical velocity over the expected flight time.

use glam::IVec2;
use hecs::{Entity, World};

use td_core::components::{Attack, Bullet, Creep};
use td_core::constants::{BULLET_LEAD_OFFSET, BULLET_SPEED};
use td_core::enums::EntityKind;
use td_core::events::SoundCue;
use td_core::geometry::{distance_points, step_along};
use td_core::stats::Stat;
use td_core::types::{Position, Velocity};

use crate::context::SimContext;
use crate::store::{entity_rect, require, require_mut};
use crate::systems::combat::{self, CombatOutcome, CREEP_ENEMIES, DEFENDER_ENEMIES};
use crate::world_setup;

/// Aim point for a bullet from `start` at a target currently at `end`
/// moving with `velocity`. A target above the firer is never led to a
/// point below the firer.
pub fn lead_target(start: IVec2, end: IVec2, velocity: Option<Velocity>, speed: i32) -> IVec2 {
    let Some(velocity) = velocity.filter(|v| !v.blocked) else {
        return end;
    };
    let lead = distance_points(start, end) / speed as f64 - BULLET_LEAD_OFFSET;
    let mut led_y = end.y + (velocity.y as f64 * lead) as i32;
    if end.y < start.y {
        led_y = led_y.min(start.y);
    }
    IVec2::new(end.x, led_y)
}

/// Spawn a bullet from `firer` at `target` carrying the firer's power.
pub fn launch(
    world: &mut World,
    ctx: &mut SimContext,
    firer: Entity,
    attack: &Attack,
    target: Entity,
) -> Entity {
    let start = entity_rect(world, firer).midpoint();
    let mut end = entity_rect(world, target).midpoint();
    if !attack.no_lead {
        let velocity = world.get::<&Velocity>(target).ok().map(|v| *v);
        end = lead_target(start, end, velocity, BULLET_SPEED);
    }
    let creep_fired = world.get::<&Creep>(firer).is_ok();

    ctx.audio.play(SoundCue::Shoot);
    world_setup::spawn_bullet(world, start, end, BULLET_SPEED, attack.power, creep_fired)
}

/// Advance one bullet: expire it off-board, otherwise resolve a hit at its
/// current position and then move it along its line.
pub fn step_bullet(world: &mut World, ctx: &mut SimContext, bullet: Entity) -> CombatOutcome {
    let flight = require::<Bullet>(world, bullet);
    let pos = require::<Position>(world, bullet).as_ivec2();
    let next = pos + step_along(flight.start, flight.end, flight.speed);

    if next.x < 0 || next.x > ctx.board.width || next.y < 0 || next.y > ctx.board.height {
        let _ = world.despawn(bullet);
        ctx.stats.incr(Stat::BulletsExpired);
        return CombatOutcome::Missed;
    }

    let enemies: &[_] = if flight.creep_fired {
        &CREEP_ENEMIES
    } else {
        &DEFENDER_ENEMIES
    };
    let outcome = combat::resolve_intersect(world, ctx, bullet, enemies);

    match outcome {
        CombatOutcome::Missed => {
            *require_mut::<Position>(world, bullet) = Position::from(next);
        }
        CombatOutcome::Hit { .. } => {
            let _ = world.despawn(bullet);
        }
        CombatOutcome::Killed { kind, reward, .. } => {
            let _ = world.despawn(bullet);
            match kind {
                EntityKind::Creep => combat::reward_kill(world, ctx, reward),
                EntityKind::Tower => ctx.stats.incr(Stat::TowersKilled),
                _ => {}
            }
        }
    }
    outcome
}
