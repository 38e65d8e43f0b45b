//! Computer player adapter: bridges the ECS world to the pure planner.
//!
//! Reads towers and creeps into plain data, asks `td_strategy` for an
//! ordered plan, and executes candidates until one succeeds. The computer
//! plays silently, so cues are muted for the duration.

use hecs::{Entity, World};
use tracing::debug;

use td_core::components::{Creep, Health, Level, Player, Tower};
use td_strategy::planner::{self, CreepInfo, StrategyAction, StrategyContext, TowerInfo};

use crate::context::SimContext;
use crate::store::{entity_rect, require};
use crate::systems::economy;

/// Build the planner's view of the world.
pub fn build_context(world: &World, ctx: &SimContext, max_level: u32) -> StrategyContext {
    let towers = world
        .query::<(&Health, &Level)>()
        .with::<&Tower>()
        .iter()
        .map(|(entity, (health, level))| TowerInfo {
            id: entity.to_bits().get(),
            health: health.current,
            max_health: health.max,
            level: level.level,
            rect: entity_rect(world, entity),
        })
        .collect();
    let creeps = world
        .query::<()>()
        .with::<&Creep>()
        .iter()
        .map(|(entity, ())| CreepInfo {
            rect: entity_rect(world, entity),
        })
        .collect();

    StrategyContext {
        board_width: ctx.board.width,
        board_height: ctx.board.height,
        money: require::<Player>(world, ctx.player).money,
        max_tower_level: max_level,
        towers,
        creeps,
    }
}

/// Run one strategy step. Returns the action that succeeded, if any.
pub fn run(world: &mut World, ctx: &mut SimContext, max_level: u32) -> Option<StrategyAction> {
    let plan = planner::plan(&build_context(world, ctx, max_level));
    let was_enabled = ctx.audio.set_enabled(false);

    let mut taken = None;
    for action in plan {
        if execute(world, ctx, action, max_level) {
            taken = Some(action);
            break;
        }
    }

    ctx.audio.set_enabled(was_enabled);
    match taken {
        Some(action) => debug!(?action, "computer action"),
        None => debug!("computer idle"),
    }
    taken
}

fn execute(world: &mut World, ctx: &mut SimContext, action: StrategyAction, max_level: u32) -> bool {
    match action {
        StrategyAction::PlaceTower { x, y } => {
            matches!(economy::try_place_tower(world, ctx, x, y), Ok(Some(_)))
        }
        StrategyAction::Heal { tower } => match live_tower(world, tower) {
            Some(entity) => economy::try_heal_tower(world, ctx, entity),
            None => false,
        },
        StrategyAction::Upgrade { tower } => match live_tower(world, tower) {
            Some(entity) => economy::try_upgrade_tower(world, ctx, entity, max_level),
            None => false,
        },
    }
}

fn live_tower(world: &World, id: u64) -> Option<Entity> {
    let entity = Entity::from_bits(id)?;
    world
        .entity(entity)
        .ok()
        .filter(|e| e.has::<Tower>())
        .map(|_| entity)
}
