//! Action planner for the computer player.
//!
//! `plan` is pure: it reads a snapshot of towers, creeps, and the wallet,
//! and returns candidate actions in priority order. The caller tries them
//! in order and stops at the first one that succeeds, so a later entry
//! is only a fallback for the ones before it.

use td_core::geometry::Rect;

use crate::lanes::{find_lane, is_occupied, lane_centers, towers_per_row};

/// Fraction of max health under which a tower counts as badly damaged.
pub const LOW_HEALTH_FRACTION: f32 = 0.25;

/// Money the computer keeps back before it starts upgrading.
pub const UPGRADE_RESERVE: i64 = 75;

/// Money needed before the computer opens a second row.
pub const SECOND_ROW_RESERVE: i64 = 150;

/// Plain-data view of one tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TowerInfo {
    /// Stable entity id.
    pub id: u64,
    pub health: i32,
    pub max_health: i32,
    pub level: u32,
    pub rect: Rect,
}

/// Plain-data view of one creep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreepInfo {
    pub rect: Rect,
}

/// Input to the planner.
#[derive(Debug, Clone, Default)]
pub struct StrategyContext {
    pub board_width: i32,
    pub board_height: i32,
    pub money: i64,
    pub max_tower_level: u32,
    /// In entity iteration order.
    pub towers: Vec<TowerInfo>,
    /// In entity iteration order.
    pub creeps: Vec<CreepInfo>,
}

/// One candidate action. Coordinates are tower centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyAction {
    PlaceTower { x: i32, y: i32 },
    Heal { tower: u64 },
    Upgrade { tower: u64 },
}

/// Build the ordered candidate list for one strategy tick.
pub fn plan(ctx: &StrategyContext) -> Vec<StrategyAction> {
    let mut actions = Vec::new();
    let lanes = lane_centers(ctx.board_width);
    let tower_rects: Vec<Rect> = ctx.towers.iter().map(|t| t.rect).collect();
    let front_row = ctx.board_height / 2;

    // Put a tower in the path of each incoming creep.
    for creep in &ctx.creeps {
        let Some(lane) = find_lane(&lanes, creep.rect.midpoint().x) else {
            continue;
        };
        let action = StrategyAction::PlaceTower {
            x: lane,
            y: front_row,
        };
        if !is_occupied(&tower_rects, lane, front_row) && !actions.contains(&action) {
            actions.push(action);
        }
    }

    // No upgrades until the first row is full.
    let allow_upgrades =
        ctx.towers.len() >= towers_per_row(ctx.board_width) && ctx.money >= UPGRADE_RESERVE;

    let weakest = lowest_health_tower(&ctx.towers);
    let lowest = lowest_level_tower(&ctx.towers);

    if let (Some(weak), Some(low)) = (weakest, lowest) {
        if weak.id == low.id {
            if allow_upgrades {
                actions.push(StrategyAction::Upgrade { tower: weak.id });
            }
            actions.push(StrategyAction::Heal { tower: weak.id });
        }
        if low.level >= weak.level + 2 || weak.level == ctx.max_tower_level {
            actions.push(StrategyAction::Heal { tower: weak.id });
        } else if allow_upgrades {
            actions.push(StrategyAction::Upgrade { tower: weak.id });
        }
    }

    if allow_upgrades {
        if let Some(low) = lowest {
            actions.push(StrategyAction::Upgrade { tower: low.id });
        }
    } else if let Some(weak) = weakest {
        actions.push(StrategyAction::Heal { tower: weak.id });
    }

    // Late game: open a second row behind the first.
    if ctx.money > SECOND_ROW_RESERVE && ctx.towers.len() >= towers_per_row(ctx.board_width) {
        let back_row = front_row + td_core::constants::TOWER_SPRITE_SIZE;
        for lane in lanes {
            if !is_occupied(&tower_rects, lane, back_row) {
                actions.push(StrategyAction::PlaceTower { x: lane, y: back_row });
            }
        }
    }

    actions.dedup();
    actions
}

/// Most damaged tower under the low-health threshold. Ties go to the last seen.
pub fn lowest_health_tower(towers: &[TowerInfo]) -> Option<TowerInfo> {
    let mut found: Option<TowerInfo> = None;
    let mut lowest = i32::MAX;
    for tower in towers {
        let fraction = tower.health as f32 / tower.max_health.max(1) as f32;
        if fraction < LOW_HEALTH_FRACTION && tower.health <= lowest {
            lowest = tower.health;
            found = Some(*tower);
        }
    }
    found
}

/// Lowest-level tower. Ties go to the first seen.
pub fn lowest_level_tower(towers: &[TowerInfo]) -> Option<TowerInfo> {
    let mut found: Option<TowerInfo> = None;
    for tower in towers {
        if found.map_or(true, |f| tower.level < f.level) {
            found = Some(*tower);
        }
    }
    found
}
