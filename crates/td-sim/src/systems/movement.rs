//! Creep movement and collision resolution.
//!
//! A creep tries to advance by its velocity each simulation pass. Solid
//! entities (anything with a sprite) block it. Another creep in the way
//! triggers a short sideways nudge before retrying; the base lets the creep
//! close the remaining gap so contact can be detected as a breach. Creeps
//! that already overlap the mover never block it, so stacked creeps drift
//! apart instead of locking each other in place.

use glam::IVec2;
use hecs::{Entity, World};

use td_core::constants::{MAX_NUDGE_ATTEMPTS, NUDGE_STEP};
use td_core::enums::EntityKind;
use td_core::geometry::{clamp_i32, Rect};
use td_core::state::Board;
use td_core::types::{Position, Velocity};

use crate::store::{
    detect_collision, entity_kind, entity_rect, overlapping_creeps, require, require_mut,
};

/// What stopped a creep this pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Moved,
    /// Stopped against the base, flush with its top edge.
    ReachedBase,
    Blocked,
}

/// Advance one creep. Updates its position and `Velocity::blocked`.
pub fn step_creep(world: &mut World, board: &Board, creep: Entity) -> MoveResult {
    let velocity = require::<Velocity>(world, creep);
    let step = velocity.as_ivec2();
    let mut rect = entity_rect(world, creep);
    let mut skip = overlapping_creeps(world, &rect, Some(creep));
    skip.push(creep);
    let mut nudges = 0;

    let result = loop {
        let candidate = rect.translate(step);
        let Some(obstacle) = detect_collision(world, &candidate, &skip) else {
            rect = candidate;
            break MoveResult::Moved;
        };

        match entity_kind(world, obstacle) {
            Some(EntityKind::Creep) => {
                if nudges >= MAX_NUDGE_ATTEMPTS {
                    break MoveResult::Blocked;
                }
                nudges += 1;
                let Some(nudged) = nudge(&rect, &entity_rect(world, obstacle), board) else {
                    break MoveResult::Blocked;
                };
                if detect_collision(world, &nudged, &skip).is_some() {
                    break MoveResult::Blocked;
                }
                rect = nudged;
            }
            Some(EntityKind::Player) => {
                let gap = entity_rect(world, obstacle).min.y - rect.max.y;
                if gap > 0 {
                    rect = rect.translate(IVec2::new(0, gap.min(step.y)));
                }
                break MoveResult::ReachedBase;
            }
            _ => break MoveResult::Blocked,
        }
    };

    *require_mut::<Position>(world, creep) = Position::from(rect.min);
    require_mut::<Velocity>(world, creep).blocked = result != MoveResult::Moved;
    result
}

/// Sideways step away from an obstacle, clamped to the board.
/// `None` when the mover is not clear of either obstacle edge or cannot move.
fn nudge(mover: &Rect, obstacle: &Rect, board: &Board) -> Option<Rect> {
    let max_x = board.width - mover.width();
    let x = if mover.min.x < obstacle.min.x {
        clamp_i32(mover.min.x - NUDGE_STEP, 0, max_x)
    } else if mover.max.x > obstacle.max.x {
        clamp_i32(mover.min.x + NUDGE_STEP, 0, max_x)
    } else {
        return None;
    };
    if x == mover.min.x {
        return None;
    }
    Some(mover.translate(IVec2::new(x - mover.min.x, 0)))
}
