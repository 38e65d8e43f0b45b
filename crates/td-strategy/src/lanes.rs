//! Lane geometry for computer tower placement.
//!
//! Lanes are vertical columns, one tower wide, separated by a fixed gap.
//! The first lane hugs the left edge of the board.

use glam::IVec2;
use td_core::constants::TOWER_SPRITE_SIZE;
use td_core::geometry::Rect;

/// Horizontal gap between adjacent lanes.
pub const LANE_SPACING: i32 = 44;

/// Distance between adjacent lane centers.
pub const LANE_PITCH: i32 = TOWER_SPRITE_SIZE + LANE_SPACING;

/// Number of lanes that fit across a board of the given width. At least 1.
pub fn towers_per_row(board_width: i32) -> usize {
    ((board_width + LANE_SPACING) / LANE_PITCH).max(1) as usize
}

/// Lane center x coordinates, left to right.
pub fn lane_centers(board_width: i32) -> Vec<i32> {
    (0..towers_per_row(board_width) as i32)
        .map(|i| TOWER_SPRITE_SIZE / 2 + i * LANE_PITCH)
        .collect()
}

/// First lane whose center lies within a tower width of `x`.
pub fn find_lane(lanes: &[i32], x: i32) -> Option<i32> {
    lanes
        .iter()
        .copied()
        .find(|lane| (x - lane).abs() < TOWER_SPRITE_SIZE)
}

/// Whether any of the given tower rects already covers the slot.
pub fn is_occupied(towers: &[Rect], lane: i32, y: i32) -> bool {
    let slot = IVec2::new(lane, y);
    towers.iter().any(|r| r.contains_point(slot))
}
