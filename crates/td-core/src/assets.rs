//! Asset boundary: sprite bounds used for collision sizing.
//!
//! Image decoding and audio playback live outside the simulation. The
//! engine only needs to know how large each sprite is.

use glam::IVec2;

use crate::constants::*;
use crate::enums::SpriteKind;

/// Source of sprite dimensions.
pub trait AssetCatalog {
    /// Pixel size of a sprite on a board of the given width.
    fn sprite_size(&self, kind: SpriteKind, board_width: i32) -> IVec2;
}

/// Built-in sizes matching the shipped art.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAssets;

impl AssetCatalog for DefaultAssets {
    fn sprite_size(&self, kind: SpriteKind, board_width: i32) -> IVec2 {
        match kind {
            SpriteKind::Base => IVec2::new(board_width, BASE_HEIGHT),
            SpriteKind::Tower => IVec2::splat(TOWER_SPRITE_SIZE),
            SpriteKind::Creep1 | SpriteKind::Creep2 | SpriteKind::Creep3 => {
                IVec2::splat(CREEP_SPRITE_SIZE)
            }
            SpriteKind::BigCreep => IVec2::splat(BIG_CREEP_SPRITE_SIZE),
            SpriteKind::SuperCreep => IVec2::splat(SUPER_CREEP_SPRITE_SIZE),
        }
    }
}
