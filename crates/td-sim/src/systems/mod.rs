//! ECS systems that operate on the battle world each simulation pass.
//!
//! Systems are free functions that take `&mut World` (or `&World` for
//! read-only) plus the `SimContext`. They own no state beyond what the
//! engine hands them.

pub mod bullets;
pub mod cleanup;
pub mod combat;
pub mod economy;
pub mod movement;
pub mod snapshot;
pub mod strategy;
pub mod wave_spawner;
