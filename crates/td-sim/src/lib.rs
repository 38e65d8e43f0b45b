//! Simulation engine for the tower defense battle.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces BattleSnapshots for the frontend.

pub mod context;
pub mod engine;
pub mod store;
pub mod systems;
pub mod world_setup;

pub use engine::BattleEngine;
pub use td_core as core;
