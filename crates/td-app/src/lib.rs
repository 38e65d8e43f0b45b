//! Tower defense application layer.
//!
//! This crate wires the battle engine to a game loop thread, replicates
//! its state to a read-only mirror, and persists lifetime statistics.

pub mod control;
pub mod game_loop;
pub mod persistence;
pub mod replication;
pub mod state;

pub use td_core as core;
