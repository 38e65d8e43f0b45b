//! Core types and definitions for the tower-defense simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, commands, snapshots, events, stats, config,
//! and constants. It has no dependency on the ECS or any runtime.

pub mod assets;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod geometry;
pub mod state;
pub mod stats;
pub mod types;
