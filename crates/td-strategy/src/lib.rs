//! Computer player for the tower-defense simulation.
//!
//! Rule-based placement, heal, and upgrade policy. Operates on a
//! plain-data view of the board and returns an ordered list of
//! candidate actions. No ECS dependency.

pub mod lanes;
pub mod planner;

pub use td_core as core;

#[cfg(test)]
mod tests;
