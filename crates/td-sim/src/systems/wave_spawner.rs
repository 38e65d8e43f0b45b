//! Wave spawning system and difficulty curve.
//!
//! A timer accumulates every simulation pass, faster at higher difficulty,
//! and spawns a wave when it reaches a threshold that shrinks as difficulty
//! rises. Wave size is rolled against a table biased toward larger waves
//! at higher difficulty.

use glam::IVec2;
use hecs::World;
use rand::Rng;
use tracing::debug;

use td_core::components::{CooldownTimer, Creep, Player};
use td_core::constants::*;
use td_core::geometry::clamp_i32;
use td_core::stats::Stat;

use crate::context::SimContext;
use crate::store::{overlapping_creeps, require, require_mut};
use crate::world_setup;

/// Per-battle spawn state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveSpawner {
    /// Accumulated spawn progress.
    pub timer: i32,
    /// Gate on super creep injections.
    pub super_cooldown: CooldownTimer,
}

impl Default for WaveSpawner {
    fn default() -> Self {
        Self {
            timer: START_CREEP_TIMER,
            super_cooldown: CooldownTimer::new(SUPER_CREEP_INJECT_COOLDOWN),
        }
    }
}

/// Spawner difficulty: creep level plus one extra step per ten levels.
/// The extra steps speed up waves without raising creep stats.
pub fn difficulty(creep_level: u32) -> u32 {
    creep_level + creep_level / CREEP_LEVELS_PER_DIFFICULTY_STEP
}

/// Timer gain per simulation pass.
pub fn timer_increment(difficulty: u32) -> i32 {
    1 + (difficulty.saturating_sub(1) / DIFFICULTY_PER_TIMER_INCREMENT) as i32
}

/// Timer value at which a wave spawns.
pub fn spawn_threshold(difficulty: u32) -> i32 {
    (MAX_CREEP_TIMER - CREEP_TIMER_STEP * difficulty.saturating_sub(1) as i32).max(MIN_CREEP_TIMER)
}

/// Wave size for a uniform roll in `[0, 1)`.
pub fn wave_size(roll: f64, difficulty: u32) -> u32 {
    let bump = (WAVE_LEVEL_BUMP * difficulty.saturating_sub(1) as f64).min(WAVE_LEVEL_BUMP_MAX);
    let biased = roll - bump;
    WAVE_SIZE_TABLE
        .iter()
        .find(|(_, chance)| biased < *chance)
        .map(|(count, _)| *count)
        .unwrap_or(1)
}

/// Advance the spawn timer and spawn a wave when due.
pub fn run(world: &mut World, ctx: &mut SimContext, spawner: &mut WaveSpawner) {
    spawner.super_cooldown.check();
    spawner.super_cooldown.advance();

    let creep_level = require::<Player>(world, ctx.player).creep_level();
    let difficulty = difficulty(creep_level);
    let threshold = spawn_threshold(difficulty);

    spawner.timer = (spawner.timer + timer_increment(difficulty)).min(threshold);
    if spawner.timer < threshold {
        return;
    }

    let live = world.query::<&Creep>().iter().count();
    if live >= MAX_LIVE_CREEPS {
        return;
    }

    spawn_wave(world, ctx, creep_level, difficulty);
    spawner.timer = 0;
}

/// Spawn one wave spread across the board width. Returns the creep count.
pub fn spawn_wave(
    world: &mut World,
    ctx: &mut SimContext,
    creep_level: u32,
    difficulty: u32,
) -> u32 {
    let count = wave_size(ctx.rng.gen::<f64>(), difficulty);
    let width = ctx.board.width;
    let slot = (width / count as i32).max(1);
    // Right edge of the previous creep; slots fill left to right.
    let mut min_x = 0;

    for i in 0..count as i32 {
        let (variant, sprite) = world_setup::roll_creep_variant(ctx.rng);
        let size = ctx.assets.sprite_size(sprite, width);
        let x = (ctx.rng.gen_range(0..slot) + i * slot).max(min_x);
        let x = clamp_i32(x, SPAWN_BORDER, width - SPAWN_BORDER - size.x);
        min_x = x + size.x;
        world_setup::spawn_creep(
            world,
            ctx.assets,
            IVec2::new(x, SPAWN_BORDER),
            variant,
            sprite,
            creep_level,
        );
    }

    require_mut::<Player>(world, ctx.player).money += WAVE_BONUS_PER_CREEP * count as i64;
    ctx.stats.add(Stat::CreepsSpawned, count as u64);
    ctx.stats.incr(Stat::CreepWaves);
    debug!(count, creep_level, difficulty, "wave spawned");
    count
}

/// Drop a super creep in at the top of the board if its gate allows and
/// no creep is standing on its entry point.
pub fn inject_super_creep(world: &mut World, ctx: &mut SimContext, spawner: &mut WaveSpawner) -> bool {
    spawner.super_cooldown.check();
    if !spawner.super_cooldown.is_ready() {
        return false;
    }
    let entry = world_setup::super_creep_rect(&ctx.board, ctx.assets);
    if !overlapping_creeps(world, &entry, None).is_empty() {
        debug!("super creep entry blocked, holding");
        return false;
    }
    let creep_level = require::<Player>(world, ctx.player).creep_level();
    let creep = world_setup::spawn_super_creep(world, &ctx.board, ctx.assets, creep_level);
    spawner.super_cooldown.start();
    ctx.stats.incr(Stat::SuperCreepsSpawned);
    ctx.stats.incr(Stat::CreepsSpawned);
    debug!(?creep, creep_level, "super creep injected");
    true
}
