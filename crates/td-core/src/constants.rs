//! Simulation constants and tuning parameters.

/// Engine ticks per second. Input and rendering run at this rate.
pub const ENGINE_TPS: u32 = 60;

// --- Board ---

/// Default board width in pixels.
pub const DEFAULT_BOARD_WIDTH: i32 = 600;

/// Default board height in pixels.
pub const DEFAULT_BOARD_HEIGHT: i32 = 800;

/// Height of the base strip along the bottom of the board.
pub const BASE_HEIGHT: i32 = 45;

/// Margin kept between spawned creeps and the board edges.
pub const SPAWN_BORDER: i32 = 20;

// --- Simulation speed ---

/// Maximum configured simulation speed. Speed 0 pauses simulation.
pub const MAX_SIM_SPEED: u32 = 60;

/// Runtime adjustment step for the simulation speed.
pub const SIM_SPEED_STEP: u32 = 5;

// --- Sprites ---

/// Tower sprite edge length.
pub const TOWER_SPRITE_SIZE: i32 = 48;

/// Small creep sprite edge length.
pub const CREEP_SPRITE_SIZE: i32 = 32;

/// Big creep sprite edge length.
pub const BIG_CREEP_SPRITE_SIZE: i32 = 44;

/// Super creep sprite edge length.
pub const SUPER_CREEP_SPRITE_SIZE: i32 = 60;

/// Bullet edge length when fired by a tower or the base.
pub const DEFENDER_BULLET_SIZE: i32 = 4;

/// Bullet edge length when fired by a creep.
pub const CREEP_BULLET_SIZE: i32 = 3;

// --- Player / base ---

pub const PLAYER_START_MONEY: i64 = 500;
pub const PLAYER_MAX_HEALTH: i32 = 100;
pub const PLAYER_ATTACK_POWER: i32 = 1;
pub const PLAYER_ATTACK_RANGE: i32 = 15;
pub const PLAYER_ATTACK_COOLDOWN: i32 = 10;

// --- Towers ---

/// Money needed to build a tower.
pub const TOWER_COST: i64 = 50;

/// Money needed to upgrade a tower by one level.
pub const TOWER_UPGRADE_COST: i64 = 50;

/// Money needed to refill a tower's health.
pub const TOWER_HEAL_COST: i64 = 25;

pub const TOWER_MAX_HEALTH: i32 = 20;
pub const TOWER_ATTACK_POWER: i32 = 2;
pub const TOWER_ATTACK_RANGE: i32 = 60;
pub const TOWER_ATTACK_COOLDOWN: i32 = 24;

/// Health a tower spends per shot fired.
pub const TOWER_SHOT_HEALTH_COST: i32 = 1;

/// Max health gained per upgrade.
pub const TOWER_UPGRADE_HEALTH: i32 = 5;

/// Range gained per upgrade.
pub const TOWER_UPGRADE_RANGE: i32 = 3;

/// Cooldown removed per upgrade.
pub const TOWER_UPGRADE_COOLDOWN: i32 = 3;

/// Cooldown floor reachable through upgrades.
pub const TOWER_MIN_COOLDOWN: i32 = 3;

/// Max tower level before any lifetime upgrades.
pub const TOWER_BASE_MAX_LEVEL: u32 = 8;

/// Lifetime upgrades required to unlock one more max level.
pub const UPGRADES_PER_MAX_LEVEL: u64 = 20;

// --- Creeps ---

/// Chance a spawned creep is the big variant.
pub const BIG_CREEP_CHANCE: f64 = 0.3;

/// Player tower levels per creep level.
pub const TOWER_LEVELS_PER_CREEP_LEVEL: u32 = 5;

/// Creep levels per extra spawner difficulty step.
pub const CREEP_LEVELS_PER_DIFFICULTY_STEP: u32 = 10;

pub const SUPER_CREEP_BASE_HEALTH: i32 = 30;
pub const SUPER_CREEP_HEALTH_PER_LEVEL: i32 = 3;
pub const SUPER_CREEP_POWER: i32 = 8;
pub const SUPER_CREEP_RANGE: i32 = 40;
pub const SUPER_CREEP_COOLDOWN: i32 = 10;
pub const SUPER_CREEP_SPEED: i32 = 2;
pub const SUPER_CREEP_SCORE: i64 = 100;

/// Simulation ticks between super creep injections.
pub const SUPER_CREEP_INJECT_COOLDOWN: i32 = 300;

/// Money spent to send a super creep to the peer board.
pub const SUPER_CREEP_SEND_COST: i64 = 100;

// --- Movement ---

/// Sideways step taken when a creep is blocked by another creep.
pub const NUDGE_STEP: i32 = 3;

/// Maximum sideways nudges per creep per tick.
pub const MAX_NUDGE_ATTEMPTS: u32 = 10;

// --- Bullets ---

/// Pixels a bullet travels per simulation tick.
pub const BULLET_SPEED: i32 = 8;

/// Intersection padding for bullet hits.
pub const BULLET_RANGE: i32 = 1;

pub const BULLET_COOLDOWN: i32 = 30;

/// Fraction of a tick subtracted from the lead time.
pub const BULLET_LEAD_OFFSET: f64 = 0.5;

// --- Wave spawning ---

/// Spawn threshold at creep level 1 (simulation ticks).
pub const MAX_CREEP_TIMER: i32 = 90;

/// Lowest spawn threshold reachable at high difficulty.
pub const MIN_CREEP_TIMER: i32 = 30;

/// Timer value at battle start, so the first wave comes early.
pub const START_CREEP_TIMER: i32 = 60;

/// Threshold reduction per difficulty level.
pub const CREEP_TIMER_STEP: i32 = 3;

/// Difficulty levels per extra timer increment.
pub const DIFFICULTY_PER_TIMER_INCREMENT: u32 = 4;

/// Live creeps at which waves stop spawning.
pub const MAX_LIVE_CREEPS: usize = 30;

/// Wave size table: (count, probability threshold), largest first.
pub const WAVE_SIZE_TABLE: [(u32, f64); 4] = [(5, 0.2), (4, 0.4), (3, 0.6), (2, 0.8)];

/// Roll bias per difficulty level toward bigger waves.
pub const WAVE_LEVEL_BUMP: f64 = 0.02;

/// Cap on the roll bias.
pub const WAVE_LEVEL_BUMP_MAX: f64 = 0.5;

/// Money paid to the player per creep in a spawned wave.
pub const WAVE_BONUS_PER_CREEP: i64 = 2;

// --- Computer player ---

/// Engine ticks between strategy actions, indexed by computer level 1..=5.
pub const COMPUTER_TICK_DIVISORS: [u32; 5] = [60, 30, 15, 8, 4];

pub const DEFAULT_COMPUTER_LEVEL: u32 = 3;

// --- Replication ---

/// Snapshot publish rate toward a remote mirror.
pub const REPLICATION_HZ: u32 = 16;
