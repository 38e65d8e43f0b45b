//! Battle engine: the core of the game.
//!
//! `BattleEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `BattleSnapshot`s. Completely headless,
//! enabling deterministic testing.
//!
//! Each engine tick (60 per second) handles input. Simulation passes are
//! gated by the configured speed, so combat pacing is independent of the
//! frontend's frame rate.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use td_core::assets::{AssetCatalog, DefaultAssets};
use td_core::commands::PlayerCommand;
use td_core::components::{Health, Player};
use td_core::config::GameConfig;
use td_core::constants::{ENGINE_TPS, SUPER_CREEP_SEND_COST};
use td_core::enums::{EntityKind, GamePhase};
use td_core::error::PlacementError;
use td_core::events::{PeerEvent, SoundCue};
use td_core::state::{BattleSnapshot, BattleState, Board, HighMarks, ToggleView};
use td_core::stats::{GameStats, Stat};
use td_core::types::SimTime;

use crate::context::{AudioQueue, SimContext};
use crate::store::{self, require};
use crate::systems;
use crate::systems::wave_spawner::WaveSpawner;
use crate::world_setup;

/// The battle engine. Owns the ECS world and all battle state.
pub struct BattleEngine {
    world: World,
    config: GameConfig,
    assets: Box<dyn AssetCatalog + Send>,
    board: Board,
    phase: GamePhase,
    battle: BattleState,
    time: SimTime,
    rng: ChaCha8Rng,
    player: Option<Entity>,
    spawner: WaveSpawner,
    /// Engine ticks since the last simulation pass.
    tick_counter: u32,
    /// Engine ticks since the last computer action.
    strategy_counter: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    audio: AudioQueue,
    session: GameStats,
    lifetime: GameStats,
    highs: HighMarks,
    finished_sessions: Vec<GameStats>,
    outbound: Vec<PeerEvent>,
    /// Super creeps requested by the peer, waiting on the spawn gate.
    pending_super_creeps: u32,
}

impl BattleEngine {
    /// Create an engine on the title screen with the built-in sprite sizes.
    pub fn new(config: GameConfig, lifetime: GameStats) -> Self {
        Self::with_assets(config, lifetime, Box::new(DefaultAssets))
    }

    /// Create an engine with a custom asset catalog.
    pub fn with_assets(
        config: GameConfig,
        lifetime: GameStats,
        assets: Box<dyn AssetCatalog + Send>,
    ) -> Self {
        let config = config.sanitized();
        Self {
            world: World::new(),
            board: Board::new(config.width, config.height),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            audio: AudioQueue::new(config.sound),
            assets,
            phase: GamePhase::Title,
            battle: BattleState::default(),
            time: SimTime::default(),
            player: None,
            spawner: WaveSpawner::default(),
            tick_counter: 0,
            strategy_counter: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            session: GameStats::default(),
            lifetime,
            highs: HighMarks::default(),
            finished_sessions: Vec::new(),
            outbound: Vec::new(),
            pending_super_creeps: 0,
            config,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Accept an event from the remote peer.
    pub fn receive_peer_event(&mut self, event: PeerEvent) {
        match event {
            PeerEvent::SpawnSuperCreep => {
                if self.player.is_some() {
                    self.pending_super_creeps += 1;
                }
            }
        }
    }

    /// Advance one engine tick and return the resulting snapshot.
    pub fn tick(&mut self) -> BattleSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Running {
            if self.config.computer {
                self.strategy_counter += 1;
                if self.strategy_counter >= self.config.computer_tick_divisor() {
                    self.strategy_counter = 0;
                    self.run_strategy();
                }
            }

            let gate = ENGINE_TPS as f64 / self.config.speed.max(1) as f64;
            if self.config.speed != 0 && self.tick_counter as f64 > gate {
                self.tick_counter = 0;
                self.step_simulation();
            } else {
                self.tick_counter += 1;
            }

            self.time.tick += 1;
            self.update_highs();
        }

        self.snapshot()
    }

    /// Run one gated simulation pass immediately.
    ///
    /// Order: peer injections, the base's own attack, then every creep,
    /// tower, and bullet snapshotted at the start of the pass, then the
    /// death and breach checks, then the wave timer.
    pub fn step_simulation(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        let Some(player) = self.player else {
            return;
        };
        self.time.sim_ticks += 1;

        let mut ctx = SimContext {
            board: self.board,
            player,
            stats: &mut self.session,
            audio: &mut self.audio,
            rng: &mut self.rng,
            assets: self.assets.as_ref(),
        };
        let world = &mut self.world;

        // 1. Super creeps from the peer
        while self.pending_super_creeps > 0
            && systems::wave_spawner::inject_super_creep(world, &mut ctx, &mut self.spawner)
        {
            self.pending_super_creeps -= 1;
        }

        // 2. The base's own shot
        systems::combat::player_attack(world, &mut ctx);

        // 3. Entity pass over a snapshot of ids
        for entity in store::collect_actors(world) {
            match store::entity_kind(world, entity) {
                Some(EntityKind::Creep) => {
                    systems::movement::step_creep(world, &ctx.board, entity);
                    systems::combat::creep_attack(world, &mut ctx, entity);
                }
                Some(EntityKind::Tower) => systems::combat::tower_attack(world, &mut ctx, entity),
                Some(EntityKind::Bullet) => {
                    systems::bullets::step_bullet(world, &mut ctx, entity);
                }
                // Removed earlier in this pass.
                _ => {}
            }
        }

        // 4. End-of-battle checks
        let killed = systems::cleanup::check_player_death(world, player);
        let breached = !killed && systems::cleanup::check_breach(world, player);
        if breached {
            store::require_mut::<Player>(world, player).dead = true;
        }

        // 5. Wave timer
        if !killed && !breached {
            systems::wave_spawner::run(world, &mut ctx, &mut self.spawner);
        }

        if killed || breached {
            self.end_battle(if killed { "base destroyed" } else { "base breached" });
        }
    }

    /// Place a tower centered on the cursor. `Ok(false)` when unaffordable.
    pub fn try_place_tower(&mut self, x: i32, y: i32) -> Result<bool, PlacementError> {
        let Some(player) = self.player.filter(|_| self.phase == GamePhase::Running) else {
            return Err(PlacementError::NoBattle);
        };
        let mut ctx = SimContext {
            board: self.board,
            player,
            stats: &mut self.session,
            audio: &mut self.audio,
            rng: &mut self.rng,
            assets: self.assets.as_ref(),
        };
        systems::economy::try_place_tower(&mut self.world, &mut ctx, x, y).map(|t| t.is_some())
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn battle_state(&self) -> BattleState {
        self.battle
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> Board {
        self.board
    }

    /// The player's base entity while a battle exists.
    pub fn player_entity(&self) -> Option<Entity> {
        self.player
    }

    /// Current base health, for quick checks by embedders.
    pub fn player_health(&self) -> Option<Health> {
        let player = self.player?;
        self.world.get::<&Health>(player).ok().map(|h| *h)
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the ECS world, for embedding and scenario setup.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn session_stats(&self) -> &GameStats {
        &self.session
    }

    pub fn lifetime_stats(&self) -> &GameStats {
        &self.lifetime
    }

    /// Tower level cap from lifetime plus this session's upgrades.
    pub fn max_tower_level(&self) -> u32 {
        systems::economy::max_tower_level(
            self.lifetime.get(Stat::TowerUpgrades) + self.session.get(Stat::TowerUpgrades),
        )
    }

    /// Sessions finished since the last call, for merging into persisted stats.
    pub fn take_finished_sessions(&mut self) -> Vec<GameStats> {
        std::mem::take(&mut self.finished_sessions)
    }

    /// Events to deliver to the remote peer.
    pub fn drain_outbound(&mut self) -> Vec<PeerEvent> {
        std::mem::take(&mut self.outbound)
    }

    /// Finish the current session, if any, ahead of shutdown.
    pub fn shutdown(&mut self) {
        if self.player.is_some() {
            self.finish_session();
        }
    }

    /// Build a snapshot of the current state, draining queued sound cues.
    pub fn snapshot(&mut self) -> BattleSnapshot {
        BattleSnapshot {
            time: self.time,
            phase: self.phase,
            battle: self.battle,
            board: self.board,
            speed: self.config.speed,
            toggles: ToggleView {
                debug: self.config.debug,
                grid_lines: self.config.grid_lines,
                show_stats: self.config.show_stats,
                sound: self.config.sound,
                computer: self.config.computer,
            },
            player: systems::snapshot::build_player(
                &self.world,
                self.player,
                self.max_tower_level(),
            ),
            entities: systems::snapshot::build_entities(&self.world),
            session_stats: self.session.clone(),
            highs: self.highs,
            sounds: self.audio.drain(),
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        if !command.is_meta() && self.phase != GamePhase::Running {
            return;
        }
        match command {
            PlayerCommand::StartBattle => {
                if self.phase == GamePhase::Title {
                    self.start_battle();
                }
            }
            PlayerCommand::TogglePause => match self.phase {
                GamePhase::Running => {
                    self.phase = GamePhase::Paused;
                    self.battle.paused = true;
                }
                GamePhase::Paused => {
                    self.phase = GamePhase::Running;
                    self.battle.paused = false;
                }
                GamePhase::Title | GamePhase::GameOver => {}
            },
            PlayerCommand::Reset => {
                if self.phase != GamePhase::Title {
                    self.finish_session();
                    self.start_battle();
                }
            }
            PlayerCommand::ReturnToTitle => {
                if self.phase != GamePhase::Title {
                    self.finish_session();
                    systems::cleanup::clear_battle(&mut self.world, &mut self.despawn_buffer);
                    self.player = None;
                    self.battle = BattleState::default();
                    self.phase = GamePhase::Title;
                    info!("returned to title");
                }
            }
            PlayerCommand::SpeedUp => self.config.speed_up(),
            PlayerCommand::SpeedDown => self.config.speed_down(),
            PlayerCommand::ToggleDebug => self.config.debug = !self.config.debug,
            PlayerCommand::ToggleGridLines => self.config.grid_lines = !self.config.grid_lines,
            PlayerCommand::ToggleStats => self.config.show_stats = !self.config.show_stats,
            PlayerCommand::ToggleSound => {
                self.config.sound = !self.config.sound;
                self.audio.set_enabled(self.config.sound);
            }
            PlayerCommand::PlaceTower { x, y } => {
                if self.config.computer {
                    return;
                }
                if let Err(err) = self.try_place_tower(x, y) {
                    debug!(%err, "placement rejected");
                }
            }
            PlayerCommand::HealTower { x, y } => {
                if !self.config.computer {
                    self.with_tower_at(x, y, |world, ctx, tower, _| {
                        systems::economy::try_heal_tower(world, ctx, tower);
                    });
                }
            }
            PlayerCommand::UpgradeTower { x, y } => {
                if !self.config.computer {
                    self.with_tower_at(x, y, |world, ctx, tower, max_level| {
                        systems::economy::try_upgrade_tower(world, ctx, tower, max_level);
                    });
                }
            }
            PlayerCommand::SendSuperCreep => self.send_super_creep(),
        }
    }

    /// Run `action` on the tower under the cursor, if there is one.
    fn with_tower_at(
        &mut self,
        x: i32,
        y: i32,
        action: impl FnOnce(&mut World, &mut SimContext<'_>, Entity, u32),
    ) {
        let Some(player) = self.player else {
            return;
        };
        let Some(tower) = systems::economy::find_tower_at(&self.world, x, y) else {
            debug!(x, y, "no tower under cursor");
            return;
        };
        let max_level = self.max_tower_level();
        let mut ctx = SimContext {
            board: self.board,
            player,
            stats: &mut self.session,
            audio: &mut self.audio,
            rng: &mut self.rng,
            assets: self.assets.as_ref(),
        };
        action(&mut self.world, &mut ctx, tower, max_level);
    }

    fn run_strategy(&mut self) {
        let Some(player) = self.player else {
            return;
        };
        let max_level = self.max_tower_level();
        let mut ctx = SimContext {
            board: self.board,
            player,
            stats: &mut self.session,
            audio: &mut self.audio,
            rng: &mut self.rng,
            assets: self.assets.as_ref(),
        };
        systems::strategy::run(&mut self.world, &mut ctx, max_level);
    }

    fn send_super_creep(&mut self) {
        let Some(player) = self.player else {
            return;
        };
        let mut data = store::require_mut::<Player>(&self.world, player);
        if data.money < SUPER_CREEP_SEND_COST {
            drop(data);
            self.audio.play(SoundCue::Invalid2);
            return;
        }
        data.money -= SUPER_CREEP_SEND_COST;
        drop(data);
        self.outbound.push(PeerEvent::SpawnSuperCreep);
        self.session.incr(Stat::SuperCreepsSent);
        info!("super creep sent to peer");
    }

    /// Tear down any existing battle and set up a fresh one.
    fn start_battle(&mut self) {
        systems::cleanup::clear_battle(&mut self.world, &mut self.despawn_buffer);
        let player = world_setup::spawn_player(
            &mut self.world,
            &self.board,
            self.assets.as_ref(),
            self.config.starting_level,
        );
        self.player = Some(player);
        self.spawner = WaveSpawner::default();
        self.battle = BattleState::default();
        self.time = SimTime::default();
        self.highs = HighMarks::default();
        self.tick_counter = 0;
        self.strategy_counter = 0;
        self.pending_super_creeps = 0;
        self.phase = GamePhase::Running;
        info!(
            width = self.board.width,
            height = self.board.height,
            starting_level = self.config.starting_level,
            "battle started"
        );
    }

    fn end_battle(&mut self, reason: &str) {
        self.battle.game_over = true;
        self.phase = GamePhase::GameOver;
        self.session.incr(Stat::PlayerDeaths);
        self.audio.play(SoundCue::Killed);
        self.update_highs();
        info!(reason, score = self.highs.score, "game over");
    }

    /// Record the session's time and highs, fold it into the lifetime
    /// aggregate, and queue it for persistence.
    fn finish_session(&mut self) {
        self.update_highs();
        let mut session = std::mem::take(&mut self.session);
        session.game_time_secs = self.time.elapsed_secs();
        session.record_highs(self.highs.score, self.highs.creep_level, self.highs.tower_level);
        self.lifetime.merge(&session);
        info!(
            score = session.high_score,
            secs = session.game_time_secs,
            "session finished"
        );
        self.finished_sessions.push(session);
    }

    fn update_highs(&mut self) {
        let Some(player) = self.player else {
            return;
        };
        if !self.world.contains(player) {
            return;
        }
        let data = require::<Player>(&self.world, player);
        self.highs.score = self.highs.score.max(data.score);
        self.highs.creep_level = self.highs.creep_level.max(data.creep_level());
        self.highs.tower_level = self
            .highs
            .tower_level
            .max(systems::snapshot::highest_tower_level(&self.world));
    }
}
