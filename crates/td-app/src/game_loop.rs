//! Game loop thread: runs the battle engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside this thread so it never crosses a thread
//! boundary. Commands and peer events arrive via `mpsc` channel. Snapshots
//! are stored in shared state for synchronous polling and handed to the
//! replication publisher. Finished sessions are merged into the persisted
//! stats as they come in, and once more on shutdown.

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{error, info};

use td_core::config::GameConfig;
use td_core::constants::ENGINE_TPS;
use td_core::state::BattleSnapshot;
use td_core::stats::GameStats;
use td_sim::BattleEngine;

use crate::persistence;
use crate::replication::ReplicationPublisher;
use crate::state::LoopCommand;

/// Duration of one engine tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / ENGINE_TPS as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: GameConfig,
    publisher: ReplicationPublisher,
    latest_snapshot: Arc<Mutex<Option<BattleSnapshot>>>,
) -> std::io::Result<(mpsc::Sender<LoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("td-game-loop".into())
        .spawn(move || {
            let mut session = LoopSession::new(config, publisher);
            session.run(cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// Everything the loop thread owns.
pub struct LoopSession {
    engine: BattleEngine,
    publisher: ReplicationPublisher,
    stats_path: PathBuf,
    /// Persisted aggregate, separate from the engine's own lifetime copy.
    lifetime: GameStats,
}

impl LoopSession {
    /// Load persisted stats and build the engine.
    pub fn new(config: GameConfig, publisher: ReplicationPublisher) -> Self {
        let stats_path = PathBuf::from(&config.stats_path);
        let lifetime = persistence::load_stats(&stats_path);
        Self {
            engine: BattleEngine::new(config, lifetime.clone()),
            publisher,
            stats_path,
            lifetime,
        }
    }

    pub fn engine(&self) -> &BattleEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut BattleEngine {
        &mut self.engine
    }

    pub fn lifetime_stats(&self) -> &GameStats {
        &self.lifetime
    }

    /// Apply one loop command. Returns `false` on shutdown.
    pub fn handle(&mut self, command: LoopCommand) -> bool {
        match command {
            LoopCommand::Player(cmd) => self.engine.queue_command(cmd),
            LoopCommand::Peer(event) => self.engine.receive_peer_event(event),
            LoopCommand::Shutdown => return false,
        }
        true
    }

    /// Advance one engine tick and fan out its results.
    pub fn step(&mut self) -> BattleSnapshot {
        let snapshot = self.engine.tick();
        self.publisher.publish(&snapshot);
        self.publisher.send_events(self.engine.drain_outbound());
        self.save_finished();
        snapshot
    }

    /// Finish the running session and save stats.
    pub fn shutdown(&mut self) {
        self.engine.shutdown();
        self.save_finished();
        info!(tick = self.engine.time().tick, "game loop stopped");
    }

    fn save_finished(&mut self) {
        let sessions = self.engine.take_finished_sessions();
        let merged = persistence::merge_sessions(&self.stats_path, &mut self.lifetime, sessions);
        if let Err(err) = merged {
            error!(%err, "failed to save stats");
        }
    }

    /// The loop. Runs until Shutdown command or channel disconnect.
    fn run(
        &mut self,
        cmd_rx: mpsc::Receiver<LoopCommand>,
        latest_snapshot: &Mutex<Option<BattleSnapshot>>,
    ) {
        info!("game loop started");
        let mut next_tick_time = Instant::now();

        'outer: loop {
            // 1. Drain all pending commands
            loop {
                match cmd_rx.try_recv() {
                    Ok(command) => {
                        if !self.handle(command) {
                            break 'outer;
                        }
                    }
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => break 'outer,
                }
            }

            // 2. Advance one tick and publish
            let snapshot = self.step();

            // 3. Store latest snapshot for synchronous polling
            if let Ok(mut lock) = latest_snapshot.lock() {
                *lock = Some(snapshot);
            }

            // 4. Sleep until next tick
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind; reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }

        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replication::{ChannelSink, NullSink};
    use td_core::commands::PlayerCommand;
    use td_core::enums::GamePhase;
    use td_core::events::PeerEvent;
    use td_core::stats::Stat;

    fn temp_config(name: &str) -> GameConfig {
        let path = std::env::temp_dir()
            .join(format!("td-loop-{}-{name}", std::process::id()))
            .join("stats.txt");
        GameConfig {
            stats_path: path.to_string_lossy().into_owned(),
            ..Default::default()
        }
    }

    fn cleanup(config: &GameConfig) {
        if let Some(dir) = PathBuf::from(&config.stats_path).parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();

        tx.send(LoopCommand::Player(PlayerCommand::StartBattle)).unwrap();
        tx.send(LoopCommand::Peer(PeerEvent::SpawnSuperCreep)).unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            LoopCommand::Player(PlayerCommand::StartBattle)
        ));
        assert!(matches!(commands[1], LoopCommand::Peer(PeerEvent::SpawnSuperCreep)));
        assert!(matches!(commands[2], LoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_session_handles_commands() {
        let config = temp_config("handle");
        let publisher = ReplicationPublisher::new(Box::new(NullSink));
        let mut session = LoopSession::new(config.clone(), publisher);

        assert!(session.handle(LoopCommand::Player(PlayerCommand::StartBattle)));
        let snap = session.step();
        assert_eq!(snap.phase, GamePhase::Running);
        assert!(!session.handle(LoopCommand::Shutdown));
        cleanup(&config);
    }

    #[test]
    fn test_outbound_events_reach_sink() {
        let config = temp_config("outbound");
        let (sink, rx) = ChannelSink::pair();
        let publisher = ReplicationPublisher::new(Box::new(sink));
        let mut session = LoopSession::new(config.clone(), publisher);

        session.handle(LoopCommand::Player(PlayerCommand::StartBattle));
        session.step();
        session.handle(LoopCommand::Player(PlayerCommand::SendSuperCreep));
        session.step();

        let events = rx
            .try_iter()
            .filter(|payload| payload.contains("SpawnSuperCreep"))
            .count();
        assert_eq!(events, 1);
        cleanup(&config);
    }

    #[test]
    fn test_shutdown_saves_stats() {
        let config = temp_config("shutdown");
        let publisher = ReplicationPublisher::new(Box::new(NullSink));
        let mut session = LoopSession::new(config.clone(), publisher);
        session.handle(LoopCommand::Player(PlayerCommand::StartBattle));
        session.step();
        session.engine_mut().try_place_tower(300, 400).unwrap();
        session.shutdown();

        assert_eq!(session.lifetime_stats().get(Stat::TowersBuilt), 1);
        let saved = persistence::load_stats(std::path::Path::new(&config.stats_path));
        assert_eq!(saved.get(Stat::TowersBuilt), 1);
        cleanup(&config);
    }

    #[test]
    fn test_loop_thread_runs_and_stops() {
        let config = temp_config("thread");
        let latest = Arc::new(Mutex::new(None));
        let publisher = ReplicationPublisher::new(Box::new(NullSink));
        let (tx, handle) = spawn_game_loop(config.clone(), publisher, latest.clone()).unwrap();

        tx.send(LoopCommand::Player(PlayerCommand::StartBattle)).unwrap();
        std::thread::sleep(Duration::from_millis(100));
        tx.send(LoopCommand::Shutdown).unwrap();
        handle.join().unwrap();

        let snapshot = latest.lock().unwrap().clone().unwrap();
        assert_eq!(snapshot.phase, GamePhase::Running);
        assert!(snapshot.time.tick > 0);
        cleanup(&config);
    }
}
