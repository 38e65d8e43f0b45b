//! Control surface for a frontend.
//!
//! These functions bridge frontend requests to the game loop thread via
//! channels. A frontend starts one session, sends commands and peer
//! events, polls the latest snapshot, and stops the session on exit.

use thiserror::Error;

use td_core::commands::PlayerCommand;
use td_core::config::GameConfig;
use td_core::events::PeerEvent;
use td_core::state::BattleSnapshot;

use crate::game_loop;
use crate::replication::ReplicationPublisher;
use crate::state::{AppState, LoopCommand};

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("game loop already running")]
    AlreadyRunning,
    #[error("game loop not started")]
    NotStarted,
    #[error("game loop has stopped")]
    LoopStopped,
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("shared state lock poisoned")]
    Poisoned,
}

fn lock<T>(mutex: &std::sync::Mutex<T>) -> Result<std::sync::MutexGuard<'_, T>, ControlError> {
    mutex.lock().map_err(|_| ControlError::Poisoned)
}

/// Start the game loop thread if it is not already running.
pub fn start_session(
    state: &AppState,
    config: GameConfig,
    publisher: ReplicationPublisher,
) -> Result<(), ControlError> {
    let mut running = lock(&state.running)?;
    if *running {
        return Err(ControlError::AlreadyRunning);
    }

    let (cmd_tx, handle) =
        game_loop::spawn_game_loop(config, publisher, state.latest_snapshot.clone())?;

    *lock(&state.command_tx)? = Some(cmd_tx);
    *lock(&state.loop_handle)? = Some(handle);
    *running = true;
    Ok(())
}

fn send(state: &AppState, command: LoopCommand) -> Result<(), ControlError> {
    match lock(&state.command_tx)?.as_ref() {
        Some(tx) => tx.send(command).map_err(|_| ControlError::LoopStopped),
        None => Err(ControlError::NotStarted),
    }
}

/// Send a player command to the engine.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), ControlError> {
    send(state, LoopCommand::Player(command))
}

/// Forward an event received from the remote peer.
pub fn send_peer_event(state: &AppState, event: PeerEvent) -> Result<(), ControlError> {
    send(state, LoopCommand::Peer(event))
}

/// Get the latest snapshot synchronously (for polling / initial state).
pub fn get_snapshot(state: &AppState) -> Result<Option<BattleSnapshot>, ControlError> {
    Ok(lock(&state.latest_snapshot)?.clone())
}

/// Stop the loop, wait for it to save stats, and reset the shared state.
pub fn stop_session(state: &AppState) -> Result<(), ControlError> {
    let mut running = lock(&state.running)?;
    if !*running {
        return Err(ControlError::NotStarted);
    }
    if let Some(tx) = lock(&state.command_tx)?.take() {
        // A closed channel means the loop already exited.
        let _ = tx.send(LoopCommand::Shutdown);
    }
    if let Some(handle) = lock(&state.loop_handle)?.take() {
        handle.join().map_err(|_| ControlError::LoopStopped)?;
    }
    *running = false;
    Ok(())
}
