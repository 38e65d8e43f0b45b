//! Application state shared between the control surface and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use td_core::commands::PlayerCommand;
use td_core::events::PeerEvent;
use td_core::state::BattleSnapshot;

/// Messages sent from the control surface to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A player command to forward to the battle engine.
    Player(PlayerCommand),
    /// An event received from the remote peer.
    Peer(PeerEvent),
    /// Finish the session, save stats, and stop the loop.
    Shutdown,
}

/// Shared application state.
///
/// `mpsc::Sender` is Send but not Sync, so it sits behind a `Mutex`.
/// The latest snapshot is shared with the loop thread through an `Arc`.
pub struct AppState {
    /// `None` until a session is started.
    pub command_tx: Mutex<Option<mpsc::Sender<LoopCommand>>>,
    /// Latest snapshot for synchronous polling. Written by the loop thread.
    pub latest_snapshot: Arc<Mutex<Option<BattleSnapshot>>>,
    pub loop_handle: Mutex<Option<JoinHandle<()>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_handle: Mutex::new(None),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(state.loop_handle.lock().unwrap().is_none());
        assert!(!*state.running.lock().unwrap());
    }
}
