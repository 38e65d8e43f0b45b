//! Replication toward a remote viewer.
//!
//! The authoritative engine never waits on the network. Snapshots are
//! throttled to a fixed rate, encoded as JSON, and handed to a `SyncSink`.
//! A failed send is logged and dropped. The receiving side applies
//! payloads into a `MirrorWorld`, which is a read-only projection.

use std::sync::mpsc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use td_core::constants::{ENGINE_TPS, REPLICATION_HZ};
use td_core::enums::EntityKind;
use td_core::events::PeerEvent;
use td_core::state::{BattleSnapshot, BattleState, Board, EntityView};

/// Wire message between peers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SyncMessage {
    /// Replicated entity state of the sender's battle.
    State(ReplicatedState),
    /// An event for the receiver's simulation.
    Event { event: PeerEvent },
}

/// The part of a snapshot a mirror needs for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplicatedState {
    pub tick: u64,
    pub battle: BattleState,
    pub board: Board,
    pub entities: Vec<EntityView>,
}

impl From<&BattleSnapshot> for ReplicatedState {
    fn from(snapshot: &BattleSnapshot) -> Self {
        Self {
            tick: snapshot.time.tick,
            battle: snapshot.battle,
            board: snapshot.board,
            entities: snapshot.entities.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("sync peer disconnected")]
    Disconnected,
    #[error("failed to encode sync message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Outbound transport for encoded payloads.
pub trait SyncSink {
    fn send(&mut self, payload: String) -> Result<(), SyncError>;
}

/// In-process sink over an `mpsc` channel.
pub struct ChannelSink {
    tx: mpsc::Sender<String>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self { tx }
    }

    /// A sink and the receiver that reads from it.
    pub fn pair() -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel();
        (Self::new(tx), rx)
    }
}

impl SyncSink for ChannelSink {
    fn send(&mut self, payload: String) -> Result<(), SyncError> {
        self.tx.send(payload).map_err(|_| SyncError::Disconnected)
    }
}

/// Sink that drops everything, for single-player runs.
#[derive(Debug, Default)]
pub struct NullSink;

impl SyncSink for NullSink {
    fn send(&mut self, _payload: String) -> Result<(), SyncError> {
        Ok(())
    }
}

/// Throttles snapshots to the replication rate and forwards peer events.
pub struct ReplicationPublisher {
    sink: Box<dyn SyncSink + Send>,
    /// Replication slot of the last published snapshot.
    last_slot: Option<u64>,
    failures: u64,
}

impl ReplicationPublisher {
    pub fn new(sink: Box<dyn SyncSink + Send>) -> Self {
        Self {
            sink,
            last_slot: None,
            failures: 0,
        }
    }

    /// Publish `snapshot` if it falls in a new replication slot.
    /// Returns whether a payload was handed to the sink.
    pub fn publish(&mut self, snapshot: &BattleSnapshot) -> bool {
        let slot = snapshot.time.tick * REPLICATION_HZ as u64 / ENGINE_TPS as u64;
        if self.last_slot == Some(slot) {
            return false;
        }
        self.last_slot = Some(slot);
        self.send(&SyncMessage::State(ReplicatedState::from(snapshot)))
    }

    /// Send events to the peer immediately.
    pub fn send_events(&mut self, events: impl IntoIterator<Item = PeerEvent>) {
        for event in events {
            debug!(?event, "sending peer event");
            self.send(&SyncMessage::Event { event });
        }
    }

    /// Sends that failed since the publisher was created.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    fn send(&mut self, message: &SyncMessage) -> bool {
        let result = serde_json::to_string(message)
            .map_err(SyncError::from)
            .and_then(|payload| self.sink.send(payload));
        match result {
            Ok(()) => true,
            Err(err) => {
                self.failures += 1;
                warn!(%err, failures = self.failures, "replication send failed");
                false
            }
        }
    }
}

/// Read-only projection of a remote battle.
#[derive(Debug, Clone, Default)]
pub struct MirrorWorld {
    state: ReplicatedState,
}

impl MirrorWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one payload. State replaces the view unless it is older than
    /// what is already shown; an event is handed back for the local engine.
    pub fn apply(&mut self, payload: &str) -> Result<Option<PeerEvent>, serde_json::Error> {
        match serde_json::from_str(payload)? {
            SyncMessage::State(state) => {
                if state.tick >= self.state.tick {
                    self.state = state;
                }
                Ok(None)
            }
            SyncMessage::Event { event } => Ok(Some(event)),
        }
    }

    pub fn tick(&self) -> u64 {
        self.state.tick
    }

    pub fn battle(&self) -> BattleState {
        self.state.battle
    }

    pub fn board(&self) -> Board {
        self.state.board
    }

    pub fn entities(&self) -> &[EntityView] {
        &self.state.entities
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.state.entities.iter().filter(|e| e.kind == kind).count()
    }
}
