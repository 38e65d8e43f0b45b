//! Events emitted by the simulation for audio and multiplayer peers.

use serde::{Deserialize, Serialize};

/// Fire-and-forget sound cues. Playback failures are the frontend's problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// A bullet was launched.
    Shoot,
    /// A target was destroyed.
    Explosion,
    /// Rejected placement: the tower would leave the board.
    Invalid1,
    /// Rejected action: not enough money, or a tower on top of the base.
    Invalid2,
    /// The base fell.
    Killed,
}

impl SoundCue {
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundCue::Shoot => "shoot",
            SoundCue::Explosion => "explosion",
            SoundCue::Invalid1 => "invalid1",
            SoundCue::Invalid2 => "invalid2",
            SoundCue::Killed => "killed",
        }
    }
}

/// Simulation-relevant messages exchanged with a remote peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PeerEvent {
    /// Spawn a super creep at the default entry point.
    SpawnSuperCreep,
}
