//! Explicit simulation context threaded through every system.

use hecs::Entity;
use rand_chacha::ChaCha8Rng;

use td_core::assets::AssetCatalog;
use td_core::events::SoundCue;
use td_core::state::Board;
use td_core::stats::GameStats;

/// Sound cues raised during a tick. Dropped at the source while muted.
#[derive(Debug, Clone, Default)]
pub struct AudioQueue {
    enabled: bool,
    cues: Vec<SoundCue>,
}

impl AudioQueue {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            cues: Vec::new(),
        }
    }

    pub fn play(&mut self, cue: SoundCue) {
        if self.enabled {
            self.cues.push(cue);
        }
    }

    /// Enable or mute. Returns the previous setting.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        std::mem::replace(&mut self.enabled, enabled)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn drain(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }
}

/// Everything a system needs besides the world itself.
pub struct SimContext<'a> {
    pub board: Board,
    pub player: Entity,
    pub stats: &'a mut GameStats,
    pub audio: &'a mut AudioQueue,
    pub rng: &'a mut ChaCha8Rng,
    pub assets: &'a dyn AssetCatalog,
}
