//! Recoverable error types.

use thiserror::Error;

/// Why a tower could not be placed at the requested cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("tower at ({x}, {y}) would extend outside the board")]
    OutOfBounds { x: i32, y: i32 },
    #[error("tower at ({x}, {y}) would overlap the base")]
    BaseCollision { x: i32, y: i32 },
    #[error("no battle in progress")]
    NoBattle,
}
