//! Error types for move validation and match configuration.
//!
//! Every error is raised before any state is touched, so a rejected
//! move or configuration leaves the grid and match exactly as they were.

use super::config::Color;
use super::player::PlayerId;
use super::position::Position;

/// Why a move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// Coordinates outside the fixed board.
    #[error("position ({row}, {col}) is outside the board")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// Target cell holds orbs of another player.
    #[error("cell {position} is owned by {owner}")]
    CellOwnedByOther {
        /// Target cell.
        position: Position,
        /// Current owner of the cell.
        owner: PlayerId,
    },

    /// The match already has a winner.
    #[error("match is over")]
    MoveAfterGameOver,
}

/// Why a match configuration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Player count outside the supported range.
    #[error("player count {count} is not supported")]
    PlayerCount {
        /// Requested player count.
        count: usize,
    },

    /// More players than the default palette has colors for.
    #[error("default palette has no color for {count} players")]
    PaletteExhausted {
        /// Requested player count.
        count: usize,
    },

    /// Two players were given the same color.
    #[error("color {0} assigned to more than one player")]
    DuplicateColor(Color),

    /// Explicit colors do not match the requested player count.
    #[error("{colors} colors given for {players} players")]
    ColorCountMismatch {
        /// Requested player count.
        players: usize,
        /// Number of colors given.
        colors: usize,
    },
}
