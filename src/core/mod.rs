//! Core types: players, positions, configuration, errors, match state.
//!
//! Everything here is plain data. The board lives in `grid`, the
//! explosion algorithm in `cascade` and turn handling in `rules`.

pub mod player;
pub mod position;
pub mod config;
pub mod error;
pub mod state;

pub use player::{PlayerId, PlayerMap};
pub use position::{CellClass, Neighbors, Position, CELL_COUNT, GRID_SIZE};
pub use config::{Color, MatchConfig, DEFAULT_PALETTE, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{ConfigError, MoveError};
pub use state::{MatchPhase, MatchResult, MatchState, MoveRecord, PlayerRecord, WinReason};
